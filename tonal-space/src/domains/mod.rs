//! Concrete value domains instantiating the affine spaces.

pub mod enharmonic;
pub mod linear_time;
pub mod log_freq;
pub mod metrical_time;
pub mod spelled;

pub use enharmonic::{
    Enharmonic, EnharmonicInterval, EnharmonicIntervalClass, EnharmonicPitch,
    EnharmonicPitchClass, NoteSpelling,
};
pub use linear_time::{Linear, LinearTime, LinearTimeDuration};
pub use log_freq::{LogFreq, LogFreqInterval, LogFreqIntervalClass, LogFreqPitch, LogFreqPitchClass};
pub use metrical_time::{Metrical, MetricalTime, MetricalTimeDuration};
pub use spelled::{
    Spelled, SpelledCoord, SpelledInterval, SpelledIntervalClass, SpelledPitch, SpelledPitchClass,
};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::spaces::convert::ConverterRegistry;
use crate::spaces::{SpaceError, SpaceResult};

/// Registry with the stock converters installed: enharmonic pitch to
/// log-frequency (equal temperament, A4 = 440 Hz) and spelled pitch to
/// enharmonic (7 semitones per fifth step). Closure extension links spelled
/// pitch to log-frequency through the middle.
pub fn standard_registry() -> ConverterRegistry {
    let mut registry = ConverterRegistry::new();
    registry
        .register(|p: EnharmonicPitch| LogFreqPitch::from_freq(p.freq()))
        .expect("empty registry takes a converter");
    registry
        .register(|p: SpelledPitch| EnharmonicPitch::new(p.midi()))
        .expect("empty registry takes a converter");
    registry
}

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<letter>[A-G])(?P<accidentals>#*|b*)(?P<octave>-?\d+)?$").expect("valid pattern"));

pub(crate) struct NameParts {
    pub letter: char,
    /// Sharps count positive, flats negative.
    pub alteration: i64,
    pub octave: Option<i64>,
}

/// Split a note name into letter, accidentals and optional octave. The
/// accidentals are uniform: `##` raises twice, `bb` lowers twice, a mix
/// does not parse.
pub(crate) fn split_name(input: &str, space: &'static str) -> SpaceResult<NameParts> {
    let bad_name = || SpaceError::BadName {
        space,
        input: input.to_string(),
    };
    let caps = NAME_PATTERN.captures(input).ok_or_else(bad_name)?;
    let letter = caps["letter"].chars().next().ok_or_else(bad_name)?;
    let accidentals = &caps["accidentals"];
    let alteration = if accidentals.starts_with('#') {
        accidentals.len() as i64
    } else {
        -(accidentals.len() as i64)
    };
    let octave = match caps.name("octave") {
        Some(m) => Some(m.as_str().parse::<i64>().map_err(|_| bad_name())?),
        None => None,
    };
    Ok(NameParts {
        letter,
        alteration,
        octave,
    })
}

/// Semitone offset of a natural letter above C.
pub(crate) fn letter_semitone(letter: char) -> i64 {
    match letter {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => unreachable!("letter comes from the name pattern"),
    }
}
