//! Twelve-tone equal-tempered pitch on MIDI note numbers.
//!
//! Enharmonically equivalent spellings collapse to one value: `"C#5"` and
//! `"Db5"` both parse to note number 73. Names follow the pattern
//! `<letter A–G><# or b, repeated><optional signed octave>`; a name without
//! an octave denotes a pitch class.
//!
//! # Examples
//!
//! ```
//! use tonal_space::domains::{EnharmonicPitch, EnharmonicInterval};
//!
//! let c4: EnharmonicPitch = "C4".parse().unwrap();
//! let d4: EnharmonicPitch = "D4".parse().unwrap();
//! assert_eq!(c4.midi(), 60);
//! assert_eq!(d4 - c4, EnharmonicInterval::new(2));
//! assert_eq!((c4 - EnharmonicInterval::new(12)).octave(), 3);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::spaces::pitch::{IntervalClass, ParsedPitch, PitchClass, PitchSpace};
use crate::spaces::{Point, Space, SpaceError, SpaceResult, Vector};

use super::{letter_semitone, split_name};

/// Marker for the twelve-tone enharmonic space.
pub struct Enharmonic;

/// Middle C; pitch classes are represented in the octave starting here.
const ORIGIN: i64 = 60;
const PERIOD: i64 = 12;

impl Space for Enharmonic {
    type Value = i64;
    const POINT_NAME: &'static str = "EnharmonicPitch";
    const VECTOR_NAME: &'static str = "EnharmonicInterval";
}

impl PitchSpace for Enharmonic {
    fn origin() -> i64 {
        ORIGIN
    }

    fn period() -> Option<i64> {
        Some(PERIOD)
    }

    fn class_representative(v: i64) -> i64 {
        ORIGIN + (v - ORIGIN).rem_euclid(PERIOD)
    }

    fn interval_class_representative(v: i64) -> i64 {
        let m = v.rem_euclid(PERIOD);
        if m > PERIOD / 2 {
            m - PERIOD
        } else {
            m
        }
    }

    fn class_phase(v: i64) -> Option<f64> {
        Some((v - ORIGIN) as f64 / PERIOD as f64)
    }

    fn interval_class_phase(v: i64) -> Option<f64> {
        Some(v as f64 / PERIOD as f64)
    }
}

pub type EnharmonicPitch = Point<Enharmonic>;
pub type EnharmonicInterval = Vector<Enharmonic>;
pub type EnharmonicPitchClass = PitchClass<Enharmonic>;
pub type EnharmonicIntervalClass = IntervalClass<Enharmonic>;

/// Which spelling table renders the black keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteSpelling {
    #[default]
    Sharps,
    Flats,
}

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

fn base_name(chroma: i64, spelling: NoteSpelling) -> &'static str {
    let table = match spelling {
        NoteSpelling::Sharps => &SHARP_NAMES,
        NoteSpelling::Flats => &FLAT_NAMES,
    };
    table[chroma.rem_euclid(PERIOD) as usize]
}

/// Parse a name into either a concrete pitch (octave present) or a pitch
/// class (octave absent).
pub fn parse(input: &str) -> SpaceResult<ParsedPitch<Enharmonic>> {
    let parts = split_name(input, "enharmonic pitch")?;
    let chroma = letter_semitone(parts.letter) + parts.alteration;
    match parts.octave {
        Some(octave) => Ok(ParsedPitch::Pitch(EnharmonicPitch::new(
            chroma + PERIOD * (octave + 1),
        ))),
        None => Ok(ParsedPitch::Class(EnharmonicPitchClass::new(chroma))),
    }
}

impl FromStr for EnharmonicPitch {
    type Err = SpaceError;

    fn from_str(s: &str) -> SpaceResult<Self> {
        match parse(s)? {
            ParsedPitch::Pitch(p) => Ok(p),
            ParsedPitch::Class(_) => Err(SpaceError::NameIsClass {
                space: "enharmonic pitch",
                input: s.to_string(),
            }),
        }
    }
}

impl FromStr for EnharmonicPitchClass {
    type Err = SpaceError;

    fn from_str(s: &str) -> SpaceResult<Self> {
        match parse(s)? {
            ParsedPitch::Pitch(p) => Ok(p.to_pitch_class()),
            ParsedPitch::Class(c) => Ok(c),
        }
    }
}

impl EnharmonicPitch {
    /// The MIDI note number.
    pub fn midi(&self) -> i64 {
        self.value()
    }

    /// Octave in scientific pitch notation; middle C sits in octave 4.
    pub fn octave(&self) -> i64 {
        self.value().div_euclid(PERIOD) - 1
    }

    /// Semitone within the octave, `0..12` above C.
    pub fn chroma(&self) -> i64 {
        self.value().rem_euclid(PERIOD)
    }

    /// Equal-tempered frequency in Hertz, A4 = 440.
    pub fn freq(&self) -> f64 {
        2f64.powf((self.value() - 69) as f64 / 12.0) * 440.0
    }

    pub fn name(&self, spelling: NoteSpelling) -> String {
        format!("{}{}", base_name(self.chroma(), spelling), self.octave())
    }
}

impl EnharmonicPitchClass {
    /// Semitone within the octave, `0..12` above C.
    pub fn chroma(&self) -> i64 {
        self.value().rem_euclid(PERIOD)
    }

    pub fn name(&self, spelling: NoteSpelling) -> String {
        base_name(self.chroma(), spelling).to_string()
    }
}

impl From<i64> for EnharmonicPitch {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<i64> for EnharmonicInterval {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<EnharmonicPitch> for i64 {
    fn from(pitch: EnharmonicPitch) -> i64 {
        pitch.value()
    }
}

impl From<EnharmonicInterval> for i64 {
    fn from(interval: EnharmonicInterval) -> i64 {
        interval.value()
    }
}

impl fmt::Display for EnharmonicPitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name(NoteSpelling::Sharps))
    }
}

impl fmt::Display for EnharmonicPitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name(NoteSpelling::Sharps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equivalent_spellings_collapse() {
        for name in ["C5", "B#4", "A###4", "Dbb5"] {
            assert_eq!(name.parse::<EnharmonicPitch>().unwrap().midi(), 72);
        }
    }

    #[test]
    fn malformed_names_do_not_parse() {
        for name in ["C5-", "B#b", "c5", "H4", ""] {
            assert!(matches!(
                name.parse::<EnharmonicPitch>(),
                Err(SpaceError::BadName { .. })
            ));
        }
    }

    #[test]
    fn octaveless_name_is_a_class_not_a_pitch() {
        assert!(matches!(
            "C#".parse::<EnharmonicPitch>(),
            Err(SpaceError::NameIsClass { .. })
        ));
        let class: EnharmonicPitchClass = "C#".parse().unwrap();
        assert_eq!(class.chroma(), 1);
        assert!(matches!(parse("C#"), Ok(ParsedPitch::Class(_))));
        assert!(matches!(parse("C#4"), Ok(ParsedPitch::Pitch(_))));
    }

    #[test]
    fn class_from_octave_name_reduces() {
        let from_octave: EnharmonicPitchClass = "C#7".parse().unwrap();
        let bare: EnharmonicPitchClass = "C#".parse().unwrap();
        assert_eq!(from_octave, bare);
    }

    #[test]
    fn negative_octaves() {
        assert_eq!("C-1".parse::<EnharmonicPitch>().unwrap().midi(), 0);
        assert_eq!("A0".parse::<EnharmonicPitch>().unwrap().midi(), 21);
    }

    #[test]
    fn names_render_in_both_spellings() {
        let cis5 = EnharmonicPitch::new(73);
        assert_eq!(cis5.name(NoteSpelling::Sharps), "C#5");
        assert_eq!(cis5.name(NoteSpelling::Flats), "Db5");
        assert_eq!(cis5.to_string(), "C#5");
        assert_eq!(cis5.to_pitch_class().name(NoteSpelling::Flats), "Db");
    }

    #[test]
    fn accessors() {
        let a4 = EnharmonicPitch::new(69);
        assert_eq!(a4.octave(), 4);
        assert_eq!(a4.chroma(), 9);
        assert_eq!(a4.freq(), 440.0);
        assert_eq!(i64::from(a4), 69);
    }

    #[test]
    fn class_representatives_sit_in_the_middle_octave() {
        assert_eq!(EnharmonicPitch::new(0).to_pitch_class().value(), 60);
        assert_eq!(EnharmonicPitch::new(73).to_pitch_class().value(), 61);
        assert_eq!(EnharmonicPitchClass::new(61).value(), 61);
    }
}
