//! Spelled pitch on the line of fifths.
//!
//! A spelled pitch keeps its notated spelling: `C#4` and `Db4` are distinct
//! points of a two-axis lattice, one coordinate counting fifth steps and one
//! counting compensating octaves. Class reduction zeroes only the octave
//! axis, so the space has no single period and no phase; the lattice is not
//! totally ordered either.

use std::fmt;
use std::str::FromStr;

use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::spaces::pitch::{IntervalClass, ParsedPitch, PitchClass, PitchSpace};
use crate::spaces::{AffineValue, Point, Space, SpaceError, SpaceResult, Vector};

use super::{letter_semitone, split_name};

/// Lattice coordinates: fifth steps and compensating octaves.
///
/// The origin `(0, 0)` is middle C; one fifth step spans 7 semitones, one
/// octave step 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpelledCoord {
    pub fifths: i64,
    pub octaves: i64,
}

impl SpelledCoord {
    pub fn new(fifths: i64, octaves: i64) -> Self {
        Self { fifths, octaves }
    }
}

impl std::ops::Add for SpelledCoord {
    type Output = SpelledCoord;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.fifths + rhs.fifths, self.octaves + rhs.octaves)
    }
}

impl std::ops::Sub for SpelledCoord {
    type Output = SpelledCoord;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.fifths - rhs.fifths, self.octaves - rhs.octaves)
    }
}

impl Zero for SpelledCoord {
    fn zero() -> Self {
        Self::new(0, 0)
    }

    fn is_zero(&self) -> bool {
        self.fifths == 0 && self.octaves == 0
    }
}

impl AffineValue for SpelledCoord {
    type Scalar = i64;

    fn scaled(self, k: i64) -> Self {
        Self::new(self.fifths * k, self.octaves * k)
    }
    fn divided(self, k: i64) -> Self {
        Self::new(self.fifths / k, self.octaves / k)
    }
    fn count(n: usize) -> i64 {
        n as i64
    }
    fn unit() -> Self {
        Self::new(1, 0)
    }
}

/// Marker for the line-of-fifths space.
pub struct Spelled;

impl Space for Spelled {
    type Value = SpelledCoord;
    const POINT_NAME: &'static str = "SpelledPitch";
    const VECTOR_NAME: &'static str = "SpelledInterval";
}

impl PitchSpace for Spelled {
    fn origin() -> SpelledCoord {
        SpelledCoord::zero()
    }

    fn period() -> Option<SpelledCoord> {
        None
    }

    fn class_representative(v: SpelledCoord) -> SpelledCoord {
        SpelledCoord::new(v.fifths, 0)
    }

    fn interval_class_representative(v: SpelledCoord) -> SpelledCoord {
        SpelledCoord::new(v.fifths, 0)
    }
}

pub type SpelledPitch = Point<Spelled>;
pub type SpelledInterval = Vector<Spelled>;
pub type SpelledPitchClass = PitchClass<Spelled>;
pub type SpelledIntervalClass = IntervalClass<Spelled>;

/// Letters in line-of-fifths order, F one step below C.
const LETTERS: [char; 7] = ['F', 'C', 'G', 'D', 'A', 'E', 'B'];

fn letter_fifths(letter: char) -> i64 {
    match letter {
        'F' => -1,
        'C' => 0,
        'G' => 1,
        'D' => 2,
        'A' => 3,
        'E' => 4,
        'B' => 5,
        _ => unreachable!("letter comes from the name pattern"),
    }
}

fn fifths_letter(fifths: i64) -> char {
    LETTERS[(fifths + 1).rem_euclid(7) as usize]
}

/// Accidental count carried by a fifths coordinate: sharps positive, flats
/// negative.
fn fifths_alteration(fifths: i64) -> i64 {
    (fifths + 1).div_euclid(7)
}

fn accidental_marks(alteration: i64) -> String {
    if alteration >= 0 {
        "#".repeat(alteration as usize)
    } else {
        "b".repeat(-alteration as usize)
    }
}

fn coord_from_name(letter: char, alteration: i64, octave: i64) -> SpelledCoord {
    let fifths = letter_fifths(letter) + 7 * alteration;
    let midi = letter_semitone(letter) + alteration + 12 * (octave + 1);
    SpelledCoord::new(fifths, (midi - 60 - 7 * fifths) / 12)
}

/// Parse a name into either a concrete spelled pitch (octave present) or a
/// spelled pitch class (octave absent).
pub fn parse(input: &str) -> SpaceResult<ParsedPitch<Spelled>> {
    let parts = split_name(input, "spelled pitch")?;
    match parts.octave {
        Some(octave) => Ok(ParsedPitch::Pitch(SpelledPitch::new(coord_from_name(
            parts.letter,
            parts.alteration,
            octave,
        )))),
        None => Ok(ParsedPitch::Class(SpelledPitchClass::new(
            SpelledCoord::new(letter_fifths(parts.letter) + 7 * parts.alteration, 0),
        ))),
    }
}

impl FromStr for SpelledPitch {
    type Err = SpaceError;

    fn from_str(s: &str) -> SpaceResult<Self> {
        match parse(s)? {
            ParsedPitch::Pitch(p) => Ok(p),
            ParsedPitch::Class(_) => Err(SpaceError::NameIsClass {
                space: "spelled pitch",
                input: s.to_string(),
            }),
        }
    }
}

impl FromStr for SpelledPitchClass {
    type Err = SpaceError;

    fn from_str(s: &str) -> SpaceResult<Self> {
        match parse(s)? {
            ParsedPitch::Pitch(p) => Ok(p.to_pitch_class()),
            ParsedPitch::Class(c) => Ok(c),
        }
    }
}

impl SpelledPitch {
    pub fn fifth_steps(&self) -> i64 {
        self.value().fifths
    }

    pub fn octave_steps(&self) -> i64 {
        self.value().octaves
    }

    pub fn letter(&self) -> char {
        fifths_letter(self.value().fifths)
    }

    /// Sharps positive, flats negative.
    pub fn alteration(&self) -> i64 {
        fifths_alteration(self.value().fifths)
    }

    /// The enharmonic MIDI note number of this spelling.
    pub fn midi(&self) -> i64 {
        60 + 7 * self.value().fifths + 12 * self.value().octaves
    }

    /// Written octave of the letter, so `B#3` keeps octave 3 even though it
    /// sounds like C4.
    pub fn octave(&self) -> i64 {
        (self.midi() - self.alteration()).div_euclid(12) - 1
    }

    pub fn name(&self) -> String {
        format!(
            "{}{}{}",
            self.letter(),
            accidental_marks(self.alteration()),
            self.octave()
        )
    }
}

impl SpelledPitchClass {
    pub fn fifth_steps(&self) -> i64 {
        self.value().fifths
    }

    pub fn letter(&self) -> char {
        fifths_letter(self.value().fifths)
    }

    pub fn alteration(&self) -> i64 {
        fifths_alteration(self.value().fifths)
    }

    pub fn name(&self) -> String {
        format!("{}{}", self.letter(), accidental_marks(self.alteration()))
    }
}

impl fmt::Display for SpelledPitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for SpelledPitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
