//! Continuous pitch as the natural logarithm of frequency in Hertz.
//!
//! The octave is the period: `ln 2` up is a doubling of frequency, and the
//! origin `ln 1` makes the zero interval correspond to 1 Hz.

use std::f64::consts::LN_2;
use std::fmt;

use crate::spaces::pitch::{IntervalClass, PitchClass, PitchSpace};
use crate::spaces::{Point, Space, Vector};

/// Marker for the log-frequency space.
pub struct LogFreq;

impl Space for LogFreq {
    type Value = f64;
    const POINT_NAME: &'static str = "LogFreqPitch";
    const VECTOR_NAME: &'static str = "LogFreqInterval";
}

impl PitchSpace for LogFreq {
    fn origin() -> f64 {
        0.0
    }

    fn period() -> Option<f64> {
        Some(LN_2)
    }

    fn class_representative(v: f64) -> f64 {
        v.rem_euclid(LN_2)
    }

    fn interval_class_representative(v: f64) -> f64 {
        let m = v.rem_euclid(LN_2);
        if m > LN_2 / 2.0 {
            m - LN_2
        } else {
            m
        }
    }

    fn class_phase(v: f64) -> Option<f64> {
        Some(v / LN_2)
    }

    fn interval_class_phase(v: f64) -> Option<f64> {
        Some(v / LN_2)
    }
}

pub type LogFreqPitch = Point<LogFreq>;
pub type LogFreqInterval = Vector<LogFreq>;
pub type LogFreqPitchClass = PitchClass<LogFreq>;
pub type LogFreqIntervalClass = IntervalClass<LogFreq>;

impl LogFreqPitch {
    pub fn from_freq(hz: f64) -> Self {
        Self::new(hz.ln())
    }

    pub fn from_ln_freq(ln_hz: f64) -> Self {
        Self::new(ln_hz)
    }

    pub fn freq(&self) -> f64 {
        self.value().exp()
    }

    pub fn ln_freq(&self) -> f64 {
        self.value()
    }
}

impl LogFreqInterval {
    /// The interval spanning the given frequency ratio.
    pub fn from_freq_ratio(ratio: f64) -> Self {
        Self::new(ratio.ln())
    }

    pub fn freq_ratio(&self) -> f64 {
        self.value().exp()
    }
}

impl fmt::Display for LogFreqPitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} Hz", self.freq())
    }
}
