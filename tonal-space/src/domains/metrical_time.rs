//! Exact metrical time in whole-note fractions.
//!
//! Slicing a piece into time slots with floating-point positions invites
//! equality bugs at slot boundaries; fractions keep onsets and offsets
//! exact, hashable and totally ordered.

use fraction::Fraction;

use crate::spaces::time::TimeSpace;
use crate::spaces::{AffineValue, Point, Space, Vector};

/// Marker for the exact fractional time axis.
pub struct Metrical;

impl Space for Metrical {
    type Value = Fraction;
    const POINT_NAME: &'static str = "MetricalTime";
    const VECTOR_NAME: &'static str = "MetricalTimeDuration";
}

impl TimeSpace for Metrical {}

impl AffineValue for Fraction {
    type Scalar = Fraction;

    fn scaled(self, k: Fraction) -> Fraction {
        self * k
    }
    fn divided(self, k: Fraction) -> Fraction {
        self / k
    }
    fn count(n: usize) -> Fraction {
        Fraction::from(n as u64)
    }
    fn unit() -> Fraction {
        Fraction::new(1u64, 1u64)
    }
}

pub type MetricalTime = Point<Metrical>;
pub type MetricalTimeDuration = Vector<Metrical>;

impl From<Fraction> for MetricalTime {
    fn from(value: Fraction) -> Self {
        Self::new(value)
    }
}

impl From<Fraction> for MetricalTimeDuration {
    fn from(value: Fraction) -> Self {
        Self::new(value)
    }
}

impl From<f64> for MetricalTime {
    fn from(value: f64) -> Self {
        Self::new(Fraction::from(value))
    }
}

impl From<f64> for MetricalTimeDuration {
    fn from(value: f64) -> Self {
        Self::new(Fraction::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_arithmetic() {
        let quarter = MetricalTimeDuration::from(Fraction::new(1u64, 4u64));
        let eighth = MetricalTimeDuration::from(Fraction::new(1u64, 8u64));
        let start = MetricalTime::from(0.0);
        let pos = start + quarter + eighth;
        assert_eq!(pos, MetricalTime::from(Fraction::new(3u64, 8u64)));
        assert_eq!(pos - start, MetricalTimeDuration::from(0.375));
        assert!(start < pos);
    }

    #[test]
    fn scaling() {
        let eighth = MetricalTimeDuration::from(Fraction::new(1u64, 8u64));
        assert_eq!(
            eighth * Fraction::from(3u64),
            MetricalTimeDuration::from(Fraction::new(3u64, 8u64))
        );
        assert_eq!(
            eighth / Fraction::from(2u64),
            MetricalTimeDuration::from(Fraction::new(1u64, 16u64))
        );
    }
}
