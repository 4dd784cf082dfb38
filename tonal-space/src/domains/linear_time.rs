//! Strictly ordered scalar time.

use crate::spaces::time::TimeSpace;
use crate::spaces::{Point, Space, Vector};

/// Marker for the floating-point time axis.
pub struct Linear;

impl Space for Linear {
    type Value = f64;
    const POINT_NAME: &'static str = "LinearTime";
    const VECTOR_NAME: &'static str = "LinearTimeDuration";
}

impl TimeSpace for Linear {}

pub type LinearTime = Point<Linear>;
pub type LinearTimeDuration = Vector<Linear>;

impl From<f64> for LinearTime {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<f64> for LinearTimeDuration {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<LinearTime> for f64 {
    fn from(time: LinearTime) -> f64 {
        time.value()
    }
}

impl From<LinearTimeDuration> for f64 {
    fn from(duration: LinearTimeDuration) -> f64 {
        duration.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_and_order() {
        let t1 = LinearTime::from(1.25);
        let t2 = LinearTime::from(4.0);
        let d = t2 - t1;
        assert_eq!(d, LinearTimeDuration::from(2.75));
        assert_eq!(t1 + d, t2);
        assert_eq!(t2 - d, t1);
        assert!(t1 < t2);
        assert_eq!(t1.to_duration(), LinearTimeDuration::from(1.25));
        assert_eq!(d.to_time(), LinearTime::from(2.75));
        assert_eq!(f64::from(t2), 4.0);
    }
}
