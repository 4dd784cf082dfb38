//! Timestamped data items, the unit corpus readers hand around.

use serde::{Deserialize, Serialize};

/// A piece of data with its onset and extent. `time` is a point of some
/// time-like space and `duration` the matching displacement; `data` is
/// whatever the producer attaches, a pitch more often than not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event<P, V, D> {
    pub time: P,
    pub duration: V,
    pub data: D,
}

impl<P, V, D> Event<P, V, D> {
    pub fn new(time: P, duration: V, data: D) -> Self {
        Self {
            time,
            duration,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::{EnharmonicPitch, LinearTime, LinearTimeDuration};

    #[test]
    fn event_carries_time_arithmetic() {
        let e = Event::new(
            LinearTime::from(1.0),
            LinearTimeDuration::from(0.5),
            EnharmonicPitch::new(60),
        );
        assert_eq!(e.time + e.duration, LinearTime::from(1.5));
        assert_eq!(e.data.midi(), 60);
    }
}
