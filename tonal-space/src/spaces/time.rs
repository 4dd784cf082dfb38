//! Time naming for the affine pair: instants are points, durations vectors.

use super::{Point, Space, Vector};

/// A space whose points are instants and whose vectors are durations.
pub trait TimeSpace: Space {}

impl<S: TimeSpace> Point<S> {
    /// Time naming for [`Point::to_vector`].
    pub fn to_duration(self) -> Vector<S> {
        self.to_vector()
    }
}

impl<S: TimeSpace> Vector<S> {
    /// Time naming for [`Vector::to_point`].
    pub fn to_time(self) -> Point<S> {
        self.to_point()
    }
}
