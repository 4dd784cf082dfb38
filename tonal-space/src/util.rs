//! Interpolation and range helpers over the affine contract, plus slot-wise
//! slicing of event sequences.
//!
//! Everything here is generic over any point type whose subtraction yields a
//! displacement and whose displacement shifts it back, so the helpers work
//! for times, pitches and the reduced class types alike.
//!
//! # Examples
//!
//! ```
//! use tonal_space::domains::{EnharmonicInterval, EnharmonicPitch};
//! use tonal_space::util::prange;
//!
//! let c4 = EnharmonicPitch::new(60);
//! let c5 = EnharmonicPitch::new(72);
//! let semitone = EnharmonicInterval::new(1);
//! let midi: Vec<i64> = prange(c4, c5, semitone, false).map(|p| p.midi()).collect();
//! assert_eq!(midi, (60..72).collect::<Vec<_>>());
//! ```

use std::ops::{Add, Sub};

use itertools::Itertools;
use num_traits::Zero;

use crate::event::Event;
use crate::spaces::pitch::{IntervalClass, PitchSpace};
use crate::spaces::{AffineValue, Space, Vector};

/// Displacement operations the range helpers need beyond plain arithmetic.
pub trait StepOps: Copy {
    /// The domain's unit step.
    fn unit_step() -> Self;
    /// `n` copies of this step.
    fn repeated(self, n: usize) -> Self;
    /// This step split into `n` equal parts.
    fn split(self, n: usize) -> Self;
}

impl<S: Space> StepOps for Vector<S> {
    fn unit_step() -> Self {
        Vector::unit()
    }

    fn repeated(self, n: usize) -> Self {
        self * <S::Value as AffineValue>::count(n)
    }

    fn split(self, n: usize) -> Self {
        self / <S::Value as AffineValue>::count(n)
    }
}

impl<S: PitchSpace> StepOps for IntervalClass<S> {
    fn unit_step() -> Self {
        IntervalClass::new(<S::Value as AffineValue>::unit())
    }

    fn repeated(self, n: usize) -> Self {
        self * <S::Value as AffineValue>::count(n)
    }

    fn split(self, n: usize) -> Self {
        self / <S::Value as AffineValue>::count(n)
    }
}

/// `num` evenly spaced points from `start` towards `stop`.
///
/// With `endpoint` the spacing is chosen so the last point is `stop`;
/// without it the points cover the half-open span and stop one step short.
/// A count of zero yields nothing, and a count of one yields `start` alone.
pub fn linspace<P, V>(start: P, stop: P, num: usize, endpoint: bool) -> Vec<P>
where
    P: Copy + Sub<P, Output = V> + Add<V, Output = P>,
    V: StepOps,
{
    linspace_with_step(start, stop, num, endpoint).0
}

/// [`linspace`], also returning the step between consecutive points.
pub fn linspace_with_step<P, V>(start: P, stop: P, num: usize, endpoint: bool) -> (Vec<P>, V)
where
    P: Copy + Sub<P, Output = V> + Add<V, Output = P>,
    V: StepOps,
{
    let divisor = if endpoint { num.saturating_sub(1) } else { num };
    let step = (stop - start).split(divisor.max(1));
    let points = (0..num).map(|n| start + step.repeated(n)).collect();
    (points, step)
}

/// Lazy sequence of points from `start` advancing by `step` up to `stop`.
///
/// Without a step the domain's unit step is used; over the class types that
/// unit is itself a class. The direction comes from the sign of the step:
/// a negative step runs downwards and stops at or before `stop` from above.
/// `stop` itself is produced only with `endpoint`.
///
/// The range is an ordinary cloneable iterator, so it restarts for free. A
/// zero step with `stop != start` never reaches the stop condition; keeping
/// the combination consistent is the caller's concern.
pub fn prange<P, V>(start: P, stop: P, step: impl Into<Option<V>>, endpoint: bool) -> PointRange<P, V>
where
    P: Copy + PartialOrd + Add<V, Output = P>,
    V: StepOps + PartialOrd + Zero,
{
    let step = step.into().unwrap_or_else(V::unit_step);
    let backward = step < V::zero();
    PointRange {
        next: start,
        stop,
        step,
        endpoint,
        backward,
    }
}

/// Iterator returned by [`prange`].
#[derive(Debug, Clone)]
pub struct PointRange<P, V> {
    next: P,
    stop: P,
    step: V,
    endpoint: bool,
    backward: bool,
}

impl<P, V> Iterator for PointRange<P, V>
where
    P: Copy + PartialOrd + Add<V, Output = P>,
    V: Copy,
{
    type Item = P;

    fn next(&mut self) -> Option<P> {
        let current = self.next;
        if !self.endpoint && current == self.stop {
            return None;
        }
        if self.backward && current < self.stop {
            return None;
        }
        if !self.backward && current > self.stop {
            return None;
        }
        self.next = current + self.step;
        Some(current)
    }
}

/// Slice an event sequence into maximal slots of simultaneously sounding
/// data.
///
/// Every onset and offset opens a new slot; each produced event covers one
/// slot and carries, in input order, the data of all events sounding through
/// it. Gaps come out as slots with no data. Events of zero duration sound in
/// no slot.
pub fn chordify<P, V, D>(events: &[Event<P, V, D>]) -> Vec<Event<P, V, Vec<D>>>
where
    P: Copy + PartialOrd + Add<V, Output = P> + Sub<P, Output = V>,
    V: Copy,
    D: Clone,
{
    if events.is_empty() {
        return Vec::new();
    }
    let mut bounds: Vec<P> = events
        .iter()
        .flat_map(|e| [e.time, e.time + e.duration])
        .collect();
    bounds.sort_by(|a, b| a.partial_cmp(b).expect("slot times must be comparable"));
    bounds.dedup_by(|a, b| a == b);
    bounds
        .iter()
        .tuple_windows()
        .map(|(&slot, &next)| {
            let sounding = events
                .iter()
                .filter(|e| e.time <= slot && slot < e.time + e.duration)
                .map(|e| e.data.clone())
                .collect();
            Event::new(slot, next - slot, sounding)
        })
        .collect()
}
