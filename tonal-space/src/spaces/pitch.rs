//! Pitch semantics on top of the affine pair.
//!
//! A [`PitchSpace`] gives its points an origin and, for periodic spaces, a
//! period. On top of [`Point`] (a pitch) and [`Vector`] (an interval) this
//! adds two reduced types: [`PitchClass`], the pitch with octave information
//! removed, and [`IntervalClass`], the interval reduced to the smallest
//! equivalent step. Class and non-class values of one space never mix in
//! arithmetic; the operators simply do not exist for the mixed pairs.
//!
//! Reduction keeps values canonical: a pitch class lives in
//! `[origin, origin + period)` and an interval class in
//! `(-period/2, period/2]` (centered, so a fifth up and a fourth down reduce
//! to the same class).
//!
//! Cross-type conversion consults a [`ConverterRegistry`]. Pitches use their
//! registered pipeline directly. Intervals without a pipeline of their own
//! fall back to the pitch side: lift to the equivalent pitch, convert,
//! lift back, then add the displacement between the two spaces' origins
//! (the point↔vector correspondence is defined relative to each space's own
//! origin, so the naive route is off by exactly that displacement).

use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::f64::consts::TAU;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::Zero;

use super::convert::ConverterRegistry;
use super::{AffineValue, Point, Space, SpaceError, SpaceResult, Vector};

/// A space whose points are pitches.
pub trait PitchSpace: Space {
    /// The pitch value the zero interval corresponds to.
    fn origin() -> Self::Value;

    /// The octave-equivalence period, if the space has one. Spaces that
    /// reduce some other way (the line of fifths zeroes a single axis)
    /// return `None`.
    fn period() -> Option<Self::Value>;

    /// Canonical pitch-class representative of `v`.
    fn class_representative(v: Self::Value) -> Self::Value;

    /// Canonical centered interval-class representative of `v`.
    fn interval_class_representative(v: Self::Value) -> Self::Value;

    /// Position of a canonical pitch-class value within the period, as a
    /// fraction in `[0, 1)`. `None` when the space has no period.
    fn class_phase(v: Self::Value) -> Option<f64> {
        let _ = v;
        None
    }

    /// Signed fraction of the period covered by a canonical interval-class
    /// value, in `(-1/2, 1/2]`. `None` when the space has no period.
    fn interval_class_phase(v: Self::Value) -> Option<f64> {
        let _ = v;
        None
    }
}

/// A pitch with octave information removed.
pub struct PitchClass<S: PitchSpace> {
    value: S::Value,
}

/// An interval reduced to the smallest equivalent step.
pub struct IntervalClass<S: PitchSpace> {
    value: S::Value,
}

impl<S: PitchSpace> PitchClass<S> {
    pub fn new(value: S::Value) -> Self {
        Self {
            value: S::class_representative(value),
        }
    }

    pub fn value(&self) -> S::Value {
        self.value
    }

    /// The canonical representative as a concrete pitch.
    pub fn to_pitch(self) -> Point<S> {
        Point::new(self.value)
    }

    /// Already reduced; returns itself.
    pub fn to_pitch_class(self) -> Self {
        self
    }

    /// Where in the period this class sits, as a fraction in `[0, 1)`.
    pub fn phase(&self) -> SpaceResult<f64> {
        S::class_phase(self.value).ok_or(SpaceError::NoPeriod {
            space: S::POINT_NAME,
        })
    }

    pub fn phase_in_radians(&self) -> SpaceResult<f64> {
        Ok(self.phase()? * TAU)
    }

    /// Convert to the pitch-class type of another space.
    ///
    /// A pipeline registered directly for the class types wins; otherwise
    /// the canonical representative is converted as a pitch and reduced.
    pub fn convert_to<T: PitchSpace>(
        &self,
        registry: &ConverterRegistry,
    ) -> SpaceResult<PitchClass<T>> {
        if let Some(same) = cast_same(*self) {
            return Ok(same);
        }
        if registry.has_pipeline::<PitchClass<S>, PitchClass<T>>() {
            return registry.convert::<PitchClass<S>, PitchClass<T>>(*self);
        }
        Ok(self.to_pitch().convert_to::<T>(registry)?.to_pitch_class())
    }
}

impl<S: PitchSpace> IntervalClass<S> {
    pub fn new(value: S::Value) -> Self {
        Self {
            value: S::interval_class_representative(value),
        }
    }

    pub fn value(&self) -> S::Value {
        self.value
    }

    /// The canonical representative as a concrete interval.
    pub fn to_interval(self) -> Vector<S> {
        Vector::new(self.value)
    }

    /// The pitch class this step reaches from the origin's class.
    pub fn to_pitch_class(self) -> PitchClass<S> {
        PitchClass::new(self.value)
    }

    /// Already reduced; returns itself.
    pub fn to_interval_class(self) -> Self {
        self
    }

    /// Signed fraction of the period this step covers, in `(-1/2, 1/2]`.
    pub fn phase_diff(&self) -> SpaceResult<f64> {
        S::interval_class_phase(self.value).ok_or(SpaceError::NoPeriod {
            space: S::VECTOR_NAME,
        })
    }

    pub fn phase_diff_in_radians(&self) -> SpaceResult<f64> {
        Ok(self.phase_diff()? * TAU)
    }

    /// Convert to the interval-class type of another space.
    pub fn convert_to<T: PitchSpace>(
        &self,
        registry: &ConverterRegistry,
    ) -> SpaceResult<IntervalClass<T>> {
        if let Some(same) = cast_same(*self) {
            return Ok(same);
        }
        if registry.has_pipeline::<IntervalClass<S>, IntervalClass<T>>() {
            return registry.convert::<IntervalClass<S>, IntervalClass<T>>(*self);
        }
        Ok(self
            .to_interval()
            .convert_to::<T>(registry)?
            .to_interval_class())
    }
}

impl<S: PitchSpace> Point<S> {
    /// Pitch naming for [`Point::to_vector`].
    pub fn to_interval(self) -> Vector<S> {
        self.to_vector()
    }

    /// Reduce to the pitch class.
    pub fn to_pitch_class(self) -> PitchClass<S> {
        PitchClass::new(self.value())
    }

    /// Convert to the pitch type of another space via its registered
    /// pipeline.
    pub fn convert_to<T: PitchSpace>(&self, registry: &ConverterRegistry) -> SpaceResult<Point<T>> {
        if let Some(same) = cast_same(*self) {
            return Ok(same);
        }
        registry.convert::<Point<S>, Point<T>>(*self)
    }
}

impl<S: PitchSpace> Vector<S> {
    /// Pitch naming for [`Vector::to_point`].
    pub fn to_pitch(self) -> Point<S> {
        self.to_point()
    }

    /// Reduce to the interval class.
    pub fn to_interval_class(self) -> IntervalClass<S> {
        IntervalClass::new(self.value())
    }

    /// Convert to the interval type of another space.
    ///
    /// A pipeline registered for the interval types is used directly. With
    /// none registered, the interval goes the long way round: through its
    /// equivalent pitch, the pitch pipeline, and back, plus the displacement
    /// between the two origins.
    pub fn convert_to<T: PitchSpace>(
        &self,
        registry: &ConverterRegistry,
    ) -> SpaceResult<Vector<T>> {
        if let Some(same) = cast_same(*self) {
            return Ok(same);
        }
        if registry.has_pipeline::<Vector<S>, Vector<T>>() {
            return registry.convert::<Vector<S>, Vector<T>>(*self);
        }
        let naive = self.to_pitch().convert_to::<T>(registry)?.to_interval();
        let source_origin: Point<T> = Vector::<S>::zero().to_pitch().convert_to::<T>(registry)?;
        let target_origin: Point<T> = Vector::<T>::zero().to_pitch();
        Ok(naive + (target_origin - source_origin))
    }
}

/// Identity conversion when source and target are one type.
fn cast_same<A: 'static, B: 'static>(value: A) -> Option<B> {
    if TypeId::of::<A>() == TypeId::of::<B>() {
        let boxed: Box<dyn Any> = Box::new(value);
        Some(*boxed.downcast::<B>().expect("type ids match"))
    } else {
        None
    }
}

/// A parsed pitch name: carrying an octave it locates a concrete pitch,
/// without one it names a pitch class.
pub enum ParsedPitch<S: PitchSpace> {
    Pitch(Point<S>),
    Class(PitchClass<S>),
}

impl<S: PitchSpace> ParsedPitch<S> {
    pub fn pitch(self) -> Option<Point<S>> {
        match self {
            Self::Pitch(p) => Some(p),
            Self::Class(_) => None,
        }
    }

    pub fn class(self) -> Option<PitchClass<S>> {
        match self {
            Self::Pitch(_) => None,
            Self::Class(c) => Some(c),
        }
    }
}

impl<S: PitchSpace> Clone for ParsedPitch<S> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<S: PitchSpace> Copy for ParsedPitch<S> {}
impl<S: PitchSpace> fmt::Debug for ParsedPitch<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pitch(p) => write!(f, "Pitch({p:?})"),
            Self::Class(c) => write!(f, "Class({c:?})"),
        }
    }
}
impl<S: PitchSpace> PartialEq for ParsedPitch<S> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Pitch(a), Self::Pitch(b)) => a == b,
            (Self::Class(a), Self::Class(b)) => a == b,
            _ => false,
        }
    }
}

impl<S: PitchSpace> Clone for PitchClass<S> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<S: PitchSpace> Copy for PitchClass<S> {}
impl<S: PitchSpace> Clone for IntervalClass<S> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<S: PitchSpace> Copy for IntervalClass<S> {}

impl<S: PitchSpace> fmt::Debug for PitchClass<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Class({:?})", S::POINT_NAME, self.value)
    }
}
impl<S: PitchSpace> fmt::Debug for IntervalClass<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Class({:?})", S::VECTOR_NAME, self.value)
    }
}

impl<S: PitchSpace> PartialEq for PitchClass<S> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
impl<S: PitchSpace> Eq for PitchClass<S> where S::Value: Eq {}
impl<S: PitchSpace> PartialEq for IntervalClass<S> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
impl<S: PitchSpace> Eq for IntervalClass<S> where S::Value: Eq {}

impl<S: PitchSpace> Hash for PitchClass<S>
where
    S::Value: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}
impl<S: PitchSpace> Hash for IntervalClass<S>
where
    S::Value: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<S: PitchSpace> PartialOrd for PitchClass<S>
where
    S::Value: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}
impl<S: PitchSpace> PartialOrd for IntervalClass<S>
where
    S::Value: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<S: PitchSpace> Sub for PitchClass<S> {
    type Output = IntervalClass<S>;

    fn sub(self, rhs: Self) -> IntervalClass<S> {
        IntervalClass::new(self.value - rhs.value)
    }
}

impl<S: PitchSpace> Add<IntervalClass<S>> for PitchClass<S> {
    type Output = PitchClass<S>;

    fn add(self, rhs: IntervalClass<S>) -> PitchClass<S> {
        PitchClass::new(self.value + rhs.value)
    }
}

impl<S: PitchSpace> Sub<IntervalClass<S>> for PitchClass<S> {
    type Output = PitchClass<S>;

    fn sub(self, rhs: IntervalClass<S>) -> PitchClass<S> {
        PitchClass::new(self.value - rhs.value)
    }
}

impl<S: PitchSpace> Add for IntervalClass<S> {
    type Output = IntervalClass<S>;

    fn add(self, rhs: Self) -> IntervalClass<S> {
        IntervalClass::new(self.value + rhs.value)
    }
}

impl<S: PitchSpace> Sub for IntervalClass<S> {
    type Output = IntervalClass<S>;

    fn sub(self, rhs: Self) -> IntervalClass<S> {
        IntervalClass::new(self.value - rhs.value)
    }
}

impl<S: PitchSpace> Neg for IntervalClass<S> {
    type Output = IntervalClass<S>;

    fn neg(self) -> IntervalClass<S> {
        IntervalClass::new(<S::Value as Zero>::zero() - self.value)
    }
}

impl<S: PitchSpace> Zero for IntervalClass<S> {
    fn zero() -> Self {
        Self::new(<S::Value as Zero>::zero())
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

impl<S: PitchSpace> Mul<<S::Value as AffineValue>::Scalar> for IntervalClass<S> {
    type Output = IntervalClass<S>;

    fn mul(self, rhs: <S::Value as AffineValue>::Scalar) -> IntervalClass<S> {
        IntervalClass::new(self.value.scaled(rhs))
    }
}

impl<S: PitchSpace> Div<<S::Value as AffineValue>::Scalar> for IntervalClass<S> {
    type Output = IntervalClass<S>;

    fn div(self, rhs: <S::Value as AffineValue>::Scalar) -> IntervalClass<S> {
        IntervalClass::new(self.value.divided(rhs))
    }
}

// Serialized transparently as the wrapped value; deserialization reduces to
// the canonical representative.
impl<S: PitchSpace> serde::Serialize for PitchClass<S>
where
    S::Value: serde::Serialize,
{
    fn serialize<Ser: serde::Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, S: PitchSpace> serde::Deserialize<'de> for PitchClass<S>
where
    S::Value: serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <S::Value as serde::Deserialize>::deserialize(deserializer).map(Self::new)
    }
}

impl<S: PitchSpace> serde::Serialize for IntervalClass<S>
where
    S::Value: serde::Serialize,
{
    fn serialize<Ser: serde::Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, S: PitchSpace> serde::Deserialize<'de> for IntervalClass<S>
where
    S::Value: serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <S::Value as serde::Deserialize>::deserialize(deserializer).map(Self::new)
    }
}
