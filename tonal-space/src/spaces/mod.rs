//! Affine point/vector algebra over typed value spaces.
//!
//! A [`Space`] names a value domain and a pair of wrapper types lives on top
//! of it: [`Point`] for locations (a pitch, an instant) and [`Vector`] for
//! displacements (an interval, a duration). Points and vectors of one space
//! combine the affine way: two points subtract to a vector, a vector shifts
//! a point, vectors add among themselves and stretch by a scalar. Points do
//! not compose additively, and nothing combines across spaces; both rules
//! are enforced by the type system rather than checked at run time.
//!
//! # Examples
//!
//! ```
//! use tonal_space::domains::{LinearTime, LinearTimeDuration};
//!
//! let a = LinearTime::from(1.0);
//! let b = LinearTime::from(3.5);
//! let d: LinearTimeDuration = b - a;
//! assert_eq!(d, LinearTimeDuration::from(2.5));
//! assert_eq!(a + d, b);
//! assert_eq!(b - d, a);
//! assert_eq!(d + d, 2.0 * d);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::Zero;

pub mod convert;
pub mod pitch;
pub mod time;

/// Failures of the algebra that survive into run time. Incompatible
/// arithmetic (point plus point, mixing spaces, mixing class and non-class
/// values) does not get this far: it fails to compile.
#[derive(Debug, thiserror::Error)]
pub enum SpaceError {
    #[error("`{input}` does not match the {space} name pattern")]
    BadName { space: &'static str, input: String },
    #[error("`{input}` has no octave and names a {space} class, not a concrete pitch")]
    NameIsClass { space: &'static str, input: String },
    #[error("no converter registered from `{from}` to `{to}`")]
    NoConverter {
        from: &'static str,
        to: &'static str,
    },
    #[error("no converters registered from `{from}`")]
    NoConvertersFrom { from: &'static str },
    #[error(
        "an explicit converter from `{from}` to `{to}` is already registered; \
        set an overwrite policy to replace or keep it"
    )]
    ConverterConflict {
        from: &'static str,
        to: &'static str,
    },
    #[error("converter produced `{produced}` where `{expected}` was expected")]
    ConverterMismatch {
        expected: &'static str,
        produced: &'static str,
    },
    #[error("{space} has no period to take a phase over")]
    NoPeriod { space: &'static str },
}

pub type SpaceResult<T> = Result<T, SpaceError>;

/// Raw representation wrapped by the points and vectors of a space.
///
/// The arithmetic of the wrappers delegates here. `Scalar` is whatever the
/// domain stretches its displacements by: `f64` for the continuous domains,
/// `i64` for the discrete ones.
pub trait AffineValue:
    Copy + fmt::Debug + PartialEq + Zero + Add<Output = Self> + Sub<Output = Self> + 'static
{
    type Scalar: Copy;

    fn scaled(self, k: Self::Scalar) -> Self;
    fn divided(self, k: Self::Scalar) -> Self;
    /// The scalar equivalent of an interpolation count.
    fn count(n: usize) -> Self::Scalar;
    /// The domain's unit displacement value.
    fn unit() -> Self;
}

impl AffineValue for f64 {
    type Scalar = f64;

    fn scaled(self, k: f64) -> f64 {
        self * k
    }
    fn divided(self, k: f64) -> f64 {
        self / k
    }
    fn count(n: usize) -> f64 {
        n as f64
    }
    fn unit() -> f64 {
        1.0
    }
}

impl AffineValue for i64 {
    type Scalar = i64;

    fn scaled(self, k: i64) -> i64 {
        self * k
    }
    fn divided(self, k: i64) -> i64 {
        self / k
    }
    fn count(n: usize) -> i64 {
        n as i64
    }
    fn unit() -> i64 {
        1
    }
}

/// A value domain together with the display names of its wrappers.
///
/// Implementors are zero-sized markers; one marker yields exactly one
/// [`Point`]/[`Vector`] pair, so the point↔vector association is fixed at
/// compile time.
pub trait Space: 'static {
    type Value: AffineValue;

    const POINT_NAME: &'static str;
    const VECTOR_NAME: &'static str;
}

/// A location in a space: a pitch, an instant.
pub struct Point<S: Space> {
    value: S::Value,
}

/// A displacement in a space: an interval, a duration.
pub struct Vector<S: Space> {
    value: S::Value,
}

impl<S: Space> Point<S> {
    pub fn new(value: S::Value) -> Self {
        Self { value }
    }

    pub fn value(&self) -> S::Value {
        self.value
    }

    /// The displacement from the space's origin to this point.
    pub fn to_vector(self) -> Vector<S> {
        Vector::new(self.value)
    }
}

impl<S: Space> Vector<S> {
    pub fn new(value: S::Value) -> Self {
        Self { value }
    }

    pub fn value(&self) -> S::Value {
        self.value
    }

    /// The point this displacement reaches from the space's origin.
    pub fn to_point(self) -> Point<S> {
        Point::new(self.value)
    }

    /// The domain's unit displacement.
    pub fn unit() -> Self {
        Self::new(<S::Value as AffineValue>::unit())
    }
}

impl<S: Space> Clone for Point<S> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<S: Space> Copy for Point<S> {}
impl<S: Space> Clone for Vector<S> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<S: Space> Copy for Vector<S> {}

impl<S: Space> fmt::Debug for Point<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", S::POINT_NAME, self.value)
    }
}
impl<S: Space> fmt::Debug for Vector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", S::VECTOR_NAME, self.value)
    }
}

impl<S: Space> PartialEq for Point<S> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
impl<S: Space> Eq for Point<S> where S::Value: Eq {}
impl<S: Space> PartialEq for Vector<S> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
impl<S: Space> Eq for Vector<S> where S::Value: Eq {}

impl<S: Space> Hash for Point<S>
where
    S::Value: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}
impl<S: Space> Hash for Vector<S>
where
    S::Value: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<S: Space> PartialOrd for Point<S>
where
    S::Value: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}
impl<S: Space> Ord for Point<S>
where
    S::Value: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}
impl<S: Space> PartialOrd for Vector<S>
where
    S::Value: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}
impl<S: Space> Ord for Vector<S>
where
    S::Value: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<S: Space> Sub for Point<S> {
    type Output = Vector<S>;

    fn sub(self, rhs: Self) -> Vector<S> {
        Vector::new(self.value - rhs.value)
    }
}

impl<S: Space> Sub<Vector<S>> for Point<S> {
    type Output = Point<S>;

    fn sub(self, rhs: Vector<S>) -> Point<S> {
        Point::new(self.value - rhs.value)
    }
}

impl<S: Space> Add<Vector<S>> for Point<S> {
    type Output = Point<S>;

    fn add(self, rhs: Vector<S>) -> Point<S> {
        Point::new(self.value + rhs.value)
    }
}

impl<S: Space> Add for Vector<S> {
    type Output = Vector<S>;

    fn add(self, rhs: Self) -> Vector<S> {
        Vector::new(self.value + rhs.value)
    }
}

impl<S: Space> Sub for Vector<S> {
    type Output = Vector<S>;

    fn sub(self, rhs: Self) -> Vector<S> {
        Vector::new(self.value - rhs.value)
    }
}

impl<S: Space> Neg for Vector<S> {
    type Output = Vector<S>;

    fn neg(self) -> Vector<S> {
        Vector::new(<S::Value as Zero>::zero() - self.value)
    }
}

impl<S: Space> Zero for Vector<S> {
    fn zero() -> Self {
        Self::new(<S::Value as Zero>::zero())
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

impl<S: Space> Mul<<S::Value as AffineValue>::Scalar> for Vector<S> {
    type Output = Vector<S>;

    fn mul(self, rhs: <S::Value as AffineValue>::Scalar) -> Vector<S> {
        Vector::new(self.value.scaled(rhs))
    }
}

impl<S: Space> Div<<S::Value as AffineValue>::Scalar> for Vector<S> {
    type Output = Vector<S>;

    fn div(self, rhs: <S::Value as AffineValue>::Scalar) -> Vector<S> {
        Vector::new(self.value.divided(rhs))
    }
}

impl<S: Space> Mul<Vector<S>> for i64
where
    S::Value: AffineValue<Scalar = i64>,
{
    type Output = Vector<S>;

    fn mul(self, rhs: Vector<S>) -> Vector<S> {
        rhs * self
    }
}

impl<S: Space> Mul<Vector<S>> for f64
where
    S::Value: AffineValue<Scalar = f64>,
{
    type Output = Vector<S>;

    fn mul(self, rhs: Vector<S>) -> Vector<S> {
        rhs * self
    }
}

// Serialized transparently as the wrapped value.
impl<S: Space> serde::Serialize for Point<S>
where
    S::Value: serde::Serialize,
{
    fn serialize<Ser: serde::Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, S: Space> serde::Deserialize<'de> for Point<S>
where
    S::Value: serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <S::Value as serde::Deserialize>::deserialize(deserializer).map(Self::new)
    }
}

impl<S: Space> serde::Serialize for Vector<S>
where
    S::Value: serde::Serialize,
{
    fn serialize<Ser: serde::Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, S: Space> serde::Deserialize<'de> for Vector<S>
where
    S::Value: serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <S::Value as serde::Deserialize>::deserialize(deserializer).map(Self::new)
    }
}
