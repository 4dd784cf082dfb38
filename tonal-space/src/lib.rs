//! Affine point/vector algebra for musical pitch and time.
//!
//! Pitches and time instants are points of typed spaces, intervals and
//! durations the displacements between them. The generic layer lives in
//! [`spaces`], the concrete value domains (enharmonic, spelled, continuous
//! log-frequency, two flavours of time) in [`domains`], conversion between
//! pitch domains in [`spaces::convert`], and interpolation helpers in
//! [`util`].
//!
//! # Examples
//!
//! ```
//! use tonal_space::domains::{standard_registry, EnharmonicPitch, LogFreqPitch, SpelledPitch};
//!
//! let registry = standard_registry();
//! let a4: EnharmonicPitch = "A4".parse()?;
//! let hz = a4.convert_to::<tonal_space::domains::LogFreq>(&registry)?;
//! assert!((hz.freq() - 440.0).abs() < 1e-9);
//!
//! // the spelled route to log-frequency is composed automatically
//! let spelled_a4: SpelledPitch = "A4".parse()?;
//! let hz: LogFreqPitch = spelled_a4.convert_to(&registry)?;
//! assert!((hz.freq() - 440.0).abs() < 1e-9);
//! # Ok::<(), tonal_space::SpaceError>(())
//! ```

pub mod domains;
pub mod event;
pub mod spaces;
pub mod util;

pub use event::Event;
pub use spaces::convert::{ConverterRegistry, Pipeline, RegistrationPolicy};
pub use spaces::pitch::{IntervalClass, ParsedPitch, PitchClass, PitchSpace};
pub use spaces::time::TimeSpace;
pub use spaces::{AffineValue, Point, Space, SpaceError, SpaceResult, Vector};
pub use util::{chordify, linspace, linspace_with_step, prange, PointRange, StepOps};
