//! Registry of conversion pipelines between concrete pitch types.
//!
//! The registry is an explicit value: construct one (usually via
//! [`crate::domains::standard_registry`]) and pass it by reference to every
//! `convert_to` call. Mutation is expected to happen once, at startup, from a
//! single writer; the registry itself takes no lock.
//!
//! A pipeline of length 1 was registered directly and counts as *explicit*.
//! Longer pipelines are *implicit*: they were synthesized by composing
//! registered converters and may be silently replaced by later
//! registrations, depending on [`RegistrationPolicy`].

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use super::{SpaceError, SpaceResult};

type ErasedFn =
    Arc<dyn Fn(Box<dyn Any>, &'static str) -> SpaceResult<Box<dyn Any>> + Send + Sync>;

#[derive(Clone)]
struct Step {
    apply: ErasedFn,
    to_name: &'static str,
}

impl Step {
    fn of<A, B, F>(f: F) -> Self
    where
        A: 'static,
        B: 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let apply: ErasedFn = Arc::new(move |input, current| {
            let a = input
                .downcast::<A>()
                .map_err(|_| SpaceError::ConverterMismatch {
                    expected: type_name::<A>(),
                    produced: current,
                })?;
            Ok(Box::new(f(*a)) as Box<dyn Any>)
        });
        Self {
            apply,
            to_name: type_name::<B>(),
        }
    }
}

/// An ordered list of conversion functions, composed left to right.
#[derive(Clone)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    fn single(step: Step) -> Self {
        Self { steps: vec![step] }
    }

    fn concat(&self, other: &Pipeline) -> Self {
        let mut steps = self.steps.clone();
        steps.extend(other.steps.iter().cloned());
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// A pipeline of a single registered function, as opposed to one
    /// synthesized by composition.
    pub fn is_explicit(&self) -> bool {
        self.steps.len() == 1
    }

    fn apply_boxed(
        &self,
        mut value: Box<dyn Any>,
        mut current: &'static str,
    ) -> SpaceResult<Box<dyn Any>> {
        for step in &self.steps {
            value = (step.apply)(value, current)?;
            current = step.to_name;
        }
        Ok(value)
    }

    fn output_name(&self) -> &'static str {
        self.steps.last().map(|s| s.to_name).unwrap_or("nothing")
    }
}

/// How a registration treats pipelines that already occupy its slot, and
/// whether it extends the transitive closure.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationPolicy {
    /// `Some(true)` replaces an existing explicit pipeline, `Some(false)`
    /// keeps it; `None` treats the situation as a conflict.
    pub overwrite_explicit: Option<bool>,
    /// Whether an existing implicit pipeline is replaced.
    pub overwrite_implicit: bool,
    /// Whether composed pipelines are synthesized from this registration.
    pub extend_closure: bool,
}

impl Default for RegistrationPolicy {
    fn default() -> Self {
        Self {
            overwrite_explicit: None,
            overwrite_implicit: true,
            extend_closure: true,
        }
    }
}

/// Mapping from source type to target type to conversion pipeline.
///
/// Whenever pipelines `A → B` and `B → C` both exist, registration keeps the
/// closure extended: an `A → C` pipeline is materialized as their
/// concatenation unless a pipeline already occupies that slot.
#[derive(Default)]
pub struct ConverterRegistry {
    table: HashMap<TypeId, HashMap<TypeId, Pipeline>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` as the converter from `A` to `B` under the default
    /// policy: conflict on an existing explicit converter, replace an
    /// implicit one, extend the closure.
    pub fn register<A, B, F>(&mut self, f: F) -> SpaceResult<()>
    where
        A: 'static,
        B: 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        self.register_with::<A, B, F>(f, RegistrationPolicy::default())
    }

    pub fn register_with<A, B, F>(&mut self, f: F, policy: RegistrationPolicy) -> SpaceResult<()>
    where
        A: 'static,
        B: 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let from = TypeId::of::<A>();
        let to = TypeId::of::<B>();
        let step = Step::of(f);

        let install = match self.table.get(&from).and_then(|m| m.get(&to)) {
            None => true,
            Some(existing) if existing.is_explicit() => match policy.overwrite_explicit {
                None => {
                    return Err(SpaceError::ConverterConflict {
                        from: type_name::<A>(),
                        to: type_name::<B>(),
                    })
                }
                Some(overwrite) => overwrite,
            },
            Some(_) => policy.overwrite_implicit,
        };

        if install {
            log::debug!(
                "registering converter {} -> {}",
                type_name::<A>(),
                type_name::<B>()
            );
            self.table
                .entry(from)
                .or_default()
                .insert(to, Pipeline::single(step.clone()));
        }

        if policy.extend_closure {
            self.extend_closure(from, to, &step);
        }
        Ok(())
    }

    /// Synthesize composed pipelines from a snapshot of the current table,
    /// so that additions never feed back into the scan they came from.
    fn extend_closure(&mut self, from: TypeId, to: TypeId, step: &Step) {
        let snapshot: Vec<(TypeId, TypeId, Pipeline)> = self
            .table
            .iter()
            .flat_map(|(x, targets)| {
                targets
                    .iter()
                    .map(move |(y, pipeline)| (*x, *y, pipeline.clone()))
            })
            .collect();

        let single = Pipeline::single(step.clone());
        for (x, y, pipeline) in snapshot {
            // new converter first: from -> to == x -> y
            if to == x && self.slot_is_empty(from, y) {
                log::trace!("synthesizing composed pipeline ({} steps)", 1 + pipeline.len());
                self.table
                    .entry(from)
                    .or_default()
                    .insert(y, single.concat(&pipeline));
            }
            // new converter last: x -> y == from -> to
            if y == from && self.slot_is_empty(x, to) {
                log::trace!("synthesizing composed pipeline ({} steps)", pipeline.len() + 1);
                self.table
                    .entry(x)
                    .or_default()
                    .insert(to, pipeline.concat(&single));
            }
        }
    }

    fn slot_is_empty(&self, from: TypeId, to: TypeId) -> bool {
        self.table
            .get(&from)
            .map_or(true, |targets| !targets.contains_key(&to))
    }

    /// The pipeline from `A` to `B`.
    pub fn get<A: 'static, B: 'static>(&self) -> SpaceResult<&Pipeline> {
        self.table
            .get(&TypeId::of::<A>())
            .ok_or(SpaceError::NoConvertersFrom {
                from: type_name::<A>(),
            })?
            .get(&TypeId::of::<B>())
            .ok_or(SpaceError::NoConverter {
                from: type_name::<A>(),
                to: type_name::<B>(),
            })
    }

    /// All pipelines leaving `A`.
    pub fn get_from<A: 'static>(&self) -> SpaceResult<Vec<&Pipeline>> {
        Ok(self
            .table
            .get(&TypeId::of::<A>())
            .ok_or(SpaceError::NoConvertersFrom {
                from: type_name::<A>(),
            })?
            .values()
            .collect())
    }

    pub fn has_pipeline<A: 'static, B: 'static>(&self) -> bool {
        !self.slot_is_empty(TypeId::of::<A>(), TypeId::of::<B>())
    }

    /// Run the registered pipeline from `A` to `B` on `value`.
    pub fn convert<A: 'static, B: 'static>(&self, value: A) -> SpaceResult<B> {
        let pipeline = self.get::<A, B>()?;
        let out = pipeline.apply_boxed(Box::new(value), type_name::<A>())?;
        out.downcast::<B>()
            .map(|b| *b)
            .map_err(|_| SpaceError::ConverterMismatch {
                expected: type_name::<B>(),
                produced: pipeline.output_name(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_convert() {
        let mut reg = ConverterRegistry::new();
        reg.register(|x: i64| x.to_string()).unwrap();
        assert_eq!(reg.convert::<i64, String>(5).unwrap(), "5");
        assert!(matches!(
            reg.convert::<String, i64>("5".to_string()),
            Err(SpaceError::NoConvertersFrom { .. })
        ));
        assert_eq!(reg.get_from::<i64>().unwrap().len(), 1);
        assert!(matches!(
            reg.get_from::<String>(),
            Err(SpaceError::NoConvertersFrom { .. })
        ));
    }

    #[test]
    fn explicit_conflict_needs_policy() {
        let mut reg = ConverterRegistry::new();
        reg.register(|x: i64| x.to_string()).unwrap();
        assert!(matches!(
            reg.register(|x: i64| format!("{x}!")),
            Err(SpaceError::ConverterConflict { .. })
        ));
        // keep the old one
        reg.register_with(
            |x: i64| format!("{x}!"),
            RegistrationPolicy {
                overwrite_explicit: Some(false),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(reg.convert::<i64, String>(5).unwrap(), "5");
        // replace it
        reg.register_with(
            |x: i64| format!("{x}!"),
            RegistrationPolicy {
                overwrite_explicit: Some(true),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(reg.convert::<i64, String>(5).unwrap(), "5!");
    }

    #[test]
    fn closure_is_extended_in_both_directions() {
        let mut reg = ConverterRegistry::new();
        reg.register(|x: i64| x.to_string()).unwrap();
        reg.register(|s: String| s.len() as u32).unwrap();
        // i64 -> u32 was synthesized
        let composed = reg.get::<i64, u32>().unwrap();
        assert_eq!(composed.len(), 2);
        assert!(!composed.is_explicit());
        assert_eq!(reg.convert::<i64, u32>(123).unwrap(), 3);
    }

    #[test]
    fn no_extension_when_disabled() {
        let mut reg = ConverterRegistry::new();
        reg.register(|x: i64| x.to_string()).unwrap();
        reg.register_with(
            |s: String| s.len() as u32,
            RegistrationPolicy {
                extend_closure: false,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(matches!(
            reg.get::<i64, u32>(),
            Err(SpaceError::NoConverter { .. })
        ));
    }

    #[test]
    fn explicit_wins_over_synthesized() {
        let mut reg = ConverterRegistry::new();
        reg.register(|x: i64| x.to_string()).unwrap();
        reg.register(|s: String| s.len() as u32).unwrap();
        // direct converter replaces the implicit two-step pipeline
        reg.register(|x: i64| (x * 10) as u32).unwrap();
        assert!(reg.get::<i64, u32>().unwrap().is_explicit());
        assert_eq!(reg.convert::<i64, u32>(5).unwrap(), 50);
        // and is now protected from accidental re-registration
        assert!(matches!(
            reg.register(|x: i64| x as u32),
            Err(SpaceError::ConverterConflict { .. })
        ));
    }

    #[test]
    fn pipeline_type_mismatch_is_reported() {
        let mut reg = ConverterRegistry::new();
        reg.register(|x: i64| x.to_string()).unwrap();
        let err = reg.convert::<i64, u32>(5);
        assert!(matches!(err, Err(SpaceError::NoConverter { .. })));
    }
}
