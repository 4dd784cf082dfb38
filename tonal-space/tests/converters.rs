//! Conversion between pitch domains: registered pipelines, closure
//! extension, and the interval route through the pitch side.

use tonal_space::domains::{
    standard_registry, Enharmonic, EnharmonicInterval, EnharmonicIntervalClass, EnharmonicPitch,
    EnharmonicPitchClass, LogFreq, LogFreqPitch, SpelledPitch, SpelledPitchClass,
};
use tonal_space::{
    ConverterRegistry, PitchSpace, Point, RegistrationPolicy, Space, SpaceError, Vector,
};

/// Three toy spaces counting the same pitches at different granularities:
/// semitones, tenths and hundredths of a semitone.
struct Semis;
struct Decis;
struct Centis;

macro_rules! plain_pitch_space {
    ($marker:ident, $point:literal, $vector:literal) => {
        impl Space for $marker {
            type Value = i64;
            const POINT_NAME: &'static str = $point;
            const VECTOR_NAME: &'static str = $vector;
        }
        impl PitchSpace for $marker {
            fn origin() -> i64 {
                0
            }
            fn period() -> Option<i64> {
                None
            }
            fn class_representative(v: i64) -> i64 {
                v
            }
            fn interval_class_representative(v: i64) -> i64 {
                v
            }
        }
    };
}

plain_pitch_space!(Semis, "SemisPitch", "SemisInterval");
plain_pitch_space!(Decis, "DecisPitch", "DecisInterval");
plain_pitch_space!(Centis, "CentisPitch", "CentisInterval");

fn keep_explicit() -> RegistrationPolicy {
    RegistrationPolicy {
        overwrite_explicit: Some(false),
        ..Default::default()
    }
}

#[test]
fn direct_conversion_for_pitches_and_intervals() {
    let mut reg = ConverterRegistry::new();
    reg.register(|p: Point<Decis>| Point::<Semis>::new(p.value() / 10))
        .unwrap();

    let semis = Point::<Semis>::new(5);
    let decis = Point::<Decis>::new(50);
    assert_eq!(decis.convert_to::<Semis>(&reg).unwrap(), semis);

    // intervals go through the pitch side when no interval pipeline exists
    let interval = Vector::<Decis>::new(50);
    assert_eq!(
        interval.convert_to::<Semis>(&reg).unwrap(),
        Vector::<Semis>::new(5)
    );
}

#[test]
fn closure_extension_composes_routes() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut reg = ConverterRegistry::new();
    reg.register(|p: Point<Decis>| Point::<Semis>::new(p.value() / 10))
        .unwrap();

    let semis = Point::<Semis>::new(5);
    let centis = Point::<Centis>::new(500);

    // registered without closure extension: only the direct hop exists
    reg.register_with(
        |p: Point<Centis>| Point::<Decis>::new(p.value() / 10),
        RegistrationPolicy {
            extend_closure: false,
            overwrite_explicit: Some(false),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(
        centis.convert_to::<Decis>(&reg).unwrap(),
        Point::<Decis>::new(50)
    );
    assert!(matches!(
        centis.convert_to::<Semis>(&reg),
        Err(SpaceError::NoConverter { .. })
    ));
    assert!(Vector::<Centis>::new(500).convert_to::<Semis>(&reg).is_err());

    // re-registered with closure extension: the composed route appears
    reg.register_with(
        |p: Point<Centis>| Point::<Decis>::new(p.value() / 10),
        keep_explicit(),
    )
    .unwrap();
    assert_eq!(centis.convert_to::<Semis>(&reg).unwrap(), semis);
    assert_eq!(
        Vector::<Centis>::new(500).convert_to::<Semis>(&reg).unwrap(),
        Vector::<Semis>::new(5)
    );
    assert_eq!(reg.get::<Point<Centis>, Point<Semis>>().unwrap().len(), 2);
}

#[test]
fn direct_converter_replaces_composed_route() {
    let mut reg = ConverterRegistry::new();
    reg.register(|p: Point<Decis>| Point::<Semis>::new(p.value() / 10))
        .unwrap();
    reg.register(|p: Point<Centis>| Point::<Decis>::new(p.value() / 10))
        .unwrap();

    let centis = Point::<Centis>::new(500);
    assert_eq!(centis.convert_to::<Semis>(&reg).unwrap(), Point::new(5));

    // deliberately inconsistent, to show which pipeline runs
    reg.register(|p: Point<Centis>| Point::<Semis>::new(p.value() / 10))
        .unwrap();
    assert!(reg.get::<Point<Centis>, Point<Semis>>().unwrap().is_explicit());
    assert_eq!(centis.convert_to::<Semis>(&reg).unwrap(), Point::new(50));

    // the explicit pipeline is now protected
    assert!(matches!(
        reg.register(|p: Point<Centis>| Point::<Semis>::new(p.value() / 100)),
        Err(SpaceError::ConverterConflict { .. })
    ));
    reg.register_with(
        |p: Point<Centis>| Point::<Semis>::new(p.value() / 100),
        RegistrationPolicy {
            overwrite_explicit: Some(true),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(centis.convert_to::<Semis>(&reg).unwrap(), Point::new(5));
}

#[test]
fn standard_pitch_conversions() {
    let reg = standard_registry();

    let a4: EnharmonicPitch = "A4".parse().unwrap();
    let hz = a4.convert_to::<LogFreq>(&reg).unwrap();
    assert!((hz.freq() - 440.0).abs() < 1e-9);

    let spelled: SpelledPitch = "C#4".parse().unwrap();
    let enharmonic = spelled.convert_to::<Enharmonic>(&reg).unwrap();
    assert_eq!(enharmonic, EnharmonicPitch::new(61));

    // composed spelled -> log-frequency route
    assert_eq!(
        reg.get::<SpelledPitch, LogFreqPitch>().unwrap().len(),
        2
    );
    let via_both = spelled.convert_to::<LogFreq>(&reg).unwrap();
    assert!((via_both.freq() - EnharmonicPitch::new(61).freq()).abs() < 1e-9);

    // nothing is registered in the other direction
    assert!(matches!(
        hz.convert_to::<Enharmonic>(&reg),
        Err(SpaceError::NoConvertersFrom { .. })
    ));
}

#[test]
fn pitch_class_conversion_reduces_the_converted_pitch() {
    let reg = standard_registry();
    let spelled_class: SpelledPitchClass = "C#".parse().unwrap();
    let enharmonic_class = spelled_class.convert_to::<Enharmonic>(&reg).unwrap();
    assert_eq!(enharmonic_class, EnharmonicPitchClass::new(61));
}

#[test]
fn interval_conversion_corrects_for_origins() {
    let reg = standard_registry();
    let ln_2 = std::f64::consts::LN_2;

    // the naive route through the pitch side lands relative to 1 Hz; the
    // origin correction brings it back to a pure ratio
    let octave = EnharmonicInterval::new(12);
    let log_octave = octave.convert_to::<LogFreq>(&reg).unwrap();
    assert!((log_octave.value() - ln_2).abs() < 1e-9);

    let tone = EnharmonicInterval::new(2);
    let log_tone = tone.convert_to::<LogFreq>(&reg).unwrap();
    assert!((log_tone.value() - ln_2 / 6.0).abs() < 1e-9);

    let tone_class = EnharmonicIntervalClass::new(2);
    let log_tone_class = tone_class.convert_to::<LogFreq>(&reg).unwrap();
    assert!((log_tone_class.value() - ln_2 / 6.0).abs() < 1e-9);
}

#[test]
fn class_steps_walk_the_same_circle_in_both_domains() {
    let reg = standard_registry();

    let c4: EnharmonicPitch = "C4".parse().unwrap();
    let d4: EnharmonicPitch = "D4".parse().unwrap();
    let log_c4 = c4.convert_to::<LogFreq>(&reg).unwrap();
    let log_d4 = d4.convert_to::<LogFreq>(&reg).unwrap();

    let step = d4.to_pitch_class() - c4.to_pitch_class();
    let log_step = log_d4.to_pitch_class() - log_c4.to_pitch_class();

    let mut acc = step;
    let mut log_acc = log_step;
    for _ in 0..12 {
        // -0.5 and 0.5 are the same point of the circle, so compare both the
        // position on the circle and the magnitude
        let phase = acc.phase_diff().unwrap();
        let log_phase = log_acc.phase_diff().unwrap();
        let around = (phase.rem_euclid(1.0) - log_phase.rem_euclid(1.0)).abs();
        assert!(around < 1e-9 || (1.0 - around) < 1e-9);
        assert!((phase.abs() - log_phase.abs()).abs() < 1e-9);
        acc = acc + step;
        log_acc = log_acc + log_step;
    }
}

#[test]
fn spelled_intervals_reach_other_domains_through_the_pitch_route() {
    let reg = standard_registry();
    let c4: SpelledPitch = "C4".parse().unwrap();
    let g4: SpelledPitch = "G4".parse().unwrap();
    let fifth = g4 - c4;
    assert_eq!(
        fifth.convert_to::<Enharmonic>(&reg).unwrap(),
        EnharmonicInterval::new(7)
    );
}
