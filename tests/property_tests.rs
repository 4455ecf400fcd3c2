/// Property-based tests using proptest
/// Invariants of the scoring engine that must hold for all inputs
use proptest::prelude::*;
use vitality_api::models::{HealthProfile, SmokingStatus};
use vitality_api::scoring::{
    self, focus_areas, score, FOCUS_BLOOD_PRESSURE, FOCUS_DIET, FOCUS_EXERCISE, FOCUS_SLEEP,
    FOCUS_STRESS,
};

fn arb_smoking_status() -> impl Strategy<Value = SmokingStatus> {
    prop::sample::select(vec![
        SmokingStatus::Never,
        SmokingStatus::Former,
        SmokingStatus::Current,
        SmokingStatus::Other,
    ])
}

/// Profiles with plausibly-ranged fields, each independently absent or present.
fn arb_profile() -> impl Strategy<Value = HealthProfile> {
    (
        prop::option::of(18.0..110.0f64),
        prop::option::of(0.0..1200.0f64),
        prop::option::of(0.0..16.0f64),
        prop::option::of(1.0..=10.0f64),
        prop::option::of(1.0..=10.0f64),
        prop::option::of(arb_smoking_status()),
        prop::option::of(80.0..220.0f64),
        prop::option::of(40.0..130.0f64),
    )
        .prop_map(
            |(age, exercise, sleep, stress, diet, smoking, systolic, diastolic)| HealthProfile {
                age,
                exercise_minutes_per_week: exercise,
                sleep_hours_per_night: sleep,
                stress_level: stress,
                diet_quality: diet,
                smoking_status: smoking,
                blood_pressure_systolic: systolic,
                blood_pressure_diastolic: diastolic,
                ..Default::default()
            },
        )
}

// Property: the score is always clamped into [0, 100]
proptest! {
    #[test]
    fn score_always_within_bounds(profile in arb_profile()) {
        let result = score(&profile);
        prop_assert!((0..=100).contains(&result.longevity_score));
    }

    #[test]
    fn score_never_panics_on_wild_numbers(
        diet in -1e6..1e6f64,
        sleep in -100.0..100.0f64,
        exercise in -1e4..1e4f64,
    ) {
        let profile = HealthProfile {
            diet_quality: Some(diet),
            sleep_hours_per_night: Some(sleep),
            exercise_minutes_per_week: Some(exercise),
            ..Default::default()
        };
        let result = score(&profile);
        prop_assert!((0..=100).contains(&result.longevity_score));
    }
}

// Property: health age exists exactly when age was supplied, and respects the floor
proptest! {
    #[test]
    fn health_age_iff_age_supplied(profile in arb_profile()) {
        let result = score(&profile);
        prop_assert_eq!(result.health_age.is_some(), profile.age.is_some());
        if let Some(health_age) = result.health_age {
            prop_assert!(health_age >= 20);
        }
    }
}

// Property: the engine is a pure function
proptest! {
    #[test]
    fn scoring_is_deterministic(profile in arb_profile()) {
        prop_assert_eq!(score(&profile), score(&profile));
    }
}

// Property: focus areas are an ordered, duplicate-free subset of the five labels
proptest! {
    #[test]
    fn focus_areas_are_ordered_subset(profile in arb_profile()) {
        let all_labels = [
            FOCUS_EXERCISE,
            FOCUS_SLEEP,
            FOCUS_STRESS,
            FOCUS_DIET,
            FOCUS_BLOOD_PRESSURE,
        ];
        let areas = focus_areas(&profile);
        prop_assert!(areas.len() <= all_labels.len());

        // Every label is known, and they appear in rule-evaluation order
        let mut last_index = None;
        for label in &areas {
            let index = all_labels
                .iter()
                .position(|known| *known == label.as_str())
                .expect("unknown focus-area label");
            if let Some(last) = last_index {
                prop_assert!(index > last, "labels out of order");
            }
            last_index = Some(index);
        }
    }

    #[test]
    fn focus_areas_match_score_result(profile in arb_profile()) {
        // The standalone derivation and the one embedded in score() agree
        prop_assert_eq!(score(&profile).focus_areas, focus_areas(&profile));
    }
}

// Property: within normal ranges, one extra diet point is one extra score point
proptest! {
    #[test]
    fn diet_quality_is_monotonic(profile in arb_profile(), quality in 1.0..9.0f64) {
        let lower = HealthProfile {
            diet_quality: Some(quality),
            ..profile.clone()
        };
        let higher = HealthProfile {
            diet_quality: Some(quality + 1.0),
            ..profile
        };
        prop_assert_eq!(
            score(&higher).longevity_score,
            score(&lower).longevity_score + 1
        );
    }
}

// Property: an all-absent profile scores exactly the baseline
#[test]
fn baseline_profile_constant() {
    let result = score(&HealthProfile::default());
    assert_eq!(result.longevity_score, scoring::BASE_SCORE as i64);
    assert_eq!(result.health_age, None);
    assert!(result.focus_areas.is_empty());
}
