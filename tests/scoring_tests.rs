/// Unit tests for the longevity scoring engine
/// Covers the baseline, every adjustment rule, clamping, health age
/// derivation, and focus-area ordering
use vitality_api::models::{HealthProfile, SmokingStatus};
use vitality_api::scoring::{self, score};

#[cfg(test)]
mod score_tests {
    use super::*;

    #[test]
    fn test_empty_profile_is_baseline() {
        let result = score(&HealthProfile::default());
        assert_eq!(result.longevity_score, 70);
        assert_eq!(result.health_age, None);
        assert!(result.focus_areas.is_empty());
    }

    #[test]
    fn test_clamps_to_zero() {
        // Out-of-range diet quality drives the accumulator far below zero;
        // the engine is total over whatever numbers the caller passes.
        let profile = HealthProfile {
            diet_quality: Some(-200.0),
            smoking_status: Some(SmokingStatus::Current),
            ..Default::default()
        };
        assert_eq!(score(&profile).longevity_score, 0);
    }

    #[test]
    fn test_clamps_to_one_hundred() {
        let profile = HealthProfile {
            diet_quality: Some(60.0),
            exercise_minutes_per_week: Some(300.0),
            sleep_hours_per_night: Some(8.0),
            ..Default::default()
        };
        assert_eq!(score(&profile).longevity_score, 100);
    }

    #[test]
    fn test_diet_quality_is_linear() {
        // Holding everything else fixed, each diet point is worth one score
        // point (pre-clamp)
        let mut previous = None;
        for quality in 1..=10 {
            let profile = HealthProfile {
                diet_quality: Some(quality as f64),
                ..Default::default()
            };
            let current = score(&profile).longevity_score;
            if let Some(prev) = previous {
                assert_eq!(current, prev + 1, "quality={}", quality);
            }
            previous = Some(current);
        }
    }

    #[test]
    fn test_current_smoker_dominates() {
        let profile = HealthProfile {
            smoking_status: Some(SmokingStatus::Current),
            ..Default::default()
        };
        assert_eq!(score(&profile).longevity_score, 60);
    }

    #[test]
    fn test_healthy_profile_example() {
        let profile = HealthProfile {
            age: Some(40.0),
            exercise_minutes_per_week: Some(200.0),
            sleep_hours_per_night: Some(8.0),
            diet_quality: Some(8.0),
            smoking_status: Some(SmokingStatus::Never),
            blood_pressure_systolic: Some(118.0),
            blood_pressure_diastolic: Some(76.0),
            ..Default::default()
        };
        let result = score(&profile);
        // 70 + 5 (exercise) + 5 (sleep) + 3 (diet) = 83
        assert_eq!(result.longevity_score, 83);
        // max(20, 40 - (83 - 70) / 2) = 33.5, rounded to 34
        assert_eq!(result.health_age, Some(34));
        assert!(result.focus_areas.is_empty());
    }

    #[test]
    fn test_unhealthy_profile_example() {
        let profile = HealthProfile {
            age: Some(50.0),
            exercise_minutes_per_week: Some(30.0),
            sleep_hours_per_night: Some(5.0),
            stress_level: Some(8.0),
            diet_quality: Some(3.0),
            smoking_status: Some(SmokingStatus::Current),
            blood_pressure_systolic: Some(150.0),
            blood_pressure_diastolic: Some(95.0),
            ..Default::default()
        };
        let result = score(&profile);
        // 70 + 0 - 3 - 2 - 10 - 5 = 50
        assert_eq!(result.longevity_score, 50);
        // max(20, 50 - (50 - 70) / 2) = 60
        assert_eq!(result.health_age, Some(60));
        // All five rules fire, in the fixed evaluation order
        assert_eq!(
            result.focus_areas,
            vec![
                scoring::FOCUS_EXERCISE,
                scoring::FOCUS_SLEEP,
                scoring::FOCUS_STRESS,
                scoring::FOCUS_DIET,
                scoring::FOCUS_BLOOD_PRESSURE,
            ]
        );
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let profile = HealthProfile {
            age: Some(45.0),
            sleep_hours_per_night: Some(6.5),
            diet_quality: Some(7.0),
            ..Default::default()
        };
        assert_eq!(score(&profile), score(&profile));
    }
}

#[cfg(test)]
mod absence_tests {
    use super::*;

    #[test]
    fn test_absent_is_not_neutral_value() {
        // Absent diet quality contributes nothing; a present neutral 5 also
        // contributes nothing to the score but still fires the focus rule
        let absent = HealthProfile::default();
        let neutral = HealthProfile {
            diet_quality: Some(5.0),
            ..Default::default()
        };
        assert_eq!(score(&absent).longevity_score, 70);
        assert_eq!(score(&neutral).longevity_score, 70);

        assert!(score(&absent).focus_areas.is_empty());
        assert_eq!(
            score(&neutral).focus_areas,
            vec![scoring::FOCUS_DIET.to_string()]
        );
    }

    #[test]
    fn test_lone_blood_pressure_reading_is_ignored_by_score() {
        // The score penalty needs both readings; the focus rule only needs
        // systolic
        let profile = HealthProfile {
            blood_pressure_systolic: Some(180.0),
            ..Default::default()
        };
        let result = score(&profile);
        assert_eq!(result.longevity_score, 70);
        assert_eq!(
            result.focus_areas,
            vec![scoring::FOCUS_BLOOD_PRESSURE.to_string()]
        );
    }

    #[test]
    fn test_health_age_never_defaulted() {
        let profile = HealthProfile {
            diet_quality: Some(10.0),
            ..Default::default()
        };
        assert_eq!(score(&profile).health_age, None);
    }
}
