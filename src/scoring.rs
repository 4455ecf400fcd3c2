//! Longevity scoring engine.
//!
//! A pure, total function over an all-optional [`HealthProfile`]: it never
//! fails, performs no I/O, and holds no state, so it is safe to call
//! concurrently from any handler. Absent fields contribute no adjustment;
//! they are not the same as a present neutral value.

use crate::models::{HealthProfile, ScoreResult, SmokingStatus};

/// Neutral baseline every profile starts from.
pub const BASE_SCORE: f64 = 70.0;

/// Floor applied to the estimated biological age.
pub const MIN_HEALTH_AGE: f64 = 20.0;

pub const FOCUS_EXERCISE: &str = "Increase physical activity";
pub const FOCUS_SLEEP: &str = "Improve sleep quality and duration";
pub const FOCUS_STRESS: &str = "Implement stress management techniques";
pub const FOCUS_DIET: &str = "Enhance nutritional quality of diet";
pub const FOCUS_BLOOD_PRESSURE: &str = "Monitor and manage blood pressure";

/// Scores a health profile.
///
/// Adjustments are applied to an accumulator starting at [`BASE_SCORE`], in
/// a fixed order: exercise, sleep, diet quality, smoking, blood pressure.
/// The real-valued accumulator is clamped to [0, 100] and then rounded to
/// produce the final score. Health age is derived only when the profile
/// carries an age; focus areas are evaluated against the raw profile,
/// independent of the accumulator.
pub fn score(profile: &HealthProfile) -> ScoreResult {
    let mut acc = BASE_SCORE;

    if let Some(minutes) = profile.exercise_minutes_per_week {
        if minutes >= 150.0 {
            acc += 5.0;
        } else if minutes >= 75.0 {
            acc += 2.0;
        }
    }

    if let Some(hours) = profile.sleep_hours_per_night {
        if (7.0..=9.0).contains(&hours) {
            acc += 5.0;
        } else if hours < 6.0 || hours > 10.0 {
            acc -= 3.0;
        }
    }

    // A diet quality of 5 is neutral; each point away shifts the score by one.
    if let Some(quality) = profile.diet_quality {
        acc += quality - 5.0;
    }

    match profile.smoking_status {
        Some(SmokingStatus::Current) => acc -= 10.0,
        Some(SmokingStatus::Former) => acc -= 3.0,
        _ => {}
    }

    // Only penalized when both readings are present; a lone systolic or
    // diastolic value is not enough to classify hypertension here.
    if let (Some(systolic), Some(diastolic)) = (
        profile.blood_pressure_systolic,
        profile.blood_pressure_diastolic,
    ) {
        if systolic > 140.0 || diastolic > 90.0 {
            acc -= 5.0;
        }
    }

    // Clamp the real value first, then round once.
    let longevity_score = acc.clamp(0.0, 100.0).round() as i64;

    // Each score point above or below baseline shifts estimated biological
    // age by half a year in the opposite direction, floored at MIN_HEALTH_AGE.
    let health_age = profile.age.map(|age| {
        let estimate = age - (longevity_score as f64 - BASE_SCORE) / 2.0;
        estimate.max(MIN_HEALTH_AGE).round() as i64
    });

    ScoreResult {
        longevity_score,
        health_age,
        focus_areas: focus_areas(profile),
    }
}

/// Derives focus-area labels from the raw profile.
///
/// Rules fire in a fixed order and each yields at most one distinct label,
/// so the output is duplicate-free by construction and may be empty.
pub fn focus_areas(profile: &HealthProfile) -> Vec<String> {
    let mut areas = Vec::new();

    if matches!(profile.exercise_minutes_per_week, Some(m) if m < 150.0) {
        areas.push(FOCUS_EXERCISE.to_string());
    }
    if matches!(profile.sleep_hours_per_night, Some(h) if h < 7.0) {
        areas.push(FOCUS_SLEEP.to_string());
    }
    if matches!(profile.stress_level, Some(s) if s > 6.0) {
        areas.push(FOCUS_STRESS.to_string());
    }
    if matches!(profile.diet_quality, Some(q) if q < 6.0) {
        areas.push(FOCUS_DIET.to_string());
    }
    if matches!(profile.blood_pressure_systolic, Some(bp) if bp > 130.0) {
        areas.push(FOCUS_BLOOD_PRESSURE.to_string());
    }

    areas
}
