use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============ Profile Input ============

/// Smoking status reported on a health profile.
///
/// Unrecognized values deserialize to `Other` rather than failing the
/// request; the scoring engine treats `Other` as no signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SmokingStatus {
    Never,
    Former,
    Current,
    Other,
}

impl From<String> for SmokingStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "never" => SmokingStatus::Never,
            "former" => SmokingStatus::Former,
            "current" => SmokingStatus::Current,
            _ => SmokingStatus::Other,
        }
    }
}

impl SmokingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SmokingStatus::Never => "never",
            SmokingStatus::Former => "former",
            SmokingStatus::Current => "current",
            SmokingStatus::Other => "other",
        }
    }
}

/// Self-reported alcohol consumption. Carried through to the insights
/// prompt; no scoring rule reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum AlcoholConsumption {
    None,
    Light,
    Moderate,
    Heavy,
    Other,
}

impl From<String> for AlcoholConsumption {
    fn from(s: String) -> Self {
        match s.as_str() {
            "none" => AlcoholConsumption::None,
            "light" => AlcoholConsumption::Light,
            "moderate" => AlcoholConsumption::Moderate,
            "heavy" => AlcoholConsumption::Heavy,
            _ => AlcoholConsumption::Other,
        }
    }
}

impl AlcoholConsumption {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlcoholConsumption::None => "none",
            AlcoholConsumption::Light => "light",
            AlcoholConsumption::Moderate => "moderate",
            AlcoholConsumption::Heavy => "heavy",
            AlcoholConsumption::Other => "other",
        }
    }
}

/// A health profile as submitted by the client.
///
/// Every field is optional: an absent field contributes no scoring
/// adjustment and must stay distinguishable from a present-but-neutral
/// value. Never substitute sentinel defaults here; any UI-side defaults
/// are the client's concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthProfile {
    // Basic information
    pub age: Option<f64>,
    pub gender: Option<String>,
    /// Height in centimeters.
    pub height: Option<f64>,
    /// Weight in kilograms.
    pub weight: Option<f64>,

    // Vital measurements
    pub blood_pressure_systolic: Option<f64>,
    pub blood_pressure_diastolic: Option<f64>,
    pub cholesterol_total: Option<f64>,
    #[serde(rename = "cholesterolHDL")]
    pub cholesterol_hdl: Option<f64>,
    #[serde(rename = "cholesterolLDL")]
    pub cholesterol_ldl: Option<f64>,
    pub fasting_glucose: Option<f64>,

    // Lifestyle factors
    pub exercise_minutes_per_week: Option<f64>,
    pub sleep_hours_per_night: Option<f64>,
    /// Subjective 1-10 scale.
    pub stress_level: Option<f64>,
    /// Subjective 1-10 scale.
    pub diet_quality: Option<f64>,
    pub smoking_status: Option<SmokingStatus>,
    pub alcohol_consumption: Option<AlcoholConsumption>,

    // Medical history
    pub family_history: Option<Vec<String>>,
    pub existing_conditions: Option<Vec<String>>,
    pub medications: Option<String>,
    pub additional_notes: Option<String>,
}

// ============ Scoring Output ============

/// Result of running the scoring engine over a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Longevity score clamped to [0, 100].
    pub longevity_score: i64,
    /// Estimated biological age, present only when the profile carried an age.
    pub health_age: Option<i64>,
    /// Focus-area labels in evaluation order; may be empty.
    pub focus_areas: Vec<String>,
}

/// Response body for `POST /api/v1/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub longevity_score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_age: Option<i64>,
    pub focus_areas: Vec<String>,
    /// Narrative produced by the external text-generation service.
    pub insights: String,
    pub analyzed: bool,
    /// Identifier of the persisted record, when the caller supplied a user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<Uuid>,
}

// ============ Database Models ============

/// A persisted analysis row in the `health_data` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// Owner of the record.
    pub user_id: Uuid,
    /// The submitted profile, stored verbatim as JSON.
    pub data: serde_json::Value,
    /// Whether the record went through analysis (always true for rows we write).
    pub analyzed: bool,
    pub longevity_score: Option<i32>,
    pub health_age: Option<i32>,
    pub focus_areas: Option<Vec<String>>,
    pub insights: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============ Query Parameters ============

/// Query parameters for `GET /api/v1/history`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryParams {
    pub user_id: Uuid,
    /// Maximum rows to return; defaults to 30, capped at 100.
    pub limit: Option<i64>,
}

/// Query parameters identifying the owner of a record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerParams {
    pub user_id: Uuid,
}

/// Query parameters for `GET /api/v1/studies`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyParams {
    /// Free-text search over title, authors, and tags.
    pub q: Option<String>,
    /// Exact tag filter.
    pub tag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_deserializes_camel_case_fields() {
        let json = serde_json::json!({
            "age": 40,
            "cholesterolHDL": 55.0,
            "cholesterolLDL": 110.0,
            "exerciseMinutesPerWeek": 200,
            "smokingStatus": "never",
            "alcoholConsumption": "light"
        });
        let profile: HealthProfile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.age, Some(40.0));
        assert_eq!(profile.cholesterol_hdl, Some(55.0));
        assert_eq!(profile.cholesterol_ldl, Some(110.0));
        assert_eq!(profile.exercise_minutes_per_week, Some(200.0));
        assert_eq!(profile.smoking_status, Some(SmokingStatus::Never));
        assert_eq!(profile.alcohol_consumption, Some(AlcoholConsumption::Light));
    }

    #[test]
    fn empty_object_is_all_absent() {
        let profile: HealthProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile, HealthProfile::default());
        assert!(profile.age.is_none());
        assert!(profile.smoking_status.is_none());
    }

    #[test]
    fn unknown_enum_values_are_tolerated() {
        let json = serde_json::json!({
            "smokingStatus": "vaping",
            "alcoholConsumption": "socially"
        });
        let profile: HealthProfile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.smoking_status, Some(SmokingStatus::Other));
        assert_eq!(profile.alcohol_consumption, Some(AlcoholConsumption::Other));
    }

    #[test]
    fn analyze_response_omits_absent_health_age() {
        let response = AnalyzeResponse {
            longevity_score: 70,
            health_age: None,
            focus_areas: vec![],
            insights: "ok".to_string(),
            analyzed: true,
            record_id: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("healthAge").is_none());
        assert!(value.get("recordId").is_none());
        assert_eq!(value["analyzed"], serde_json::json!(true));
    }
}
