//! Client for the external text-generation collaborator.
//!
//! The insights narrative comes from an OpenAI-compatible chat-completions
//! endpoint. The scoring engine contributes no text here; the two are
//! combined only in the response payload assembled by the handler.

use crate::config::Config;
use crate::errors::AppError;
use crate::models::HealthProfile;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::time::Duration;

/// Fixed system instruction sent with every completion request.
const SYSTEM_PROMPT: &str = "You are a health expert specializing in longevity \
and preventive medicine. Provide evidence-based, personalized health insights.";

#[derive(Clone)]
pub struct InsightsService {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl InsightsService {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Insights(format!("Failed to create insights client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.openai_base_url.clone(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
        })
    }

    /// Generates a personalized insights narrative for the given profile.
    pub async fn generate(&self, profile: &HealthProfile) -> Result<String, AppError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        tracing::info!("Requesting insights from {} (model {})", url, self.model);

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": render_prompt(profile) },
            ],
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Insights(format!("Insights request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Insights(format!(
                "Insights endpoint returned {}: {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            AppError::Insights(format!("Failed to parse insights response: {}", e))
        })?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                AppError::Insights("Insights endpoint returned no completion".to_string())
            })?;

        tracing::info!("Received insights narrative ({} chars)", text.len());
        Ok(text)
    }
}

/// Renders the profile into the natural-language prompt for the model.
///
/// Absent fields are shown as "not provided" rather than invented defaults,
/// so the model sees the same notion of absence the scoring engine does.
pub fn render_prompt(profile: &HealthProfile) -> String {
    format!(
        "Generate personalized health insights based on the following health data:\n\n\
         Age: {}\n\
         Gender: {}\n\
         Exercise: {} minutes per week\n\
         Sleep: {} hours per night\n\
         Stress Level: {}/10\n\
         Diet Quality: {}/10\n\
         Smoking Status: {}\n\
         Alcohol Consumption: {}\n\
         Blood Pressure: {}/{}\n\n\
         Provide specific, actionable recommendations for improving health and \
         longevity based on this data and recent scientific research. Focus on \
         personalized diet, exercise, sleep, and stress management strategies.",
        num_or_missing(profile.age),
        profile.gender.as_deref().unwrap_or("not provided"),
        num_or_missing(profile.exercise_minutes_per_week),
        num_or_missing(profile.sleep_hours_per_night),
        num_or_missing(profile.stress_level),
        num_or_missing(profile.diet_quality),
        profile
            .smoking_status
            .map(|s| s.as_str())
            .unwrap_or("not provided"),
        profile
            .alcohol_consumption
            .map(|a| a.as_str())
            .unwrap_or("not provided"),
        num_or_missing(profile.blood_pressure_systolic),
        num_or_missing(profile.blood_pressure_diastolic),
    )
}

fn num_or_missing(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "not provided".to_string(),
    }
}

/// Stable fingerprint of a profile, used as the insights cache key.
///
/// Struct field order is fixed, so serializing the profile gives a canonical
/// byte string to hash.
pub fn profile_fingerprint(profile: &HealthProfile) -> Result<String, AppError> {
    let canonical = serde_json::to_vec(profile)?;
    let digest = Sha256::digest(&canonical);
    Ok(hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SmokingStatus;

    #[test]
    fn prompt_shows_absent_fields_as_not_provided() {
        let prompt = render_prompt(&HealthProfile::default());
        assert!(prompt.contains("Age: not provided"));
        assert!(prompt.contains("Smoking Status: not provided"));
        assert!(prompt.contains("Blood Pressure: not provided/not provided"));
    }

    #[test]
    fn prompt_renders_present_fields() {
        let profile = HealthProfile {
            age: Some(40.0),
            gender: Some("female".to_string()),
            exercise_minutes_per_week: Some(150.0),
            smoking_status: Some(SmokingStatus::Never),
            ..Default::default()
        };
        let prompt = render_prompt(&profile);
        assert!(prompt.contains("Age: 40"));
        assert!(prompt.contains("Gender: female"));
        assert!(prompt.contains("Exercise: 150 minutes per week"));
        assert!(prompt.contains("Smoking Status: never"));
    }

    #[test]
    fn fingerprint_is_stable_and_distinguishes_profiles() {
        let a = HealthProfile {
            age: Some(40.0),
            ..Default::default()
        };
        let b = HealthProfile {
            age: Some(41.0),
            ..Default::default()
        };
        assert_eq!(
            profile_fingerprint(&a).unwrap(),
            profile_fingerprint(&a).unwrap()
        );
        assert_ne!(
            profile_fingerprint(&a).unwrap(),
            profile_fingerprint(&b).unwrap()
        );
    }
}
