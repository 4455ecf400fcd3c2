use crate::circuit_breaker::InsightsCircuitBreaker;
use crate::config::Config;
use crate::errors::AppError;
use crate::insights::{self, InsightsService};
use crate::models::*;
use crate::scoring;
use crate::storage::HealthRecordStorage;
use crate::studies::{self, StudyReference};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use failsafe::CircuitBreaker as _;
use moka::future::Cache;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Application configuration.
    pub config: Config,
    /// Client for the external text-generation service (optional).
    pub insights: Option<InsightsService>,
    /// Cache of insights narratives keyed by profile fingerprint, so an
    /// identical resubmission does not trigger a second model call.
    pub insights_cache: Cache<String, String>,
    /// Circuit breaker guarding the insights service.
    pub insights_breaker: Arc<InsightsCircuitBreaker>,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "vitality-api",
            "version": "0.1.0"
        })),
    )
}

/// POST /api/v1/analyze
///
/// Scores the submitted health profile, asks the external service for a
/// narrative, and persists the analysis when the caller identifies a user
/// via the `X-User-Id` header. Scoring itself cannot fail; any error here
/// comes from the boundary (parsing, the insights call, or the write).
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(profile): Json<HealthProfile>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let user_id = user_id_from_headers(&headers)?;
    tracing::info!("POST /analyze - user: {:?}", user_id);

    let result = scoring::score(&profile);
    tracing::info!(
        "Scored profile: {} (health age: {:?}, focus areas: {})",
        result.longevity_score,
        result.health_age,
        result.focus_areas.len()
    );

    // The score is already computed; only the narrative can still fail.
    let insights_text = fetch_insights(&state, &profile).await?;

    let record_id = match user_id {
        Some(uid) => {
            let storage = HealthRecordStorage::new(state.db.clone());
            let record = storage
                .insert_analysis(uid, &profile, &result, &insights_text)
                .await?;
            Some(record.id)
        }
        None => None,
    };

    Ok(Json(AnalyzeResponse {
        longevity_score: result.longevity_score,
        health_age: result.health_age,
        focus_areas: result.focus_areas,
        insights: insights_text,
        analyzed: true,
        record_id,
    }))
}

/// GET /api/v1/history
///
/// Recent analyses for a user, newest first. Backs the dashboard's history
/// charts.
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<HealthRecord>>, AppError> {
    tracing::info!("GET /history - user: {}", params.user_id);

    let storage = HealthRecordStorage::new(state.db.clone());
    let records = storage.list_history(params.user_id, params.limit).await?;

    Ok(Json(records))
}

/// GET /api/v1/records/:id
pub async fn get_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<HealthRecord>, AppError> {
    tracing::info!("GET /records/{}", id);

    let storage = HealthRecordStorage::new(state.db.clone());
    let record = storage
        .get_record(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Health record {} not found", id)))?;

    Ok(Json(record))
}

/// DELETE /api/v1/records/:id?userId=...
///
/// Only the owning user may delete a record; a mismatched owner looks the
/// same as a missing record.
pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(params): Query<OwnerParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    tracing::info!("DELETE /records/{} - user: {}", id, params.user_id);

    let storage = HealthRecordStorage::new(state.db.clone());
    if !storage.delete_record(id, params.user_id).await? {
        return Err(AppError::NotFound(format!(
            "Health record {} not found",
            id
        )));
    }

    Ok(Json(json!({ "deleted": true })))
}

/// GET /api/v1/studies
///
/// Curated research references, optionally filtered by search text or tag.
pub async fn list_studies(
    Query(params): Query<StudyParams>,
) -> Result<Json<Vec<StudyReference>>, AppError> {
    Ok(Json(studies::search(&params)))
}

/// Extracts the optional `X-User-Id` header. Absent means "score without
/// persisting"; a present but malformed value is the caller's mistake.
fn user_id_from_headers(headers: &HeaderMap) -> Result<Option<Uuid>, AppError> {
    let Some(value) = headers.get("x-user-id") else {
        return Ok(None);
    };

    let raw = value
        .to_str()
        .map_err(|_| AppError::BadRequest("X-User-Id header is not valid UTF-8".to_string()))?;

    let id = Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::BadRequest("X-User-Id must be a valid UUID".to_string()))?;

    Ok(Some(id))
}

/// Resolves the insights narrative: cache first, then the external service
/// behind the circuit breaker.
async fn fetch_insights(
    state: &Arc<AppState>,
    profile: &HealthProfile,
) -> Result<String, AppError> {
    let service = state
        .insights
        .as_ref()
        .ok_or_else(|| AppError::Insights("Insights service not configured".to_string()))?;

    let fingerprint = insights::profile_fingerprint(profile)?;
    if let Some(cached) = state.insights_cache.get(&fingerprint).await {
        tracing::debug!("Insights cache hit for profile {}", &fingerprint[..12]);
        return Ok(cached);
    }

    // The breaker's closure API is synchronous, so drive its state machine
    // around the await by hand: fail fast while open, record the outcome after.
    if !state.insights_breaker.is_call_permitted() {
        return Err(AppError::Insights(
            "Insights service temporarily unavailable (circuit open)".to_string(),
        ));
    }

    let text = match service.generate(profile).await {
        Ok(text) => {
            state.insights_breaker.on_success();
            text
        }
        Err(e) => {
            state.insights_breaker.on_error();
            return Err(e);
        }
    };

    state
        .insights_cache
        .insert(fingerprint, text.clone())
        .await;

    Ok(text)
}
