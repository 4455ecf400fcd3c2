use crate::errors::{AppError, ResultExt};
use crate::models::{HealthProfile, HealthRecord, ScoreResult};
use sqlx::PgPool;
use uuid::Uuid;

/// Default number of history rows returned when the caller gives no limit.
pub const DEFAULT_HISTORY_LIMIT: i64 = 30;
/// Hard cap on history page size.
pub const MAX_HISTORY_LIMIT: i64 = 100;

/// Database storage for analyzed health records.
///
/// Records are keyed by user and timestamp; the engine output has no
/// identity of its own until it lands here.
pub struct HealthRecordStorage {
    pool: PgPool,
}

impl HealthRecordStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `health_data` table and its index if they do not exist.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS health_data (
                id uuid PRIMARY KEY DEFAULT gen_random_uuid(),
                user_id uuid NOT NULL,
                data jsonb NOT NULL,
                analyzed boolean NOT NULL DEFAULT false,
                longevity_score integer,
                health_age integer,
                focus_areas text[],
                insights text,
                created_at timestamptz NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("creating health_data table")?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS health_data_user_id_idx ON health_data(user_id)",
        )
        .execute(&self.pool)
        .await
        .context("creating health_data user index")?;

        Ok(())
    }

    /// Persists one analysis: the submitted profile verbatim plus the
    /// derived score, health age, focus areas, and insights narrative.
    pub async fn insert_analysis(
        &self,
        user_id: Uuid,
        profile: &HealthProfile,
        result: &ScoreResult,
        insights: &str,
    ) -> Result<HealthRecord, AppError> {
        let data = serde_json::to_value(profile)?;

        let record = sqlx::query_as::<_, HealthRecord>(
            r#"
            INSERT INTO health_data
                (user_id, data, analyzed, longevity_score, health_age, focus_areas, insights)
            VALUES ($1, $2, true, $3, $4, $5, $6)
            RETURNING id, user_id, data, analyzed, longevity_score, health_age,
                      focus_areas, insights, created_at
            "#,
        )
        .bind(user_id)
        .bind(data)
        .bind(result.longevity_score as i32)
        .bind(result.health_age.map(|age| age as i32))
        .bind(&result.focus_areas)
        .bind(insights)
        .fetch_one(&self.pool)
        .await
        .context("inserting health record")?;

        tracing::info!(
            "Stored health record {} for user {} (score {})",
            record.id,
            user_id,
            result.longevity_score
        );

        Ok(record)
    }

    /// Most recent records for a user, newest first.
    pub async fn list_history(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<HealthRecord>, AppError> {
        let limit = limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT);

        let records = sqlx::query_as::<_, HealthRecord>(
            r#"
            SELECT id, user_id, data, analyzed, longevity_score, health_age,
                   focus_areas, insights, created_at
            FROM health_data
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("listing health record history")?;

        Ok(records)
    }

    pub async fn get_record(&self, id: Uuid) -> Result<Option<HealthRecord>, AppError> {
        let record = sqlx::query_as::<_, HealthRecord>(
            r#"
            SELECT id, user_id, data, analyzed, longevity_score, health_age,
                   focus_areas, insights, created_at
            FROM health_data
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("fetching health record")?;

        Ok(record)
    }

    /// Deletes a record owned by the given user. Returns false when no such
    /// record exists (or it belongs to someone else).
    pub async fn delete_record(&self, id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let deleted = sqlx::query("DELETE FROM health_data WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .context("deleting health record")?;

        Ok(deleted.rows_affected() > 0)
    }
}
