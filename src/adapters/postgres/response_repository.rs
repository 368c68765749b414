//! PostgreSQL implementation of ResponseRepository.
//!
//! The `responses` table carries a unique constraint on (user_id,
//! survey_id); the insert maps that violation to `DuplicateSubmission`,
//! which closes the submit handler's check-then-insert race.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::HashSet;

use crate::domain::foundation::{
    DomainError, ErrorCode, ResponseId, SurveyId, Timestamp, UserId,
};
use crate::domain::response::{Answer, ResponseRecord};
use crate::ports::{PagedRecords, ResponseRepository};

use super::survey_store::database_error;

/// PostgreSQL implementation of ResponseRepository.
#[derive(Clone)]
pub struct PostgresResponseRepository {
    pool: PgPool,
}

impl PostgresResponseRepository {
    /// Creates a new PostgresResponseRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResponseRepository for PostgresResponseRepository {
    async fn insert(&self, record: &ResponseRecord) -> Result<ResponseId, DomainError> {
        let answers_json = serde_json::to_string(&record.answers).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize answers: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO responses (id, user_id, survey_id, answers, submitted_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.user_id.as_str())
        .bind(record.survey_id.as_uuid())
        .bind(&answers_json)
        .bind(record.submitted_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::new(
                ErrorCode::DuplicateSubmission,
                format!(
                    "Response already exists for user {} and survey {}",
                    record.user_id, record.survey_id
                ),
            ),
            _ => database_error("Failed to insert response", e),
        })?;

        Ok(record.id)
    }

    async fn find_by_user_and_survey(
        &self,
        user_id: &UserId,
        survey_id: &SurveyId,
    ) -> Result<Option<ResponseRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, survey_id, answers, submitted_at
            FROM responses
            WHERE user_id = $1 AND survey_id = $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(survey_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to fetch response", e))?;

        row.map(|r| row_to_record(&r)).transpose()
    }

    async fn find_by_survey(
        &self,
        survey_id: &SurveyId,
    ) -> Result<Vec<ResponseRecord>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, survey_id, answers, submitted_at
            FROM responses
            WHERE survey_id = $1
            ORDER BY submitted_at DESC
            "#,
        )
        .bind(survey_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to list responses for survey", e))?;

        rows.iter().map(row_to_record).collect()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<ResponseRecord>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, survey_id, answers, submitted_at
            FROM responses
            WHERE user_id = $1
            ORDER BY submitted_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to list responses for user", e))?;

        rows.iter().map(row_to_record).collect()
    }

    async fn count_all(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM responses")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| database_error("Failed to count responses", e))?;
        read_count(&row)
    }

    async fn count_by_survey(&self, survey_id: &SurveyId) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM responses WHERE survey_id = $1")
            .bind(survey_id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| database_error("Failed to count responses for survey", e))?;
        read_count(&row)
    }

    async fn distinct_survey_ids_with_responses(&self) -> Result<HashSet<SurveyId>, DomainError> {
        let rows = sqlx::query("SELECT DISTINCT survey_id FROM responses")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("Failed to list answered surveys", e))?;

        rows.iter()
            .map(|r| {
                let id: uuid::Uuid = r
                    .try_get("survey_id")
                    .map_err(|e| database_error("Failed to read survey id", e))?;
                Ok(SurveyId::from_uuid(id))
            })
            .collect()
    }

    async fn distinct_user_ids_in_window(
        &self,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<HashSet<UserId>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT user_id
            FROM responses
            WHERE submitted_at >= $1 AND submitted_at < $2
            "#,
        )
        .bind(start.as_datetime())
        .bind(end.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to list respondents in window", e))?;

        rows.iter()
            .map(|r| {
                let id: String = r
                    .try_get("user_id")
                    .map_err(|e| database_error("Failed to read user id", e))?;
                UserId::new(id).map_err(|e| {
                    DomainError::new(
                        ErrorCode::InternalError,
                        format!("Malformed user id in responses: {}", e),
                    )
                })
            })
            .collect()
    }

    async fn count_in_window(
        &self,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<u64, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS count
            FROM responses
            WHERE submitted_at >= $1 AND submitted_at < $2
            "#,
        )
        .bind(start.as_datetime())
        .bind(end.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("Failed to count responses in window", e))?;
        read_count(&row)
    }

    async fn list_page(&self, offset: u64, limit: u64) -> Result<PagedRecords, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, survey_id, answers, submitted_at
            FROM responses
            ORDER BY submitted_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to page responses", e))?;

        let records: Result<Vec<_>, _> = rows.iter().map(row_to_record).collect();
        let total = self.count_all().await?;

        Ok(PagedRecords {
            records: records?,
            total,
        })
    }
}

fn read_count(row: &PgRow) -> Result<u64, DomainError> {
    let count: i64 = row
        .try_get("count")
        .map_err(|e| database_error("Failed to read count", e))?;
    Ok(count as u64)
}

fn row_to_record(row: &PgRow) -> Result<ResponseRecord, DomainError> {
    let read = |e: sqlx::Error| database_error("Failed to read response row", e);

    let id: uuid::Uuid = row.try_get("id").map_err(read)?;
    let user_id: String = row.try_get("user_id").map_err(read)?;
    let survey_id: uuid::Uuid = row.try_get("survey_id").map_err(read)?;
    let answers_json: String = row.try_get("answers").map_err(read)?;
    let submitted_at: DateTime<Utc> = row.try_get("submitted_at").map_err(read)?;

    let answers: Vec<Answer> = serde_json::from_str(&answers_json).map_err(|e| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Malformed answers payload for response {}: {}", id, e),
        )
    })?;
    let user_id = UserId::new(user_id).map_err(|e| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Malformed user id for response {}: {}", id, e),
        )
    })?;

    Ok(ResponseRecord::from_parts(
        ResponseId::from_uuid(id),
        user_id,
        SurveyId::from_uuid(survey_id),
        answers,
        Timestamp::from_datetime(submitted_at),
    ))
}
