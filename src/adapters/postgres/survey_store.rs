//! PostgreSQL implementation of SurveyDefinitionStore.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, SurveyId, Timestamp};
use crate::domain::survey::{Question, SurveyDefinition};
use crate::ports::SurveyDefinitionStore;

/// PostgreSQL implementation of SurveyDefinitionStore.
#[derive(Clone)]
pub struct PostgresSurveyStore {
    pool: PgPool,
}

impl PostgresSurveyStore {
    /// Creates a new PostgresSurveyStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SurveyDefinitionStore for PostgresSurveyStore {
    async fn find_by_id(&self, id: &SurveyId) -> Result<Option<SurveyDefinition>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, questions, active, created_at, due_date
            FROM surveys
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to fetch survey", e))?;

        row.map(|r| row_to_survey(&r)).transpose()
    }

    async fn find_all(&self) -> Result<Vec<SurveyDefinition>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, questions, active, created_at, due_date
            FROM surveys
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to list surveys", e))?;

        rows.iter().map(row_to_survey).collect()
    }

    async fn count_all(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM surveys")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| database_error("Failed to count surveys", e))?;

        let count: i64 = row
            .try_get("count")
            .map_err(|e| database_error("Failed to read survey count", e))?;
        Ok(count as u64)
    }

    async fn count_created_in_window(
        &self,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<u64, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS count
            FROM surveys
            WHERE created_at >= $1 AND created_at < $2
            "#,
        )
        .bind(start.as_datetime())
        .bind(end.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("Failed to count recent surveys", e))?;

        let count: i64 = row
            .try_get("count")
            .map_err(|e| database_error("Failed to read recent survey count", e))?;
        Ok(count as u64)
    }
}

fn row_to_survey(row: &PgRow) -> Result<SurveyDefinition, DomainError> {
    let read = |e: sqlx::Error| database_error("Failed to read survey row", e);

    let id: uuid::Uuid = row.try_get("id").map_err(read)?;
    let title: String = row.try_get("title").map_err(read)?;
    let description: String = row.try_get("description").map_err(read)?;
    let questions_json: String = row.try_get("questions").map_err(read)?;
    let active: bool = row.try_get("active").map_err(read)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(read)?;
    let due_date: Option<DateTime<Utc>> = row.try_get("due_date").map_err(read)?;

    let questions: Vec<Question> = serde_json::from_str(&questions_json).map_err(|e| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Malformed questions payload for survey {}: {}", id, e),
        )
    })?;

    Ok(SurveyDefinition {
        id: SurveyId::from_uuid(id),
        title,
        description,
        questions,
        active,
        created_at: Timestamp::from_datetime(created_at),
        due_date: due_date.map(Timestamp::from_datetime),
    })
}

pub(crate) fn database_error(context: &str, source: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, source))
}
