//! Survey definition store port (read side).
//!
//! Definitions are owned by an external admin workflow; this crate only
//! reads them. Implementations handle the actual storage access.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SurveyId, Timestamp};
use crate::domain::survey::SurveyDefinition;

/// Read-only port for survey schema access.
#[async_trait]
pub trait SurveyDefinitionStore: Send + Sync {
    /// Find a definition by its id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SurveyId) -> Result<Option<SurveyDefinition>, DomainError>;

    /// All known definitions, ordered by creation time descending.
    async fn find_all(&self) -> Result<Vec<SurveyDefinition>, DomainError>;

    /// Total number of definitions.
    async fn count_all(&self) -> Result<u64, DomainError>;

    /// Definitions created within `[start, end)`.
    async fn count_created_in_window(
        &self,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<u64, DomainError>;
}
