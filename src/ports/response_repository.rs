//! Response repository port (append-only storage of validated records).
//!
//! The engine never implements storage; it composes these primitives. A
//! submission is fetch definition -> validate -> single `insert`. Records
//! are immutable and keyed by a freshly generated id, so no
//! read-modify-write races exist on the record itself.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::foundation::{DomainError, ResponseId, SurveyId, Timestamp, UserId};
use crate::domain::response::ResponseRecord;

/// One page of records with the total count for paging math.
#[derive(Debug, Clone)]
pub struct PagedRecords {
    pub records: Vec<ResponseRecord>,
    pub total: u64,
}

/// Repository port for response record persistence and queries.
#[async_trait]
pub trait ResponseRepository: Send + Sync {
    /// Persist a new record.
    ///
    /// # Errors
    ///
    /// - `DuplicateSubmission` if the backing store enforces (user, survey)
    ///   uniqueness and a record already exists
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, record: &ResponseRecord) -> Result<ResponseId, DomainError>;

    /// The record for one (user, survey) pair, if any.
    async fn find_by_user_and_survey(
        &self,
        user_id: &UserId,
        survey_id: &SurveyId,
    ) -> Result<Option<ResponseRecord>, DomainError>;

    /// All records for one survey.
    async fn find_by_survey(&self, survey_id: &SurveyId)
        -> Result<Vec<ResponseRecord>, DomainError>;

    /// All records submitted by one user.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<ResponseRecord>, DomainError>;

    /// Total number of records.
    async fn count_all(&self) -> Result<u64, DomainError>;

    /// Number of records for one survey.
    async fn count_by_survey(&self, survey_id: &SurveyId) -> Result<u64, DomainError>;

    /// Ids of surveys with at least one response.
    async fn distinct_survey_ids_with_responses(&self) -> Result<HashSet<SurveyId>, DomainError>;

    /// Distinct users who submitted within `[start, end)`.
    async fn distinct_user_ids_in_window(
        &self,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<HashSet<UserId>, DomainError>;

    /// Records submitted within `[start, end)`.
    async fn count_in_window(
        &self,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<u64, DomainError>;

    /// One page of records ordered by submission time descending.
    async fn list_page(&self, offset: u64, limit: u64) -> Result<PagedRecords, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ResponseRepository) {}
    }
}
