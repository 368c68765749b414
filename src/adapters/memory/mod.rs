//! In-memory port implementations for testing.
//!
//! Deterministic fakes for both boundary contracts, with failure toggles
//! for exercising error paths. Not for production use: lock operations use
//! `.expect()` and will panic if poisoned.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, ResponseId, SurveyId, Timestamp, UserId,
};
use crate::domain::response::ResponseRecord;
use crate::domain::survey::SurveyDefinition;
use crate::ports::{PagedRecords, ResponseRepository, SurveyDefinitionStore};

fn unavailable(what: &str) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("simulated {} failure", what),
    )
}

/// In-memory survey definition store.
pub struct InMemorySurveyStore {
    surveys: RwLock<Vec<SurveyDefinition>>,
    failing: AtomicBool,
}

impl InMemorySurveyStore {
    pub fn new() -> Self {
        Self {
            surveys: RwLock::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// Adds or replaces a definition (test setup).
    pub fn put(&self, survey: SurveyDefinition) {
        let mut surveys = self
            .surveys
            .write()
            .expect("InMemorySurveyStore: lock poisoned");
        surveys.retain(|s| s.id != survey.id);
        surveys.push(survey);
    }

    /// Removes a definition, leaving any responses orphaned (test setup).
    pub fn remove(&self, id: &SurveyId) {
        self.surveys
            .write()
            .expect("InMemorySurveyStore: lock poisoned")
            .retain(|s| s.id != *id);
    }

    /// When true, every operation fails with a database error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable("survey store"));
        }
        Ok(())
    }

    fn snapshot(&self) -> Vec<SurveyDefinition> {
        self.surveys
            .read()
            .expect("InMemorySurveyStore: lock poisoned")
            .clone()
    }
}

impl Default for InMemorySurveyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SurveyDefinitionStore for InMemorySurveyStore {
    async fn find_by_id(&self, id: &SurveyId) -> Result<Option<SurveyDefinition>, DomainError> {
        self.check()?;
        Ok(self.snapshot().into_iter().find(|s| s.id == *id))
    }

    async fn find_all(&self) -> Result<Vec<SurveyDefinition>, DomainError> {
        self.check()?;
        let mut surveys = self.snapshot();
        surveys.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(surveys)
    }

    async fn count_all(&self) -> Result<u64, DomainError> {
        self.check()?;
        Ok(self.snapshot().len() as u64)
    }

    async fn count_created_in_window(
        &self,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<u64, DomainError> {
        self.check()?;
        Ok(self
            .snapshot()
            .iter()
            .filter(|s| !s.created_at.is_before(start) && s.created_at.is_before(end))
            .count() as u64)
    }
}

/// In-memory response repository.
///
/// Enforces (user, survey) uniqueness on insert the way a production
/// unique constraint would.
pub struct InMemoryResponseRepository {
    records: RwLock<Vec<ResponseRecord>>,
    failing: AtomicBool,
    fail_window_queries: AtomicBool,
    hide_reads: AtomicBool,
}

impl InMemoryResponseRepository {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            failing: AtomicBool::new(false),
            fail_window_queries: AtomicBool::new(false),
            hide_reads: AtomicBool::new(false),
        }
    }

    /// When true, every operation fails with a database error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// When true, only the windowed queries fail. Lets tests degrade trend
    /// buckets while totals still load.
    pub fn set_window_queries_failing(&self, failing: bool) {
        self.fail_window_queries.store(failing, Ordering::SeqCst);
    }

    /// When true, `find_by_user_and_survey` reports nothing, simulating a
    /// concurrent submission racing past the handler's duplicate check.
    pub fn hide_reads(&self, hide: bool) {
        self.hide_reads.store(hide, Ordering::SeqCst);
    }

    /// All stored records (test assertions).
    pub fn records(&self) -> Vec<ResponseRecord> {
        self.snapshot()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable("response repository"));
        }
        Ok(())
    }

    fn check_window(&self) -> Result<(), DomainError> {
        self.check()?;
        if self.fail_window_queries.load(Ordering::SeqCst) {
            return Err(unavailable("windowed query"));
        }
        Ok(())
    }

    fn snapshot(&self) -> Vec<ResponseRecord> {
        self.records
            .read()
            .expect("InMemoryResponseRepository: lock poisoned")
            .clone()
    }
}

impl Default for InMemoryResponseRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResponseRepository for InMemoryResponseRepository {
    async fn insert(&self, record: &ResponseRecord) -> Result<ResponseId, DomainError> {
        self.check()?;
        let mut records = self
            .records
            .write()
            .expect("InMemoryResponseRepository: lock poisoned");
        if records
            .iter()
            .any(|r| r.user_id == record.user_id && r.survey_id == record.survey_id)
        {
            return Err(DomainError::new(
                ErrorCode::DuplicateSubmission,
                format!(
                    "response already exists for user {} and survey {}",
                    record.user_id, record.survey_id
                ),
            ));
        }
        records.push(record.clone());
        Ok(record.id)
    }

    async fn find_by_user_and_survey(
        &self,
        user_id: &UserId,
        survey_id: &SurveyId,
    ) -> Result<Option<ResponseRecord>, DomainError> {
        self.check()?;
        if self.hide_reads.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self
            .snapshot()
            .into_iter()
            .find(|r| r.user_id == *user_id && r.survey_id == *survey_id))
    }

    async fn find_by_survey(
        &self,
        survey_id: &SurveyId,
    ) -> Result<Vec<ResponseRecord>, DomainError> {
        self.check()?;
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|r| r.survey_id == *survey_id)
            .collect())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<ResponseRecord>, DomainError> {
        self.check()?;
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|r| r.user_id == *user_id)
            .collect())
    }

    async fn count_all(&self) -> Result<u64, DomainError> {
        self.check()?;
        Ok(self.snapshot().len() as u64)
    }

    async fn count_by_survey(&self, survey_id: &SurveyId) -> Result<u64, DomainError> {
        self.check()?;
        Ok(self
            .snapshot()
            .iter()
            .filter(|r| r.survey_id == *survey_id)
            .count() as u64)
    }

    async fn distinct_survey_ids_with_responses(&self) -> Result<HashSet<SurveyId>, DomainError> {
        self.check()?;
        Ok(self.snapshot().iter().map(|r| r.survey_id).collect())
    }

    async fn distinct_user_ids_in_window(
        &self,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<HashSet<UserId>, DomainError> {
        self.check_window()?;
        Ok(self
            .snapshot()
            .iter()
            .filter(|r| !r.submitted_at.is_before(start) && r.submitted_at.is_before(end))
            .map(|r| r.user_id.clone())
            .collect())
    }

    async fn count_in_window(
        &self,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<u64, DomainError> {
        self.check_window()?;
        Ok(self
            .snapshot()
            .iter()
            .filter(|r| !r.submitted_at.is_before(start) && r.submitted_at.is_before(end))
            .count() as u64)
    }

    async fn list_page(&self, offset: u64, limit: u64) -> Result<PagedRecords, DomainError> {
        self.check()?;
        let mut records = self.snapshot();
        records.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        let total = records.len() as u64;
        let page = records
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok(PagedRecords {
            records: page,
            total,
        })
    }
}
