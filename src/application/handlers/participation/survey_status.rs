//! SurveyStatusHandler - Survey-level participation summary.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, SurveyId};
use crate::domain::participation::{project_survey_participation, SurveyParticipation};
use crate::ports::{ResponseRepository, SurveyDefinitionStore};

/// Handler for the per-survey participation summary.
pub struct SurveyStatusHandler {
    store: Arc<dyn SurveyDefinitionStore>,
    repository: Arc<dyn ResponseRepository>,
}

impl SurveyStatusHandler {
    pub fn new(
        store: Arc<dyn SurveyDefinitionStore>,
        repository: Arc<dyn ResponseRepository>,
    ) -> Self {
        Self { store, repository }
    }

    pub async fn handle(&self, survey_id: &SurveyId) -> Result<SurveyParticipation, DomainError> {
        if self.store.find_by_id(survey_id).await?.is_none() {
            return Err(DomainError::new(
                ErrorCode::SurveyNotFound,
                format!("Survey not found: {}", survey_id),
            ));
        }

        let records = self.repository.find_by_survey(survey_id).await?;
        Ok(project_survey_participation(&records))
    }
}
