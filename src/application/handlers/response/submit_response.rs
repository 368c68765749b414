//! SubmitResponseHandler - Command handler for survey submissions.
//!
//! Composes the full submission flow: fetch definition, validate, check
//! for an existing record, single insert.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, SurveyId, Timestamp, UserId};
use crate::domain::response::{
    validate_answers, AnswerInput, ResponseRecord, ResponseValidationError,
};
use crate::ports::{ResponseRepository, SurveyDefinitionStore};

/// Command to submit one user's answer set for one survey.
#[derive(Debug, Clone)]
pub struct SubmitResponseCommand {
    pub user_id: UserId,
    pub survey_id: SurveyId,
    pub answers: Vec<AnswerInput>,
}

/// Submission failure, classified per the error taxonomy.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Survey absent, inactive, or past its due date.
    #[error("survey not found: {0}")]
    SurveyNotFound(SurveyId),

    #[error(transparent)]
    Validation(#[from] ResponseValidationError),

    /// A record already exists for this (user, survey) pair. Resubmission
    /// is rejected rather than upserted.
    #[error("user {user_id} already submitted a response for survey {survey_id}")]
    DuplicateSubmission {
        user_id: UserId,
        survey_id: SurveyId,
    },

    #[error("repository failure: {0}")]
    Upstream(DomainError),
}

/// Handler for response submission.
pub struct SubmitResponseHandler {
    store: Arc<dyn SurveyDefinitionStore>,
    repository: Arc<dyn ResponseRepository>,
}

impl SubmitResponseHandler {
    pub fn new(
        store: Arc<dyn SurveyDefinitionStore>,
        repository: Arc<dyn ResponseRepository>,
    ) -> Self {
        Self { store, repository }
    }

    pub async fn handle(&self, cmd: SubmitResponseCommand) -> Result<ResponseRecord, SubmitError> {
        // 1. Fetch the definition; closed surveys are invisible to submitters.
        let survey = self
            .store
            .find_by_id(&cmd.survey_id)
            .await
            .map_err(SubmitError::Upstream)?
            .ok_or(SubmitError::SurveyNotFound(cmd.survey_id))?;

        if !survey.is_open(&Timestamp::now()) {
            return Err(SubmitError::SurveyNotFound(cmd.survey_id));
        }

        // 2. Validate into canonical form.
        let validated = validate_answers(&survey, &cmd.answers)?;

        // 3. Reject resubmission. The check-then-insert is racy on its own;
        //    the repository's uniqueness guarantee closes the window.
        let existing = self
            .repository
            .find_by_user_and_survey(&cmd.user_id, &cmd.survey_id)
            .await
            .map_err(SubmitError::Upstream)?;
        if existing.is_some() {
            return Err(SubmitError::DuplicateSubmission {
                user_id: cmd.user_id,
                survey_id: cmd.survey_id,
            });
        }

        // 4. Single insert of the immutable record.
        let record = ResponseRecord::new(cmd.user_id.clone(), cmd.survey_id, validated);
        self.repository.insert(&record).await.map_err(|e| {
            if e.code == ErrorCode::DuplicateSubmission {
                SubmitError::DuplicateSubmission {
                    user_id: cmd.user_id.clone(),
                    survey_id: cmd.survey_id,
                }
            } else {
                SubmitError::Upstream(e)
            }
        })?;

        tracing::info!(
            survey_id = %record.survey_id,
            user_id = %record.user_id,
            answers = record.answers.len(),
            "response submitted"
        );

        Ok(record)
    }
}
