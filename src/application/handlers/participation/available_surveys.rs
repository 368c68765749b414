//! AvailableSurveysHandler - Survey listing joined with user status.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::participation::{project_available_surveys, AvailableSurvey};
use crate::ports::{ResponseRepository, SurveyDefinitionStore};

use super::user_status::log_anomalies;

/// Handler for the per-user survey listing.
pub struct AvailableSurveysHandler {
    store: Arc<dyn SurveyDefinitionStore>,
    repository: Arc<dyn ResponseRepository>,
}

impl AvailableSurveysHandler {
    pub fn new(
        store: Arc<dyn SurveyDefinitionStore>,
        repository: Arc<dyn ResponseRepository>,
    ) -> Self {
        Self { store, repository }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<AvailableSurvey>, DomainError> {
        let (surveys, records) = futures::future::try_join(
            self.store.find_all(),
            self.repository.find_by_user(user_id),
        )
        .await?;

        let projection = project_available_surveys(&surveys, &records);
        log_anomalies(&projection.anomalies);
        Ok(projection.surveys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryResponseRepository, InMemorySurveyStore};
    use crate::application::handlers::response::{SubmitResponseCommand, SubmitResponseHandler};
    use crate::domain::participation::ParticipationState;
    use crate::domain::response::AnswerInput;
    use crate::domain::survey::{Question, QuestionType, SurveyDefinition};

    fn survey(title: &str) -> SurveyDefinition {
        SurveyDefinition::new(
            title,
            "A listing test survey",
            vec![
                Question::new("Q1", QuestionType::Text, false).unwrap(),
                Question::new("Q2", QuestionType::Rating, false).unwrap(),
            ],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn listing_carries_definition_fields_and_status() {
        let store = Arc::new(InMemorySurveyStore::new());
        let repo = Arc::new(InMemoryResponseRepository::new());
        let s = survey("Pulse check");
        store.put(s.clone());

        let user = UserId::new("u1").unwrap();
        let submit = SubmitResponseHandler::new(store.clone(), repo.clone());
        submit
            .handle(SubmitResponseCommand {
                user_id: user.clone(),
                survey_id: s.id,
                answers: vec![AnswerInput::new(0, "hello")],
            })
            .await
            .unwrap();

        let handler = AvailableSurveysHandler::new(store, repo);
        let listing = handler.handle(&user).await.unwrap();

        assert_eq!(listing.len(), 1);
        let entry = &listing[0];
        assert_eq!(entry.title, "Pulse check");
        assert_eq!(entry.description, "A listing test survey");
        assert_eq!(entry.question_count, 2);
        assert!(entry.is_active);
        assert_eq!(entry.status, ParticipationState::Submitted);
        assert!(entry.submitted_at.is_some());
    }

    #[tokio::test]
    async fn unanswered_survey_lists_as_pending() {
        let store = Arc::new(InMemorySurveyStore::new());
        let repo = Arc::new(InMemoryResponseRepository::new());
        store.put(survey("Untouched"));

        let handler = AvailableSurveysHandler::new(store, repo);
        let listing = handler.handle(&UserId::new("u1").unwrap()).await.unwrap();

        assert_eq!(listing[0].status, ParticipationState::Pending);
        assert!(listing[0].submitted_at.is_none());
    }
}
