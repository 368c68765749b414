//! UserStatusHandler - Per-user participation status query.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::participation::{project_user_status, IntegrityAnomaly, UserSurveyStatus};
use crate::ports::{ResponseRepository, SurveyDefinitionStore};

/// Handler for the "my status" query.
///
/// A pure projection over existing records: no caching, so a submission is
/// visible to the next status query as soon as the repository read reflects
/// the insert.
pub struct UserStatusHandler {
    store: Arc<dyn SurveyDefinitionStore>,
    repository: Arc<dyn ResponseRepository>,
}

impl UserStatusHandler {
    pub fn new(
        store: Arc<dyn SurveyDefinitionStore>,
        repository: Arc<dyn ResponseRepository>,
    ) -> Self {
        Self { store, repository }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<UserSurveyStatus>, DomainError> {
        let (surveys, records) = futures::future::try_join(
            self.store.find_all(),
            self.repository.find_by_user(user_id),
        )
        .await?;

        let projection = project_user_status(&surveys, &records);
        log_anomalies(&projection.anomalies);
        Ok(projection.statuses)
    }
}

/// Orphaned responses are excluded from output, never fatal.
pub(crate) fn log_anomalies(anomalies: &[IntegrityAnomaly]) {
    for anomaly in anomalies {
        tracing::warn!(
            response_id = %anomaly.response_id,
            survey_id = %anomaly.survey_id,
            user_id = %anomaly.user_id,
            "integrity anomaly: response references a survey that no longer resolves"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryResponseRepository, InMemorySurveyStore};
    use crate::application::handlers::response::{SubmitResponseCommand, SubmitResponseHandler};
    use crate::domain::response::AnswerInput;
    use crate::domain::survey::{Question, QuestionType, SurveyDefinition};

    fn survey(title: &str) -> SurveyDefinition {
        SurveyDefinition::new(
            title,
            "",
            vec![Question::new("Q", QuestionType::Text, false).unwrap()],
        )
        .unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn submission_is_visible_to_next_status_query() {
        let store = Arc::new(InMemorySurveyStore::new());
        let repo = Arc::new(InMemoryResponseRepository::new());
        let answered = survey("Answered");
        let pending = survey("Pending");
        store.put(answered.clone());
        store.put(pending.clone());

        let submit = SubmitResponseHandler::new(store.clone(), repo.clone());
        submit
            .handle(SubmitResponseCommand {
                user_id: user("u1"),
                survey_id: answered.id,
                answers: vec![AnswerInput::new(0, "hi")],
            })
            .await
            .unwrap();

        let handler = UserStatusHandler::new(store, repo);
        let statuses = handler.handle(&user("u1")).await.unwrap();

        assert_eq!(statuses.len(), 2);
        let by_id = |id| statuses.iter().find(|s| s.survey_id == id).unwrap();
        assert!(by_id(answered.id).submitted);
        assert!(by_id(answered.id).submitted_at.is_some());
        assert!(!by_id(pending.id).submitted);
    }

    #[tokio::test]
    async fn orphaned_response_is_excluded_not_fatal() {
        let store = Arc::new(InMemorySurveyStore::new());
        let repo = Arc::new(InMemoryResponseRepository::new());
        let doomed = survey("Doomed");
        let kept = survey("Kept");
        store.put(doomed.clone());
        store.put(kept.clone());

        let submit = SubmitResponseHandler::new(store.clone(), repo.clone());
        for s in [&doomed, &kept] {
            submit
                .handle(SubmitResponseCommand {
                    user_id: user("u1"),
                    survey_id: s.id,
                    answers: vec![AnswerInput::new(0, "hi")],
                })
                .await
                .unwrap();
        }
        store.remove(&doomed.id);

        let handler = UserStatusHandler::new(store, repo);
        let statuses = handler.handle(&user("u1")).await.unwrap();
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].survey_id, kept.id);
    }

    #[tokio::test]
    async fn repository_failure_propagates() {
        let store = Arc::new(InMemorySurveyStore::new());
        let repo = Arc::new(InMemoryResponseRepository::new());
        repo.set_failing(true);

        let handler = UserStatusHandler::new(store, repo);
        assert!(handler.handle(&user("u1")).await.is_err());
    }
}
