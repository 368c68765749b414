//! Integration tests for the submission and aggregation flow.
//!
//! These tests verify the end-to-end path:
//! 1. SubmitResponseHandler validates answers against the definition and persists
//! 2. Participation handlers project per-user and per-survey status from the stores
//! 3. Analytics handlers compute dashboard metrics and the monthly trend
//! 4. The CSV exporter renders persisted responses for download
//!
//! Uses in-memory implementations to exercise the flow without external dependencies.

use std::collections::HashMap;
use std::sync::Arc;

use pulse_surveys::adapters::export::{write_responses_csv, ExportUser, ResponseExportRow};
use pulse_surveys::adapters::memory::{InMemoryResponseRepository, InMemorySurveyStore};
use pulse_surveys::application::handlers::analytics::{
    DashboardMetricsHandler, ParticipationTrendHandler, TrendQuery,
};
use pulse_surveys::application::handlers::participation::{
    AvailableSurveysHandler, SurveyStatusHandler, UserStatusHandler,
};
use pulse_surveys::application::handlers::response::{
    ListResponsesHandler, ListResponsesQuery, SubmitError, SubmitResponseCommand,
    SubmitResponseHandler,
};
use pulse_surveys::domain::foundation::{ErrorCode, UserId};
use pulse_surveys::domain::participation::ParticipationState;
use pulse_surveys::domain::response::{AnswerInput, AnswerValue, ResponseValidationError};
use pulse_surveys::domain::survey::{Question, QuestionType, SurveyDefinition};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

struct TestApp {
    store: Arc<InMemorySurveyStore>,
    repository: Arc<InMemoryResponseRepository>,
}

impl TestApp {
    fn new() -> Self {
        init_tracing();
        Self {
            store: Arc::new(InMemorySurveyStore::new()),
            repository: Arc::new(InMemoryResponseRepository::new()),
        }
    }

    fn submit_handler(&self) -> SubmitResponseHandler {
        SubmitResponseHandler::new(self.store.clone(), self.repository.clone())
    }

    fn user_status_handler(&self) -> UserStatusHandler {
        UserStatusHandler::new(self.store.clone(), self.repository.clone())
    }

    fn available_surveys_handler(&self) -> AvailableSurveysHandler {
        AvailableSurveysHandler::new(self.store.clone(), self.repository.clone())
    }

    fn survey_status_handler(&self) -> SurveyStatusHandler {
        SurveyStatusHandler::new(self.store.clone(), self.repository.clone())
    }

    fn metrics_handler(&self) -> DashboardMetricsHandler {
        DashboardMetricsHandler::new(self.store.clone(), self.repository.clone())
    }

    fn trend_handler(&self) -> ParticipationTrendHandler {
        ParticipationTrendHandler::new(self.repository.clone())
    }

    fn list_handler(&self) -> ListResponsesHandler {
        ListResponsesHandler::new(self.repository.clone())
    }
}

fn engagement_survey() -> SurveyDefinition {
    SurveyDefinition::new(
        "Quarterly Engagement",
        "How are things going?",
        vec![
            Question::new("Overall satisfaction", QuestionType::Rating, true).unwrap(),
            Question::new(
                "Preferred work mode",
                QuestionType::Choice {
                    options: vec![
                        "Remote".to_string(),
                        "Hybrid".to_string(),
                        "Office".to_string(),
                    ],
                },
                true,
            )
            .unwrap(),
            Question::new("Anything else?", QuestionType::Text, false).unwrap(),
        ],
    )
    .unwrap()
}

fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

fn complete_answers() -> Vec<AnswerInput> {
    vec![
        AnswerInput::new(0, AnswerValue::Number(4.0)),
        AnswerInput::new(1, AnswerValue::Text("Hybrid".to_string())),
        AnswerInput::new(2, AnswerValue::Text("All good".to_string())),
    ]
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn submission_is_visible_across_every_projection() {
    let app = TestApp::new();
    let survey = engagement_survey();
    let survey_id = survey.id;
    app.store.put(survey.clone());

    let record = app
        .submit_handler()
        .handle(SubmitResponseCommand {
            user_id: user("alice"),
            survey_id,
            answers: complete_answers(),
        })
        .await
        .unwrap();
    assert_eq!(record.answers.len(), 3);
    assert_eq!(record.answers[0].value, "4");

    // Per-user status flips to submitted with a timestamp.
    let statuses = app.user_status_handler().handle(&user("alice")).await.unwrap();
    assert_eq!(statuses.len(), 1);
    assert!(statuses[0].submitted);
    assert!(statuses[0].submitted_at.is_some());

    // The listing joins the same state for the requesting user only.
    let listing = app
        .available_surveys_handler()
        .handle(&user("alice"))
        .await
        .unwrap();
    assert_eq!(listing[0].status, ParticipationState::Submitted);
    let other = app
        .available_surveys_handler()
        .handle(&user("bob"))
        .await
        .unwrap();
    assert_eq!(other[0].status, ParticipationState::Pending);

    // Survey-level view names the respondent.
    let participation = app.survey_status_handler().handle(&survey_id).await.unwrap();
    assert_eq!(participation.submitted_count, 1);
    assert_eq!(participation.respondent_user_ids, vec![user("alice")]);

    // Dashboard totals: one survey, one response, full participation.
    let metrics = app.metrics_handler().handle().await.unwrap();
    assert_eq!(metrics.total_surveys, 1);
    assert_eq!(metrics.total_responses, 1);
    assert_eq!(metrics.active_users, 1);
    assert_eq!(metrics.participation_rate.value(), 100.0);
    assert_eq!(metrics.recent_activity.new_responses, 1);

    // The fresh submission lands in the trend's current-month bucket.
    let trend = app.trend_handler().handle(TrendQuery::default()).await.unwrap();
    assert_eq!(trend.months(), 6);
    assert_eq!(trend.datasets[0].data[5], 1);
    assert!(trend.degraded_months.is_empty());
}

#[tokio::test]
async fn duplicate_submission_is_rejected_end_to_end() {
    let app = TestApp::new();
    let survey = engagement_survey();
    let survey_id = survey.id;
    app.store.put(survey);

    let handler = app.submit_handler();
    let cmd = || SubmitResponseCommand {
        user_id: user("alice"),
        survey_id,
        answers: complete_answers(),
    };

    handler.handle(cmd()).await.unwrap();
    let err = handler.handle(cmd()).await.unwrap_err();
    assert!(matches!(err, SubmitError::DuplicateSubmission { .. }));
    assert_eq!(app.repository.records().len(), 1);
}

#[tokio::test]
async fn rejected_submission_leaves_no_record() {
    let app = TestApp::new();
    let survey = engagement_survey();
    let survey_id = survey.id;
    app.store.put(survey);

    // Missing the required choice question.
    let err = app
        .submit_handler()
        .handle(SubmitResponseCommand {
            user_id: user("alice"),
            survey_id,
            answers: vec![AnswerInput::new(0, AnswerValue::Number(5.0))],
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Validation(ResponseValidationError::MissingRequired { .. })
    ));

    // Nothing persisted, status stays pending.
    assert!(app.repository.records().is_empty());
    let statuses = app.user_status_handler().handle(&user("alice")).await.unwrap();
    assert!(!statuses[0].submitted);
}

#[tokio::test]
async fn orphaned_responses_are_excluded_not_fatal() {
    let app = TestApp::new();
    let kept = engagement_survey();
    let removed = engagement_survey();
    let removed_id = removed.id;
    app.store.put(kept.clone());
    app.store.put(removed);

    let handler = app.submit_handler();
    handler
        .handle(SubmitResponseCommand {
            user_id: user("alice"),
            survey_id: kept.id,
            answers: complete_answers(),
        })
        .await
        .unwrap();
    handler
        .handle(SubmitResponseCommand {
            user_id: user("alice"),
            survey_id: removed_id,
            answers: complete_answers(),
        })
        .await
        .unwrap();

    // Definition disappears under its responses.
    app.store.remove(&removed_id);

    let statuses = app.user_status_handler().handle(&user("alice")).await.unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].survey_id, kept.id);

    // Only the surviving pair counts toward participation.
    let metrics = app.metrics_handler().handle().await.unwrap();
    assert_eq!(metrics.total_surveys, 1);
    assert_eq!(metrics.participation_rate.value(), 100.0);
}

#[tokio::test]
async fn trend_buckets_degrade_when_windowed_queries_fail() {
    let app = TestApp::new();
    app.repository.set_window_queries_failing(true);

    let trend = app.trend_handler().handle(TrendQuery::default()).await.unwrap();
    assert_eq!(trend.months(), 6);
    assert_eq!(trend.degraded_months, vec![0, 1, 2, 3, 4, 5]);
    assert!(trend.datasets.iter().all(|d| d.data.iter().all(|&n| n == 0)));
}

#[tokio::test]
async fn metrics_fail_loudly_when_totals_are_unavailable() {
    let app = TestApp::new();
    app.repository.set_failing(true);

    let err = app.metrics_handler().handle().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::UpstreamUnavailable);
}

#[tokio::test]
async fn admin_listing_and_export_render_persisted_responses() {
    let app = TestApp::new();
    let survey = engagement_survey();
    let survey_id = survey.id;
    app.store.put(survey.clone());

    let handler = app.submit_handler();
    for name in ["alice", "bob"] {
        handler
            .handle(SubmitResponseCommand {
                user_id: user(name),
                survey_id,
                answers: complete_answers(),
            })
            .await
            .unwrap();
    }

    let listing = app
        .list_handler()
        .handle(ListResponsesQuery { page: 1, limit: 1 })
        .await
        .unwrap();
    assert_eq!(listing.total, 2);
    assert_eq!(listing.total_pages, 2);
    assert_eq!(listing.records.len(), 1);

    let mut users = HashMap::new();
    users.insert(
        user("alice"),
        ExportUser {
            name: "Alice Ngo".to_string(),
            email: "alice@example.com".to_string(),
        },
    );

    let rows: Vec<_> = app
        .repository
        .records()
        .iter()
        .map(|r| ResponseExportRow::from_record(r, &survey, &users))
        .collect();
    let csv = write_responses_csv(&rows);

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "User,Email,Survey,Submission Date,Answers");
    assert_eq!(lines.len(), 3);
    assert!(csv.contains("Alice Ngo"));
    assert!(csv.contains("alice@example.com"));
    // Unknown user falls back to the raw id with a blank email.
    assert!(lines.iter().any(|l| l.starts_with("bob,,")));
}
