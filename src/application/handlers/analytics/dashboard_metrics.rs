//! DashboardMetricsHandler - Dashboard aggregate query.
//!
//! Failures obtaining the foundational totals are fatal and surface as
//! `UpstreamUnavailable`. Nothing here ever substitutes placeholder numbers
//! for a genuine failure.

use std::sync::Arc;

use futures::future::{try_join, try_join3};

use crate::domain::analytics::{
    compute_dashboard_metrics, DashboardMetrics, MetricTotals, RecentCounts,
    ACTIVE_USER_WINDOW_DAYS, RECENT_ACTIVITY_DAYS,
};
use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::{ResponseRepository, SurveyDefinitionStore};

/// Handler for the dashboard metrics query.
pub struct DashboardMetricsHandler {
    store: Arc<dyn SurveyDefinitionStore>,
    repository: Arc<dyn ResponseRepository>,
}

impl DashboardMetricsHandler {
    pub fn new(
        store: Arc<dyn SurveyDefinitionStore>,
        repository: Arc<dyn ResponseRepository>,
    ) -> Self {
        Self { store, repository }
    }

    pub async fn handle(&self) -> Result<DashboardMetrics, DomainError> {
        let now = Timestamp::now();
        let active_window_start = now.minus_days(ACTIVE_USER_WINDOW_DAYS);
        let recent_window_start = now.minus_days(RECENT_ACTIVITY_DAYS);

        let (total_surveys, total_responses, active_users) = try_join3(
            self.store.count_all(),
            self.repository.count_all(),
            async {
                let users = self
                    .repository
                    .distinct_user_ids_in_window(&active_window_start, &now)
                    .await?;
                Ok::<u64, DomainError>(users.len() as u64)
            },
        )
        .await
        .map_err(fatal)?;

        let (known_surveys, answered_ids) = try_join(
            self.store.find_all(),
            self.repository.distinct_survey_ids_with_responses(),
        )
        .await
        .map_err(fatal)?;

        // Orphaned survey ids are excluded from the rate, not errors.
        let known: std::collections::HashSet<_> = known_surveys.iter().map(|s| s.id).collect();
        let surveys_with_response = answered_ids.iter().filter(|id| known.contains(id)).count();
        let orphaned = answered_ids.len() - surveys_with_response;
        if orphaned > 0 {
            tracing::warn!(
                orphaned,
                "integrity anomaly: responses reference surveys that no longer resolve"
            );
        }

        let (new_surveys, new_responses) = try_join(
            self.store
                .count_created_in_window(&recent_window_start, &now),
            self.repository.count_in_window(&recent_window_start, &now),
        )
        .await
        .map_err(fatal)?;

        Ok(compute_dashboard_metrics(
            MetricTotals {
                total_surveys,
                total_responses,
                active_users,
                surveys_with_response: surveys_with_response as u64,
            },
            RecentCounts {
                new_surveys,
                new_responses,
            },
        ))
    }
}

fn fatal(source: DomainError) -> DomainError {
    DomainError::upstream("failed to compute dashboard metrics")
        .with_detail("source", source.to_string())
}
