//! ParticipationTrendHandler - Monthly participation trend query.
//!
//! One failed month degrades to a tagged zero bucket and is logged; it
//! never aborts the whole trend and is never backfilled with a plausible
//! non-zero number.

use std::sync::Arc;

use futures::future::try_join;

use crate::domain::analytics::{
    assemble_trend, month_windows, MonthBucket, ParticipationTrend, DEFAULT_TREND_MONTHS,
};
use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::ResponseRepository;

/// Trend query; `months` defaults to six.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendQuery {
    pub months: Option<u32>,
}

/// Handler for the participation trend query.
pub struct ParticipationTrendHandler {
    repository: Arc<dyn ResponseRepository>,
}

impl ParticipationTrendHandler {
    pub fn new(repository: Arc<dyn ResponseRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: TrendQuery) -> Result<ParticipationTrend, DomainError> {
        let months = query.months.unwrap_or(DEFAULT_TREND_MONTHS);
        let windows = month_windows(Timestamp::now(), months);

        let mut buckets = Vec::with_capacity(windows.len());
        for window in &windows {
            let counts = try_join(
                self.repository.count_in_window(&window.start, &window.end),
                self.repository
                    .distinct_user_ids_in_window(&window.start, &window.end),
            )
            .await;

            match counts {
                Ok((responses, respondents)) => buckets.push(MonthBucket {
                    responses,
                    respondents: respondents.len() as u64,
                    degraded: false,
                }),
                Err(e) => {
                    tracing::warn!(
                        month = %window.label,
                        error = %e,
                        "trend bucket degraded to zeros after repository failure"
                    );
                    buckets.push(MonthBucket::degraded());
                }
            }
        }

        Ok(assemble_trend(&windows, &buckets))
    }
}
