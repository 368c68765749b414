//! Pure computation of dashboard aggregates.
//!
//! Handlers fetch the raw counts through ports; everything in this module
//! is arithmetic over those counts and calendar bucketing.

use crate::domain::analytics::{
    DashboardMetrics, ParticipationTrend, RecentActivity, TrendDataset,
};
use crate::domain::foundation::{ParticipationRate, Timestamp};

/// Trailing window for the "recent activity" block.
pub const RECENT_ACTIVITY_DAYS: i64 = 7;

/// Trailing window defining an "active" user.
pub const ACTIVE_USER_WINDOW_DAYS: i64 = 30;

/// Default number of months in the participation trend.
pub const DEFAULT_TREND_MONTHS: u32 = 6;

/// Foundational totals obtained from the store and repository.
#[derive(Debug, Clone, Copy)]
pub struct MetricTotals {
    pub total_surveys: u64,
    pub total_responses: u64,
    pub active_users: u64,
    /// Surveys with at least one response that still resolve in the
    /// definition store.
    pub surveys_with_response: u64,
}

/// Trailing-window counts for the recent activity block.
#[derive(Debug, Clone, Copy)]
pub struct RecentCounts {
    pub new_surveys: u64,
    pub new_responses: u64,
}

/// Combines totals and recent counts into the dashboard metrics payload.
pub fn compute_dashboard_metrics(totals: MetricTotals, recent: RecentCounts) -> DashboardMetrics {
    let capacity = totals.total_surveys * totals.active_users;
    let pending_responses = capacity.saturating_sub(totals.total_responses);

    DashboardMetrics {
        total_surveys: totals.total_surveys,
        total_responses: totals.total_responses,
        active_users: totals.active_users,
        participation_rate: ParticipationRate::from_counts(
            totals.surveys_with_response,
            totals.total_surveys,
        ),
        recent_activity: RecentActivity {
            new_surveys: recent.new_surveys,
            new_responses: recent.new_responses,
            pending_responses,
        },
    }
}

/// One calendar-month window, half-open `[start, end)`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthWindow {
    pub start: Timestamp,
    pub end: Timestamp,
    pub label: String,
}

/// Consecutive calendar-month windows ending at `now`'s month, oldest first.
///
/// Always returns exactly `months` windows (minimum one).
pub fn month_windows(now: Timestamp, months: u32) -> Vec<MonthWindow> {
    let months = months.max(1);
    (0..months)
        .rev()
        .map(|back| {
            let start = now.start_of_month_back(back);
            let end = if back == 0 {
                // Current month's window closes at the start of next month
                // so submissions up to `now` are included.
                start.start_of_next_month()
            } else {
                now.start_of_month_back(back - 1)
            };
            MonthWindow {
                label: start.month_label(),
                start,
                end,
            }
        })
        .collect()
}

/// Per-window counts, possibly degraded after a repository failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBucket {
    pub responses: u64,
    pub respondents: u64,
    pub degraded: bool,
}

impl MonthBucket {
    /// The neutral value a failed bucket degrades to.
    pub fn degraded() -> Self {
        Self {
            responses: 0,
            respondents: 0,
            degraded: true,
        }
    }
}

/// Assembles labeled trend series from per-window buckets.
pub fn assemble_trend(windows: &[MonthWindow], buckets: &[MonthBucket]) -> ParticipationTrend {
    debug_assert_eq!(windows.len(), buckets.len());

    ParticipationTrend {
        labels: windows.iter().map(|w| w.label.clone()).collect(),
        datasets: vec![
            TrendDataset {
                label: "Responses".to_string(),
                data: buckets.iter().map(|b| b.responses).collect(),
            },
            TrendDataset {
                label: "Respondents".to_string(),
                data: buckets.iter().map(|b| b.respondents).collect(),
            },
        ],
        degraded_months: buckets
            .iter()
            .enumerate()
            .filter(|(_, b)| b.degraded)
            .map(|(i, _)| i)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ts(y: i32, m: u32, d: u32) -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap())
    }

    #[test]
    fn participation_rate_is_zero_without_surveys() {
        let metrics = compute_dashboard_metrics(
            MetricTotals {
                total_surveys: 0,
                total_responses: 0,
                active_users: 0,
                surveys_with_response: 0,
            },
            RecentCounts {
                new_surveys: 0,
                new_responses: 0,
            },
        );
        assert_eq!(metrics.participation_rate.value(), 0.0);
    }

    #[test]
    fn participation_rate_three_of_five_is_sixty() {
        let metrics = compute_dashboard_metrics(
            MetricTotals {
                total_surveys: 5,
                total_responses: 12,
                active_users: 4,
                surveys_with_response: 3,
            },
            RecentCounts {
                new_surveys: 1,
                new_responses: 2,
            },
        );
        assert_eq!(metrics.participation_rate.value(), 60.0);
    }

    #[test]
    fn pending_responses_is_capacity_minus_responses() {
        let metrics = compute_dashboard_metrics(
            MetricTotals {
                total_surveys: 5,
                total_responses: 12,
                active_users: 4,
                surveys_with_response: 3,
            },
            RecentCounts {
                new_surveys: 0,
                new_responses: 0,
            },
        );
        // 5 surveys * 4 users - 12 responses
        assert_eq!(metrics.recent_activity.pending_responses, 8);
    }

    #[test]
    fn pending_responses_clamps_at_zero() {
        let metrics = compute_dashboard_metrics(
            MetricTotals {
                total_surveys: 1,
                total_responses: 10,
                active_users: 2,
                surveys_with_response: 1,
            },
            RecentCounts {
                new_surveys: 0,
                new_responses: 0,
            },
        );
        assert_eq!(metrics.recent_activity.pending_responses, 0);
    }

    #[test]
    fn month_windows_returns_exactly_n_oldest_first() {
        let windows = month_windows(ts(2026, 8, 25), 6);
        assert_eq!(windows.len(), 6);
        assert_eq!(windows[0].label, "Mar 2026");
        assert_eq!(windows[5].label, "Aug 2026");
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn month_windows_cross_year_boundary() {
        let windows = month_windows(ts(2026, 2, 10), 6);
        assert_eq!(windows[0].label, "Sep 2025");
        assert_eq!(windows[5].label, "Feb 2026");
    }

    #[test]
    fn current_month_window_contains_now() {
        let now = ts(2026, 8, 25);
        let windows = month_windows(now, 6);
        let last = windows.last().unwrap();
        assert!(!now.is_before(&last.start));
        assert!(now.is_before(&last.end));
    }

    #[test]
    fn windows_cover_full_range_without_gaps() {
        // Sum-over-buckets equals count-over-full-range only if the windows
        // tile the range exactly.
        let windows = month_windows(ts(2026, 1, 31), 12);
        assert_eq!(windows.len(), 12);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn assemble_trend_tags_degraded_buckets() {
        let windows = month_windows(ts(2026, 8, 25), 3);
        let buckets = vec![
            MonthBucket {
                responses: 4,
                respondents: 2,
                degraded: false,
            },
            MonthBucket::degraded(),
            MonthBucket {
                responses: 7,
                respondents: 3,
                degraded: false,
            },
        ];

        let trend = assemble_trend(&windows, &buckets);
        assert_eq!(trend.months(), 3);
        assert_eq!(trend.datasets[0].data, vec![4, 0, 7]);
        assert_eq!(trend.datasets[1].data, vec![2, 0, 3]);
        assert_eq!(trend.degraded_months, vec![1]);
    }
}
