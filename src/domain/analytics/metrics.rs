//! Dashboard metric types.
//!
//! JSON-serializable structures handed to the dashboard: plain numbers and
//! strings, no references back into the domain.

use serde::Serialize;

use crate::domain::foundation::ParticipationRate;

/// Top-level dashboard aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_surveys: u64,
    pub total_responses: u64,
    pub active_users: u64,
    /// Share of surveys with at least one response, 0.0 when no surveys.
    pub participation_rate: ParticipationRate,
    pub recent_activity: RecentActivity,
}

/// Counts over the trailing 7-day window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub new_surveys: u64,
    pub new_responses: u64,
    /// Capacity-style estimate: `max(0, surveys * active users - responses)`.
    /// Assumes every user owes every survey one response, so treat it as a
    /// rough backlog indicator, not an exact count.
    pub pending_responses: u64,
}

/// One labeled series of the participation trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendDataset {
    pub label: String,
    pub data: Vec<u64>,
}

/// Monthly participation trend, oldest bucket first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationTrend {
    pub labels: Vec<String>,
    pub datasets: Vec<TrendDataset>,
    /// Indices of buckets that degraded to zeros after a computation
    /// failure. Degraded output is tagged, never passed off as computed.
    pub degraded_months: Vec<usize>,
}

impl ParticipationTrend {
    /// Number of month buckets.
    pub fn months(&self) -> usize {
        self.labels.len()
    }
}
