//! Analytics domain module.
//!
//! Computes dashboard aggregates: totals, participation rate, recent
//! activity, and the monthly participation trend.

mod metrics;
mod projector;

pub use metrics::{DashboardMetrics, ParticipationTrend, RecentActivity, TrendDataset};
pub use projector::{
    assemble_trend, compute_dashboard_metrics, month_windows, MetricTotals, MonthBucket,
    MonthWindow, RecentCounts, ACTIVE_USER_WINDOW_DAYS, DEFAULT_TREND_MONTHS,
    RECENT_ACTIVITY_DAYS,
};
