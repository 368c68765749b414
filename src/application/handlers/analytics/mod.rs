//! Dashboard analytics query handlers.

mod dashboard_metrics;
mod participation_trend;

pub use dashboard_metrics::DashboardMetricsHandler;
pub use participation_trend::{ParticipationTrendHandler, TrendQuery};
