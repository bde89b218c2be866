//! Activity feed and per-role dashboards.

pub mod dashboard;
pub mod feed;
pub mod impact;

pub use dashboard::{DashboardCounters, DashboardService, DashboardSummary};
pub use feed::{ActivityFeed, ActivityItem, ActivityKind};
pub use impact::{CategoryShare, CityImpact, ImpactReport, MonthlyDonations};
