// Service exports
pub mod analytics;
pub mod finder;
pub mod memory;
pub mod postgres;
pub mod store;

pub use analytics::{analytics_report, platform_metrics, AnalyticsReport, MatchStats, PlatformMetrics};
pub use finder::MatchFinder;
pub use memory::{InMemoryProfileStore, SeedData};
pub use postgres::PostgresProfileStore;
pub use store::{ProfileFilter, ProfileStore, StatusFilter, StoreError};
