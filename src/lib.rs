//! TradeMatch - Business matchmaking for AfCFTA importers and exporters
//!
//! This library provides the compatibility scoring and ranking engine that pairs
//! importers with exporters, together with the profile store, admin analytics and
//! the HTTP surface built on top of it.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod telemetry;

// Re-export commonly used types
pub use crate::core::{calculate_compatibility, Compatibility, MatchOutcome, Matcher};
pub use models::{MatchReason, MatchResult, ScoredMatch, ScoringWeights, TradeProfile, UserType};
pub use services::{InMemoryProfileStore, MatchFinder, ProfileStore, StoreError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::with_default_weights();
        assert_eq!(matcher.weights(), &ScoringWeights::default());
        assert_eq!(matcher.min_score(), crate::core::DEFAULT_MIN_SCORE);
    }
}
