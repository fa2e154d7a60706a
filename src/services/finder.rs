use std::sync::Arc;
use crate::core::{calculate_compatibility, MatchOutcome, Matcher};
use crate::models::{MatchResult, ProfileId};
use crate::services::store::{ProfileStore, StoreError};

/// Loads profiles from a store and runs them through the matcher
#[derive(Clone)]
pub struct MatchFinder {
    store: Arc<dyn ProfileStore>,
    matcher: Matcher,
}

impl MatchFinder {
    pub fn new(store: Arc<dyn ProfileStore>, matcher: Matcher) -> Self {
        Self { store, matcher }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Ranked matches for `subject_id`
    ///
    /// An unknown subject or an admin account yields an empty outcome. Store
    /// failures are propagated.
    pub async fn find_matches(
        &self,
        subject_id: ProfileId,
        limit: usize,
    ) -> Result<MatchOutcome, StoreError> {
        let Some(subject) = self.store.get_profile(subject_id).await? else {
            tracing::debug!("No profile {} to match", subject_id);
            return Ok(MatchOutcome::default());
        };

        let Some(counterpart) = subject.user_type.counterpart() else {
            return Ok(MatchOutcome::default());
        };

        let candidates = self.store.list_by_type(counterpart, subject.id).await?;

        Ok(self.matcher.find_matches(&subject, candidates, limit))
    }

    /// Score one pair. `None` when either profile does not exist.
    pub async fn score_pair(
        &self,
        subject_id: ProfileId,
        candidate_id: ProfileId,
    ) -> Result<Option<MatchResult>, StoreError> {
        let subject = self.store.get_profile(subject_id).await?;
        let candidate = self.store.get_profile(candidate_id).await?;

        let (Some(subject), Some(candidate)) = (subject, candidate) else {
            return Ok(None);
        };

        let compatibility = calculate_compatibility(&subject, &candidate, self.matcher.weights());

        Ok(Some(MatchResult {
            subject_id,
            candidate_id,
            score: compatibility.score,
            reasons: compatibility.reasons,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchReason, TradeProfile, UserType};
    use crate::services::memory::InMemoryProfileStore;

    fn create_test_profile(id: i64, user_type: UserType, country: &str) -> TradeProfile {
        TradeProfile {
            id,
            email: format!("user{}@example.com", id),
            company_name: format!("Company {}", id),
            user_type,
            country: country.to_string(),
            is_verified: true,
            is_active: true,
            created_at: None,
            business_description: None,
            products_services: Some(r#"["agricultural_products"]"#.to_string()),
            annual_volume: None,
            company_size: None,
            certifications: None,
            languages: None,
            preferred_countries: None,
            contact_person: None,
            phone: None,
            website: None,
        }
    }

    fn finder() -> MatchFinder {
        let store = InMemoryProfileStore::from_profiles(vec![
            create_test_profile(1, UserType::Admin, "Ghana"),
            create_test_profile(2, UserType::Exporter, "Ghana"),
            create_test_profile(3, UserType::Importer, "Nigeria"),
            create_test_profile(4, UserType::Importer, "Egypt"),
            create_test_profile(5, UserType::Exporter, "Kenya"),
        ])
        .unwrap();

        MatchFinder::new(Arc::new(store), Matcher::with_default_weights())
    }

    #[tokio::test]
    async fn test_finds_only_counterparts() {
        let outcome = finder().find_matches(2, 10).await.unwrap();

        assert_eq!(outcome.total_candidates, 2);
        // Egypt is a priority market, Nigeria is not
        let ids: Vec<i64> = outcome.matches.iter().map(|m| m.candidate.id).collect();
        assert_eq!(ids, vec![4, 3]);
    }

    #[tokio::test]
    async fn test_unknown_subject_is_empty() {
        let outcome = finder().find_matches(99, 10).await.unwrap();

        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.total_candidates, 0);
    }

    #[tokio::test]
    async fn test_admin_subject_is_empty() {
        let outcome = finder().find_matches(1, 10).await.unwrap();
        assert!(outcome.matches.is_empty());
    }

    #[tokio::test]
    async fn test_score_pair() {
        let finder = finder();

        let result = finder.score_pair(2, 3).await.unwrap().unwrap();
        assert!(result.score > 0.3);
        assert!(result.reasons.contains(&MatchReason::ProductCategoryMatch));

        let same_role = finder.score_pair(2, 5).await.unwrap().unwrap();
        assert_eq!(same_role.score, 0.0);
        assert!(same_role.reasons.is_empty());

        assert!(finder.score_pair(2, 99).await.unwrap().is_none());
    }
}
