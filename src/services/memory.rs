use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::sync::RwLock;
use crate::models::{
    MatchStatus, NewProfile, NewTradeMatch, ProfileId, TradeMatch, TradeMatchId, TradeProfile,
    UserType,
};
use crate::services::store::{ProfileStore, StoreError};

/// Seed file layout: `{"profiles": [...], "trade_matches": [...]}`
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    pub profiles: Vec<TradeProfile>,
    #[serde(default)]
    pub trade_matches: Vec<TradeMatch>,
}

#[derive(Debug, Default)]
struct Inner {
    profiles: BTreeMap<ProfileId, TradeProfile>,
    trade_matches: BTreeMap<TradeMatchId, TradeMatch>,
}

impl Inner {
    fn next_profile_id(&self) -> ProfileId {
        self.profiles.keys().next_back().map_or(1, |id| id + 1)
    }

    fn next_match_id(&self) -> TradeMatchId {
        self.trade_matches.keys().next_back().map_or(1, |id| id + 1)
    }
}

/// Process-local profile store
///
/// Used for development and tests. State lives behind a single `RwLock`; matching
/// only takes the read side.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    inner: RwLock<Inner>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already materialized records
    pub fn from_seed(seed: SeedData) -> Result<Self, StoreError> {
        let mut inner = Inner::default();

        for profile in seed.profiles {
            if inner.profiles.values().any(|p| p.email.eq_ignore_ascii_case(&profile.email)) {
                return Err(StoreError::SeedError(format!("duplicate email {}", profile.email)));
            }
            if let Some(previous) = inner.profiles.insert(profile.id, profile) {
                return Err(StoreError::SeedError(format!("duplicate profile id {}", previous.id)));
            }
        }

        for trade_match in seed.trade_matches {
            inner.trade_matches.insert(trade_match.id, trade_match);
        }

        Ok(Self { inner: RwLock::new(inner) })
    }

    pub fn from_profiles(profiles: Vec<TradeProfile>) -> Result<Self, StoreError> {
        Self::from_seed(SeedData { profiles, trade_matches: Vec::new() })
    }

    /// Load seed records from a JSON file
    pub async fn from_seed_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::SeedError(format!("{}: {}", path.display(), e)))?;
        let seed: SeedData = serde_json::from_str(&raw)
            .map_err(|e| StoreError::SeedError(format!("{}: {}", path.display(), e)))?;

        tracing::info!(
            "Seeding in-memory store with {} profiles and {} trade matches from {}",
            seed.profiles.len(),
            seed.trade_matches.len(),
            path.display()
        );

        Self::from_seed(seed)
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_profile(&self, id: ProfileId) -> Result<Option<TradeProfile>, StoreError> {
        Ok(self.inner.read().await.profiles.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<TradeProfile>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .profiles
            .values()
            .find(|p| p.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<TradeProfile>, StoreError> {
        Ok(self.inner.read().await.profiles.values().cloned().collect())
    }

    async fn list_by_type(
        &self,
        user_type: UserType,
        exclude: ProfileId,
    ) -> Result<Vec<TradeProfile>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .profiles
            .values()
            .filter(|p| p.user_type == user_type && p.id != exclude)
            .cloned()
            .collect())
    }

    async fn create_profile(&self, profile: NewProfile) -> Result<TradeProfile, StoreError> {
        let mut inner = self.inner.write().await;

        if inner.profiles.values().any(|p| p.email.eq_ignore_ascii_case(&profile.email)) {
            return Err(StoreError::Conflict(format!("email {} already registered", profile.email)));
        }

        let id = inner.next_profile_id();
        let created = profile.into_profile(id, chrono::Utc::now());
        inner.profiles.insert(id, created.clone());

        tracing::debug!("Created profile {} ({})", id, created.user_type);

        Ok(created)
    }

    async fn update_profile(&self, profile: TradeProfile) -> Result<TradeProfile, StoreError> {
        let mut inner = self.inner.write().await;

        match inner.profiles.get_mut(&profile.id) {
            Some(stored) => {
                *stored = profile.clone();
                Ok(profile)
            }
            None => Err(StoreError::NotFound(format!("profile {}", profile.id))),
        }
    }

    async fn save_trade_match(&self, trade_match: NewTradeMatch) -> Result<TradeMatch, StoreError> {
        let mut inner = self.inner.write().await;

        let id = inner.next_match_id();
        let saved = trade_match.into_match(id, chrono::Utc::now());
        inner.trade_matches.insert(id, saved.clone());

        Ok(saved)
    }

    async fn list_trade_matches(&self) -> Result<Vec<TradeMatch>, StoreError> {
        Ok(self.inner.read().await.trade_matches.values().cloned().collect())
    }

    async fn update_match_status(
        &self,
        id: TradeMatchId,
        status: MatchStatus,
    ) -> Result<TradeMatch, StoreError> {
        let mut inner = self.inner.write().await;

        match inner.trade_matches.get_mut(&id) {
            Some(stored) => {
                stored.status = status;
                Ok(stored.clone())
            }
            None => Err(StoreError::NotFound(format!("trade match {}", id))),
        }
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_profile(email: &str, user_type: UserType) -> NewProfile {
        NewProfile {
            email: email.to_string(),
            company_name: "Test Co".to_string(),
            user_type,
            country: "Kenya".to_string(),
            contact_person: None,
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = InMemoryProfileStore::new();

        let created = store
            .create_profile(new_profile("a@example.com", UserType::Exporter))
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert!(created.is_active);
        assert!(!created.is_verified);

        let fetched = store.get_profile(1).await.unwrap();
        assert_eq!(fetched, Some(created));
        assert_eq!(store.get_profile(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = InMemoryProfileStore::new();
        store
            .create_profile(new_profile("a@example.com", UserType::Exporter))
            .await
            .unwrap();

        let result = store
            .create_profile(new_profile("A@Example.com", UserType::Importer))
            .await;

        assert!(matches!(result, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_list_by_type_excludes_subject_in_id_order() {
        let store = InMemoryProfileStore::new();
        for (i, user_type) in [UserType::Importer, UserType::Exporter, UserType::Importer, UserType::Importer]
            .into_iter()
            .enumerate()
        {
            store
                .create_profile(new_profile(&format!("u{}@example.com", i), user_type))
                .await
                .unwrap();
        }

        let importers = store.list_by_type(UserType::Importer, 3).await.unwrap();
        let ids: Vec<i64> = importers.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[tokio::test]
    async fn test_update_unknown_profile() {
        let store = InMemoryProfileStore::new();
        let ghost = new_profile("ghost@example.com", UserType::Importer)
            .into_profile(42, chrono::Utc::now());

        let result = store.update_profile(ghost).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_trade_match_lifecycle() {
        let store = InMemoryProfileStore::new();

        let saved = store
            .save_trade_match(NewTradeMatch {
                user1_id: 1,
                user2_id: 2,
                compatibility_score: 0.8,
                match_reasons: vec!["Product category match".to_string()],
            })
            .await
            .unwrap();
        assert_eq!(saved.status, MatchStatus::Pending);

        let updated = store
            .update_match_status(saved.id, MatchStatus::Contacted)
            .await
            .unwrap();
        assert_eq!(updated.status, MatchStatus::Contacted);

        let missing = store.update_match_status(99, MatchStatus::Rejected).await;
        assert!(matches!(missing, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_seed_rejects_duplicate_ids() {
        let a = new_profile("a@example.com", UserType::Importer).into_profile(1, chrono::Utc::now());
        let b = new_profile("b@example.com", UserType::Exporter).into_profile(1, chrono::Utc::now());

        let result = InMemoryProfileStore::from_profiles(vec![a, b]);
        assert!(matches!(result, Err(StoreError::SeedError(_))));
    }

    #[test]
    fn test_seed_file_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/sample_profiles.json");
        let store = tokio_test::block_on(InMemoryProfileStore::from_seed_file(path)).unwrap();

        let profiles = tokio_test::block_on(store.list_profiles()).unwrap();
        assert_eq!(profiles.len(), 10);
        assert_eq!(profiles.iter().filter(|p| p.is_admin()).count(), 1);
    }
}
