use async_trait::async_trait;
use thiserror::Error;
use crate::models::{
    MatchStatus, NewProfile, NewTradeMatch, ProfileId, TradeMatch, TradeMatchId, TradeProfile,
    UserType,
};

/// Errors that can occur when reading or writing profiles
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Seed data error: {0}")]
    SeedError(String),
}

/// Storage abstraction for trade profiles and recorded trade matches.
///
/// Listings are returned in ascending id order, which is the encounter order the
/// matcher preserves for equal scores.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, id: ProfileId) -> Result<Option<TradeProfile>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<TradeProfile>, StoreError>;

    async fn list_profiles(&self) -> Result<Vec<TradeProfile>, StoreError>;

    /// Profiles of `user_type`, excluding the profile `exclude`
    async fn list_by_type(
        &self,
        user_type: UserType,
        exclude: ProfileId,
    ) -> Result<Vec<TradeProfile>, StoreError>;

    /// Register a new account. A duplicate e-mail is a `Conflict`.
    async fn create_profile(&self, profile: NewProfile) -> Result<TradeProfile, StoreError>;

    /// Replace a stored profile. An unknown id is `NotFound`.
    async fn update_profile(&self, profile: TradeProfile) -> Result<TradeProfile, StoreError>;

    async fn save_trade_match(&self, trade_match: NewTradeMatch) -> Result<TradeMatch, StoreError>;

    async fn list_trade_matches(&self) -> Result<Vec<TradeMatch>, StoreError>;

    async fn update_match_status(
        &self,
        id: TradeMatchId,
        status: MatchStatus,
    ) -> Result<TradeMatch, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}

/// Status filter for the admin user listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Verified,
    Unverified,
    Active,
    Inactive,
}

impl StatusFilter {
    /// Unknown values fall back to `All`
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("verified") => StatusFilter::Verified,
            Some("unverified") => StatusFilter::Unverified,
            Some("active") => StatusFilter::Active,
            Some("inactive") => StatusFilter::Inactive,
            _ => StatusFilter::All,
        }
    }

    fn accepts(self, profile: &TradeProfile) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Verified => profile.is_verified,
            StatusFilter::Unverified => !profile.is_verified,
            StatusFilter::Active => profile.is_active,
            StatusFilter::Inactive => !profile.is_active,
        }
    }
}

/// Admin user search. Admin accounts are never listed.
#[derive(Debug, Clone, Default)]
pub struct ProfileFilter {
    pub search: Option<String>,
    pub user_type: Option<UserType>,
    pub status: StatusFilter,
}

impl ProfileFilter {
    pub fn matches(&self, profile: &TradeProfile) -> bool {
        if profile.is_admin() {
            return false;
        }

        if let Some(user_type) = self.user_type {
            if profile.user_type != user_type {
                return false;
            }
        }

        if !self.status.accepts(profile) {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                [&profile.company_name, &profile.email, &profile.country]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
            }
        }
    }

    /// Filter and order newest first; profiles without a timestamp sort last
    pub fn apply(&self, profiles: Vec<TradeProfile>) -> Vec<TradeProfile> {
        let mut selected: Vec<TradeProfile> =
            profiles.into_iter().filter(|p| self.matches(p)).collect();
        selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn create_test_profile(id: i64, user_type: UserType, company: &str, country: &str) -> TradeProfile {
        TradeProfile {
            id,
            email: format!("{}@example.com", company.to_lowercase().replace(' ', "")),
            company_name: company.to_string(),
            user_type,
            country: country.to_string(),
            is_verified: id % 2 == 0,
            is_active: true,
            created_at: Some(Utc.with_ymd_and_hms(2025, 1, id as u32, 0, 0, 0).unwrap()),
            business_description: None,
            products_services: None,
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

    fn sample() -> Vec<TradeProfile> {
        vec![
            create_test_profile(1, UserType::Admin, "Platform Admin", "Ghana"),
            create_test_profile(2, UserType::Exporter, "Africa Grains", "Ghana"),
            create_test_profile(3, UserType::Importer, "Continental Food", "Nigeria"),
            create_test_profile(4, UserType::Importer, "Fashion Hub", "Morocco"),
        ]
    }

    #[test]
    fn test_default_filter_excludes_admin_newest_first() {
        let listed = ProfileFilter::default().apply(sample());
        let ids: Vec<i64> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4, 3, 2]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let filter = ProfileFilter {
            search: Some("GHANA".to_string()),
            ..Default::default()
        };
        let ids: Vec<i64> = filter.apply(sample()).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_type_and_status_filters() {
        let filter = ProfileFilter {
            search: None,
            user_type: Some(UserType::Importer),
            status: StatusFilter::Verified,
        };
        let ids: Vec<i64> = filter.apply(sample()).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!(StatusFilter::parse(Some("Inactive")), StatusFilter::Inactive);
        assert_eq!(StatusFilter::parse(Some("all")), StatusFilter::All);
        assert_eq!(StatusFilter::parse(Some("bogus")), StatusFilter::All);
        assert_eq!(StatusFilter::parse(None), StatusFilter::All);
    }
}
