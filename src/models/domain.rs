use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub type ProfileId = i64;
pub type TradeMatchId = i64;

/// Trade role of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Importer,
    Exporter,
    Admin,
}

impl UserType {
    /// The role a profile is matched against. Admins have no counterpart.
    pub fn counterpart(self) -> Option<UserType> {
        match self {
            UserType::Importer => Some(UserType::Exporter),
            UserType::Exporter => Some(UserType::Importer),
            UserType::Admin => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserType::Importer => "importer",
            UserType::Exporter => "exporter",
            UserType::Admin => "admin",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "importer" => Ok(UserType::Importer),
            "exporter" => Ok(UserType::Exporter),
            "admin" => Ok(UserType::Admin),
            other => Err(format!("unknown user type '{}'", other)),
        }
    }
}

/// Company size category, ordered from smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanySize {
    Micro,
    Small,
    Medium,
    Large,
    Enterprise,
}

impl CompanySize {
    /// Parse a stored size value. Unknown and blank values yield `None`.
    pub fn parse(raw: Option<&str>) -> Option<CompanySize> {
        match raw?.trim().to_lowercase().as_str() {
            "micro" => Some(CompanySize::Micro),
            "small" => Some(CompanySize::Small),
            "medium" => Some(CompanySize::Medium),
            "large" => Some(CompanySize::Large),
            "enterprise" => Some(CompanySize::Enterprise),
            _ => None,
        }
    }

    /// Ordinal rank from 1 (micro) to 5 (enterprise)
    pub fn rank(self) -> u8 {
        match self {
            CompanySize::Micro => 1,
            CompanySize::Small => 2,
            CompanySize::Medium => 3,
            CompanySize::Large => 4,
            CompanySize::Enterprise => 5,
        }
    }
}

/// A registered trade account with its matchmaking attributes.
///
/// `products_services` and `preferred_countries` hold serialized JSON lists exactly
/// as they are stored; they are parsed on demand by `core::parsing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeProfile {
    pub id: ProfileId,
    pub email: String,
    pub company_name: String,
    pub user_type: UserType,
    pub country: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub business_description: Option<String>,
    #[serde(default)]
    pub products_services: Option<String>,
    #[serde(default)]
    pub annual_volume: Option<String>,
    #[serde(default)]
    pub company_size: Option<String>,
    #[serde(default)]
    pub certifications: Option<String>,
    #[serde(default)]
    pub languages: Option<String>,
    #[serde(default)]
    pub preferred_countries: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

fn default_true() -> bool { true }

impl TradeProfile {
    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }
}

/// Fields supplied when registering a new account
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub email: String,
    pub company_name: String,
    pub user_type: UserType,
    pub country: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
}

impl NewProfile {
    /// Materialize the stored record once the store has assigned an id
    pub fn into_profile(self, id: ProfileId, created_at: chrono::DateTime<chrono::Utc>) -> TradeProfile {
        TradeProfile {
            id,
            email: self.email,
            company_name: self.company_name,
            user_type: self.user_type,
            country: self.country,
            is_verified: false,
            is_active: true,
            created_at: Some(created_at),
            business_description: None,
            products_services: None,
            annual_volume: None,
            company_size: None,
            certifications: None,
            languages: None,
            preferred_countries: None,
            contact_person: self.contact_person,
            phone: self.phone,
            website: None,
        }
    }
}

/// Human-readable justification for a notable sub-score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchReason {
    GeographicAlignment,
    ProductCategoryMatch,
    PriorityMarket,
}

impl MatchReason {
    pub fn message(self) -> &'static str {
        match self {
            MatchReason::GeographicAlignment => "Strong geographic alignment",
            MatchReason::ProductCategoryMatch => "Product category match",
            MatchReason::PriorityMarket => "Both in AfCFTA Guided Trade Initiative",
        }
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for MatchReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Score of one subject/candidate pair, computed on demand and never persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub subject_id: ProfileId,
    pub candidate_id: ProfileId,
    pub score: f64,
    pub reasons: Vec<MatchReason>,
}

impl MatchResult {
    /// Score as shown to users: percent, rounded to one decimal
    pub fn percentage(&self) -> f64 {
        score_percentage(self.score)
    }
}

#[inline]
pub fn score_percentage(score: f64) -> f64 {
    (score * 1000.0).round() / 10.0
}

/// A ranked candidate together with its score
#[derive(Debug, Clone)]
pub struct ScoredMatch {
    pub candidate: TradeProfile,
    pub result: MatchResult,
}

/// Review status of a recorded trade match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Contacted,
    Rejected,
}

impl MatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Contacted => "contacted",
            MatchStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pending" => Ok(MatchStatus::Pending),
            "contacted" => Ok(MatchStatus::Contacted),
            "rejected" => Ok(MatchStatus::Rejected),
            other => Err(format!("unknown match status '{}'", other)),
        }
    }
}

/// Recorded connection between two trade partners, reviewed by admins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeMatch {
    pub id: TradeMatchId,
    pub user1_id: ProfileId,
    pub user2_id: ProfileId,
    pub compatibility_score: f64,
    pub match_reasons: Vec<String>,
    pub status: MatchStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Trade match awaiting an id from the store
#[derive(Debug, Clone)]
pub struct NewTradeMatch {
    pub user1_id: ProfileId,
    pub user2_id: ProfileId,
    pub compatibility_score: f64,
    pub match_reasons: Vec<String>,
}

impl NewTradeMatch {
    pub fn into_match(self, id: TradeMatchId, created_at: chrono::DateTime<chrono::Utc>) -> TradeMatch {
        TradeMatch {
            id,
            user1_id: self.user1_id,
            user2_id: self.user2_id,
            compatibility_score: self.compatibility_score,
            match_reasons: self.match_reasons,
            status: MatchStatus::Pending,
            created_at,
        }
    }
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub geographic: f64,
    pub product: f64,
    pub size: f64,
    pub language: f64,
    pub priority: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            geographic: 0.30,
            product: 0.40,
            size: 0.15,
            language: 0.10,
            priority: 0.05,
        }
    }
}
