use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{MatchStatus, ProfileId, UserType};

/// Request to find matches
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: ProfileId,
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Query string for `GET /profiles/{id}/matches`
#[derive(Debug, Clone, Deserialize)]
pub struct MatchesQuery {
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to record a connection with a ranked candidate
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConnectRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: ProfileId,
    #[validate(range(min = 1))]
    #[serde(alias = "candidate_id", rename = "candidateId")]
    pub candidate_id: ProfileId,
}

/// Account registration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub company_name: String,
    pub user_type: UserType,
    #[validate(length(min = 1, max = 100))]
    pub country: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub contact_person: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub phone: Option<String>,
}

/// Trade profile update. List fields arrive as arrays and are stored serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub business_description: Option<String>,
    #[serde(default)]
    pub products_services: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub annual_volume: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub company_size: Option<String>,
    #[serde(default)]
    pub certifications: Option<String>,
    #[serde(default)]
    pub languages: Option<String>,
    #[serde(default)]
    pub preferred_countries: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub website: Option<String>,
}

/// Admin moderation actions on an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminAction {
    Verify,
    Unverify,
    Activate,
    Deactivate,
}

impl AdminAction {
    pub fn past_tense(self) -> &'static str {
        match self {
            AdminAction::Verify => "verified",
            AdminAction::Unverify => "unverified",
            AdminAction::Activate => "activated",
            AdminAction::Deactivate => "deactivated",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminActionRequest {
    pub action: AdminAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchStatusRequest {
    pub status: MatchStatus,
}

/// Query string for the admin user listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, rename = "type")]
    pub user_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Query string for the admin match listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchListQuery {
    #[serde(default)]
    pub status: Option<String>,
}
