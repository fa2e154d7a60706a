use serde::{Deserialize, Serialize};
use crate::core::markets::product_label;
use crate::core::parsing::ordered_list_or_default;
use crate::models::domain::{MatchReason, ProfileId, ScoredMatch, TradeMatch, TradeProfile, UserType};

/// One ranked trade partner, as rendered to clients
#[derive(Debug, Clone, Serialize)]
pub struct MatchView {
    pub id: ProfileId,
    pub company_name: String,
    pub country: String,
    pub user_type: UserType,
    pub business_description: String,
    /// Category ids in stored order
    pub products: Vec<String>,
    /// Display labels for `products`, the raw id when the category is unknown
    pub product_labels: Vec<String>,
    /// Percentage, one decimal
    pub compatibility_score: f64,
    pub match_reasons: Vec<MatchReason>,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub website: String,
}

impl From<ScoredMatch> for MatchView {
    fn from(scored: ScoredMatch) -> Self {
        let compatibility_score = scored.result.percentage();
        let candidate = scored.candidate;
        let products = ordered_list_or_default(candidate.products_services.as_deref());
        let product_labels = products
            .iter()
            .map(|id| product_label(id).unwrap_or(id.as_str()).to_string())
            .collect();

        Self {
            id: candidate.id,
            products,
            product_labels,
            company_name: candidate.company_name,
            country: candidate.country,
            user_type: candidate.user_type,
            business_description: candidate.business_description.unwrap_or_default(),
            compatibility_score,
            match_reasons: scored.result.reasons,
            contact_person: candidate.contact_person.unwrap_or_default(),
            email: candidate.email,
            phone: candidate.phone.unwrap_or_default(),
            website: candidate.website.unwrap_or_default(),
        }
    }
}

/// Response for find matches endpoint
#[derive(Debug, Clone, Serialize)]
pub struct FindMatchesResponse {
    pub user_id: ProfileId,
    pub matches: Vec<MatchView>,
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Generic acknowledgement for mutations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

/// Static reference data used by registration and profile forms
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceResponse {
    pub countries: Vec<&'static str>,
    pub priority_markets: Vec<&'static str>,
    pub product_categories: Vec<ProductCategoryView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductCategoryView {
    pub id: &'static str,
    pub label: &'static str,
}

/// Admin view of one account and its recorded trade matches
#[derive(Debug, Clone, Serialize)]
pub struct UserDetailResponse {
    pub user: TradeProfile,
    pub trade_matches: Vec<TradeMatch>,
}
