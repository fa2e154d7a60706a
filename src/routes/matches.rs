use actix_web::{web, HttpResponse};
use std::sync::Arc;
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::{calculate_compatibility, AFCFTA_COUNTRIES, PRIORITY_MARKETS, PRODUCT_CATEGORIES};
use crate::error::ApiError;
use crate::models::responses::ProductCategoryView;
use crate::models::{
    ConnectRequest, FindMatchesRequest, FindMatchesResponse, HealthResponse, MatchView,
    MatchesQuery, NewTradeMatch, ProfileId, ReferenceResponse,
};
use crate::services::{MatchFinder, ProfileStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    pub finder: MatchFinder,
    pub matching: MatchingSettings,
}

impl AppState {
    pub fn new(store: Arc<dyn ProfileStore>, finder: MatchFinder, matching: MatchingSettings) -> Self {
        Self { store, finder, matching }
    }
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/reference", web::get().to(reference_data))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/connect", web::post().to(connect))
        .route("/profiles/{id}/matches", web::get().to(profile_matches))
        .route("/profiles/{id}/matches/{candidate_id}", web::get().to(score_pair));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let store_healthy = match state.store.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Store health check failed: {}", e);
            false
        }
    };

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Countries, priority markets and product categories for client forms
async fn reference_data() -> HttpResponse {
    HttpResponse::Ok().json(ReferenceResponse {
        countries: AFCFTA_COUNTRIES.to_vec(),
        priority_markets: PRIORITY_MARKETS.to_vec(),
        product_categories: PRODUCT_CATEGORIES
            .iter()
            .map(|&(id, label)| ProductCategoryView { id, label })
            .collect(),
    })
}

async fn ranked_matches(
    state: &AppState,
    user_id: ProfileId,
    limit: Option<u16>,
) -> Result<FindMatchesResponse, ApiError> {
    let limit = state.matching.effective_limit(limit);

    tracing::info!("Finding matches for profile: {}, limit: {}", user_id, limit);

    let outcome = state.finder.find_matches(user_id, limit).await?;

    tracing::info!(
        "Returning {} matches for profile {} (from {} candidates)",
        outcome.matches.len(),
        user_id,
        outcome.total_candidates
    );

    Ok(FindMatchesResponse {
        user_id,
        total_candidates: outcome.total_candidates,
        matches: outcome.matches.into_iter().map(MatchView::from).collect(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "userId": 2,
///   "limit": 10
/// }
/// ```
///
/// An unknown or admin profile gets an empty list, not an error.
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return Err(errors.into());
    }

    let response = ranked_matches(&state, req.user_id, req.limit).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/v1/profiles/{id}/matches?limit=10
async fn profile_matches(
    state: web::Data<AppState>,
    path: web::Path<ProfileId>,
    query: web::Query<MatchesQuery>,
) -> Result<HttpResponse, ApiError> {
    let response = ranked_matches(&state, path.into_inner(), query.limit).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Compatibility of one pair
///
/// GET /api/v1/profiles/{id}/matches/{candidate_id}
async fn score_pair(
    state: web::Data<AppState>,
    path: web::Path<(ProfileId, ProfileId)>,
) -> Result<HttpResponse, ApiError> {
    let (subject_id, candidate_id) = path.into_inner();

    match state.finder.score_pair(subject_id, candidate_id).await? {
        Some(result) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "subject_id": result.subject_id,
            "candidate_id": result.candidate_id,
            "score": result.score,
            "compatibility_score": result.percentage(),
            "match_reasons": result.reasons,
        }))),
        None => Err(ApiError::NotFound(format!(
            "profiles {} and {} must both exist",
            subject_id, candidate_id
        ))),
    }
}

/// Record a connection request with a ranked candidate
///
/// POST /api/v1/matches/connect
///
/// Request body:
/// ```json
/// {
///   "userId": 2,
///   "candidateId": 6
/// }
/// ```
async fn connect(
    state: web::Data<AppState>,
    req: web::Json<ConnectRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let subject = state
        .store
        .get_profile(req.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("profile {}", req.user_id)))?;
    let candidate = state
        .store
        .get_profile(req.candidate_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("profile {}", req.candidate_id)))?;

    if subject.user_type.counterpart() != Some(candidate.user_type) {
        return Err(ApiError::BadRequest(
            "only an importer and an exporter can connect".to_string(),
        ));
    }

    let compatibility = calculate_compatibility(&subject, &candidate, state.finder.matcher().weights());

    let saved = state
        .store
        .save_trade_match(NewTradeMatch {
            user1_id: subject.id,
            user2_id: candidate.id,
            compatibility_score: compatibility.score,
            match_reasons: compatibility.reasons.iter().map(ToString::to_string).collect(),
        })
        .await?;

    tracing::info!(
        "Recorded trade match {}: {} -> {} ({:.3})",
        saved.id,
        saved.user1_id,
        saved.user2_id,
        saved.compatibility_score
    );

    Ok(HttpResponse::Created().json(saved))
}
