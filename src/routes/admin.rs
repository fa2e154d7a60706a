use actix_web::{web, HttpResponse};
use serde::Serialize;
use crate::error::ApiError;
use crate::models::{
    ActionResponse, AdminAction, AdminActionRequest, MatchListQuery, MatchStatus,
    MatchStatusRequest, ProfileId, TradeMatch, TradeMatchId, UserDetailResponse, UserListQuery,
    UserType,
};
use crate::routes::matches::AppState;
use crate::services::{analytics_report, platform_metrics, MatchStats, ProfileFilter, StatusFilter};

/// Configure admin dashboard routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/users", web::get().to(list_users))
            .route("/users/{id}", web::get().to(user_detail))
            .route("/users/{id}/action", web::post().to(user_action))
            .route("/matches", web::get().to(list_matches))
            .route("/matches/{id}/status", web::post().to(update_match_status))
            .route("/metrics", web::get().to(metrics))
            .route("/analytics", web::get().to(analytics)),
    );
}

#[derive(Debug, Serialize)]
struct MatchListResponse {
    trade_matches: Vec<TradeMatch>,
    stats: MatchStats,
}

/// `None`, blank and `all` mean no filter
fn optional_filter(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case("all"))
}

/// GET /api/v1/admin/users?search=&type=&status=
async fn list_users(
    state: web::Data<AppState>,
    query: web::Query<UserListQuery>,
) -> Result<HttpResponse, ApiError> {
    let user_type = optional_filter(query.user_type.as_deref())
        .map(|raw| raw.parse::<UserType>())
        .transpose()
        .map_err(ApiError::BadRequest)?;

    let filter = ProfileFilter {
        search: query.search.clone(),
        user_type,
        status: StatusFilter::parse(query.status.as_deref()),
    };

    let users = filter.apply(state.store.list_profiles().await?);

    Ok(HttpResponse::Ok().json(users))
}

/// GET /api/v1/admin/users/{id}
async fn user_detail(
    state: web::Data<AppState>,
    path: web::Path<ProfileId>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let user = state
        .store
        .get_profile(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("profile {}", id)))?;

    let trade_matches = state
        .store
        .list_trade_matches()
        .await?
        .into_iter()
        .filter(|m| m.user1_id == id || m.user2_id == id)
        .collect();

    Ok(HttpResponse::Ok().json(UserDetailResponse { user, trade_matches }))
}

/// Verify, unverify, activate or deactivate an account
///
/// POST /api/v1/admin/users/{id}/action
///
/// Request body:
/// ```json
/// { "action": "verify" }
/// ```
async fn user_action(
    state: web::Data<AppState>,
    path: web::Path<ProfileId>,
    req: web::Json<AdminActionRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let mut user = state
        .store
        .get_profile(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("profile {}", id)))?;

    match req.action {
        AdminAction::Verify => user.is_verified = true,
        AdminAction::Unverify => user.is_verified = false,
        AdminAction::Activate => user.is_active = true,
        AdminAction::Deactivate => user.is_active = false,
    }

    state.store.update_profile(user).await?;

    tracing::info!("Admin {:?} on profile {}", req.action, id);

    Ok(HttpResponse::Ok().json(ActionResponse {
        success: true,
        message: format!("User {} successfully", req.action.past_tense()),
    }))
}

/// GET /api/v1/admin/matches?status=pending
async fn list_matches(
    state: web::Data<AppState>,
    query: web::Query<MatchListQuery>,
) -> Result<HttpResponse, ApiError> {
    let status = optional_filter(query.status.as_deref())
        .map(|raw| raw.parse::<MatchStatus>())
        .transpose()
        .map_err(ApiError::BadRequest)?;

    let all_matches = state.store.list_trade_matches().await?;
    let stats = MatchStats::from_matches(&all_matches);

    let mut trade_matches: Vec<TradeMatch> = all_matches
        .into_iter()
        .filter(|m| status.map_or(true, |s| m.status == s))
        .collect();
    trade_matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(HttpResponse::Ok().json(MatchListResponse { trade_matches, stats }))
}

/// POST /api/v1/admin/matches/{id}/status
async fn update_match_status(
    state: web::Data<AppState>,
    path: web::Path<TradeMatchId>,
    req: web::Json<MatchStatusRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let updated = state.store.update_match_status(id, req.status).await?;

    tracing::info!("Trade match {} marked {}", updated.id, updated.status.as_str());

    Ok(HttpResponse::Ok().json(ActionResponse {
        success: true,
        message: format!("Match status updated to {}", updated.status.as_str()),
    }))
}

/// GET /api/v1/admin/metrics
async fn metrics(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let profiles = state.store.list_profiles().await?;
    let matches = state.store.list_trade_matches().await?;

    Ok(HttpResponse::Ok().json(platform_metrics(&profiles, &matches)))
}

/// GET /api/v1/admin/analytics
async fn analytics(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let profiles = state.store.list_profiles().await?;
    let matches = state.store.list_trade_matches().await?;

    Ok(HttpResponse::Ok().json(analytics_report(&profiles, &matches)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_filter() {
        assert_eq!(optional_filter(None), None);
        assert_eq!(optional_filter(Some("  ")), None);
        assert_eq!(optional_filter(Some("ALL")), None);
        assert_eq!(optional_filter(Some(" importer ")), Some("importer"));
    }
}
