use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::core::AFCFTA_COUNTRIES;
use crate::error::ApiError;
use crate::models::{NewProfile, ProfileId, RegisterRequest, UpdateProfileRequest, UserType};
use crate::routes::matches::AppState;

/// Configure account and trade profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/profiles", web::post().to(register))
        .route("/profiles/{id}", web::get().to(get_profile))
        .route("/profiles/{id}", web::put().to(update_profile));
}

fn require_member_state(country: &str) -> Result<(), ApiError> {
    if AFCFTA_COUNTRIES.contains(&country) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!("{} is not an AfCFTA member state", country)))
    }
}

fn json_list(values: Vec<String>) -> Result<String, ApiError> {
    let values: Vec<String> = values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();

    serde_json::to_string(&values).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Register a trading account
///
/// POST /api/v1/profiles
///
/// Only importers and exporters may self-register. A taken e-mail is a 409.
async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let req = req.into_inner();

    if req.user_type == UserType::Admin {
        return Err(ApiError::Validation("user_type must be importer or exporter".to_string()));
    }
    require_member_state(&req.country)?;

    if state.store.find_by_email(&req.email).await?.is_some() {
        return Err(ApiError::Conflict(format!("email {} already registered", req.email)));
    }

    let created = state
        .store
        .create_profile(NewProfile {
            email: req.email.trim().to_string(),
            company_name: req.company_name,
            user_type: req.user_type,
            country: req.country,
            contact_person: req.contact_person,
            phone: req.phone,
        })
        .await?;

    tracing::info!("Registered {} profile {}", created.user_type, created.id);

    Ok(HttpResponse::Created().json(created))
}

async fn get_profile(
    state: web::Data<AppState>,
    path: web::Path<ProfileId>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    match state.store.get_profile(id).await? {
        Some(profile) => Ok(HttpResponse::Ok().json(profile)),
        None => Err(ApiError::NotFound(format!("profile {}", id))),
    }
}

/// Update trade profile fields
///
/// PUT /api/v1/profiles/{id}
///
/// The form is submitted whole: product and preferred-country lists are always
/// replaced, other fields only when present.
async fn update_profile(
    state: web::Data<AppState>,
    path: web::Path<ProfileId>,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let id = path.into_inner();
    let req = req.into_inner();

    let mut profile = state
        .store
        .get_profile(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("profile {}", id)))?;

    for country in &req.preferred_countries {
        require_member_state(country.trim())?;
    }

    profile.products_services = Some(json_list(req.products_services)?);
    profile.preferred_countries = Some(json_list(req.preferred_countries)?);

    if req.business_description.is_some() {
        profile.business_description = req.business_description;
    }
    if req.annual_volume.is_some() {
        profile.annual_volume = req.annual_volume;
    }
    if req.company_size.is_some() {
        profile.company_size = req.company_size;
    }
    if req.certifications.is_some() {
        profile.certifications = req.certifications;
    }
    if req.languages.is_some() {
        profile.languages = req.languages;
    }
    if req.website.is_some() {
        profile.website = req.website;
    }

    let updated = state.store.update_profile(profile).await?;

    tracing::debug!("Updated trade profile {}", updated.id);

    Ok(HttpResponse::Ok().json(updated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_list_trims_and_drops_blanks() {
        let raw = json_list(vec![" agricultural_products ".into(), "".into(), "wood_paper".into()]).unwrap();
        assert_eq!(raw, r#"["agricultural_products","wood_paper"]"#);
    }

    #[test]
    fn test_member_state_check() {
        assert!(require_member_state("Ghana").is_ok());
        assert!(require_member_state("France").is_err());
    }
}
