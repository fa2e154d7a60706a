use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;
use crate::models::{
    MatchStatus, NewProfile, NewTradeMatch, ProfileId, TradeMatch, TradeMatchId, TradeProfile,
    UserType,
};
use crate::services::store::{ProfileStore, StoreError};

const PROFILE_COLUMNS: &str = r#"
    id, email, company_name, user_type, country, is_verified, is_active, created_at,
    business_description, products_services, annual_volume, company_size, certifications,
    languages, preferred_countries, contact_person, phone, website
"#;

const MATCH_COLUMNS: &str = r#"
    id, user1_id, user2_id, compatibility_score, match_reasons, status, created_at
"#;

/// PostgreSQL-backed profile store
///
/// Reads the platform's existing `users` and `trade_matches` tables. The schema is
/// owned by the platform; this client only issues queries against it:
///
/// - `users`: `id BIGSERIAL`, `email TEXT UNIQUE`, `user_type TEXT`, `created_at
///   TIMESTAMPTZ`, booleans `is_verified`/`is_active`, and nullable `TEXT` profile
///   fields (`products_services` and `preferred_countries` hold JSON lists).
/// - `trade_matches`: `id BIGSERIAL`, `user1_id`/`user2_id BIGINT`,
///   `compatibility_score DOUBLE PRECISION`, `match_reasons JSONB`, `status TEXT`,
///   `created_at TIMESTAMPTZ`.
pub struct PostgresProfileStore {
    pool: PgPool,
}

impl PostgresProfileStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL profile store");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    async fn fetch_profiles(&self, query: &str) -> Result<Vec<TradeProfile>, StoreError> {
        let rows = sqlx::query(query).fetch_all(&self.pool).await?;
        rows.iter().map(profile_from_row).collect()
    }
}

fn profile_from_row(row: &PgRow) -> Result<TradeProfile, StoreError> {
    let user_type: String = row.try_get("user_type")?;
    let user_type = user_type
        .parse::<UserType>()
        .map_err(StoreError::InvalidRecord)?;

    Ok(TradeProfile {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        company_name: row.try_get("company_name")?,
        user_type,
        country: row.try_get("country")?,
        is_verified: row.try_get::<Option<bool>, _>("is_verified")?.unwrap_or(false),
        is_active: row.try_get::<Option<bool>, _>("is_active")?.unwrap_or(true),
        created_at: row.try_get("created_at")?,
        business_description: row.try_get("business_description")?,
        products_services: row.try_get("products_services")?,
        annual_volume: row.try_get("annual_volume")?,
        company_size: row.try_get("company_size")?,
        certifications: row.try_get("certifications")?,
        languages: row.try_get("languages")?,
        preferred_countries: row.try_get("preferred_countries")?,
        contact_person: row.try_get("contact_person")?,
        phone: row.try_get("phone")?,
        website: row.try_get("website")?,
    })
}

fn match_from_row(row: &PgRow) -> Result<TradeMatch, StoreError> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<MatchStatus>()
        .map_err(StoreError::InvalidRecord)?;
    let reasons: Option<Json<Vec<String>>> = row.try_get("match_reasons")?;

    Ok(TradeMatch {
        id: row.try_get("id")?,
        user1_id: row.try_get("user1_id")?,
        user2_id: row.try_get("user2_id")?,
        compatibility_score: row.try_get("compatibility_score")?,
        match_reasons: reasons.map(|Json(r)| r).unwrap_or_default(),
        status,
        created_at: row.try_get("created_at")?,
    })
}

fn map_unique_violation(err: sqlx::Error, what: String) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict(what),
        _ => StoreError::SqlxError(err),
    }
}

#[async_trait]
impl ProfileStore for PostgresProfileStore {
    async fn get_profile(&self, id: ProfileId) -> Result<Option<TradeProfile>, StoreError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", PROFILE_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(profile_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<TradeProfile>, StoreError> {
        let query = format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
            PROFILE_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(profile_from_row).transpose()
    }

    async fn list_profiles(&self) -> Result<Vec<TradeProfile>, StoreError> {
        let query = format!("SELECT {} FROM users ORDER BY id", PROFILE_COLUMNS);
        self.fetch_profiles(&query).await
    }

    async fn list_by_type(
        &self,
        user_type: UserType,
        exclude: ProfileId,
    ) -> Result<Vec<TradeProfile>, StoreError> {
        let query = format!(
            "SELECT {} FROM users WHERE user_type = $1 AND id <> $2 ORDER BY id",
            PROFILE_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(user_type.as_str())
            .bind(exclude)
            .fetch_all(&self.pool)
            .await?;

        let profiles = rows
            .iter()
            .map(profile_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Loaded {} {} profiles", profiles.len(), user_type);

        Ok(profiles)
    }

    async fn create_profile(&self, profile: NewProfile) -> Result<TradeProfile, StoreError> {
        let query = format!(
            r#"
            INSERT INTO users (email, company_name, user_type, country, contact_person, phone,
                               is_verified, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE, TRUE, NOW())
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(&profile.email)
            .bind(&profile.company_name)
            .bind(profile.user_type.as_str())
            .bind(&profile.country)
            .bind(&profile.contact_person)
            .bind(&profile.phone)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, format!("email {} already registered", profile.email)))?;

        profile_from_row(&row)
    }

    async fn update_profile(&self, profile: TradeProfile) -> Result<TradeProfile, StoreError> {
        let query = format!(
            r#"
            UPDATE users SET
                email = $2, company_name = $3, user_type = $4, country = $5,
                is_verified = $6, is_active = $7, business_description = $8,
                products_services = $9, annual_volume = $10, company_size = $11,
                certifications = $12, languages = $13, preferred_countries = $14,
                contact_person = $15, phone = $16, website = $17
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(profile.id)
            .bind(&profile.email)
            .bind(&profile.company_name)
            .bind(profile.user_type.as_str())
            .bind(&profile.country)
            .bind(profile.is_verified)
            .bind(profile.is_active)
            .bind(&profile.business_description)
            .bind(&profile.products_services)
            .bind(&profile.annual_volume)
            .bind(&profile.company_size)
            .bind(&profile.certifications)
            .bind(&profile.languages)
            .bind(&profile.preferred_countries)
            .bind(&profile.contact_person)
            .bind(&profile.phone)
            .bind(&profile.website)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, format!("email {} already registered", profile.email)))?;

        match row {
            Some(row) => profile_from_row(&row),
            None => Err(StoreError::NotFound(format!("profile {}", profile.id))),
        }
    }

    async fn save_trade_match(&self, trade_match: NewTradeMatch) -> Result<TradeMatch, StoreError> {
        let query = format!(
            r#"
            INSERT INTO trade_matches (user1_id, user2_id, compatibility_score, match_reasons,
                                       status, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING {}
            "#,
            MATCH_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(trade_match.user1_id)
            .bind(trade_match.user2_id)
            .bind(trade_match.compatibility_score)
            .bind(Json(&trade_match.match_reasons))
            .bind(MatchStatus::Pending.as_str())
            .fetch_one(&self.pool)
            .await?;

        match_from_row(&row)
    }

    async fn list_trade_matches(&self) -> Result<Vec<TradeMatch>, StoreError> {
        let query = format!("SELECT {} FROM trade_matches ORDER BY id", MATCH_COLUMNS);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter().map(match_from_row).collect()
    }

    async fn update_match_status(
        &self,
        id: TradeMatchId,
        status: MatchStatus,
    ) -> Result<TradeMatch, StoreError> {
        let query = format!(
            "UPDATE trade_matches SET status = $2 WHERE id = $1 RETURNING {}",
            MATCH_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => match_from_row(&row),
            None => Err(StoreError::NotFound(format!("trade match {}", id))),
        }
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
