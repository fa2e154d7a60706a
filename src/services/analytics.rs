use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use crate::core::{is_priority_market, parse_string_list};
use crate::models::{MatchStatus, ProfileId, TradeMatch, TradeProfile, UserType};

/// Platform-wide counters for the admin dashboard. Admin accounts are not counted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformMetrics {
    pub total_users: usize,
    pub total_importers: usize,
    pub total_exporters: usize,
    pub verified_users: usize,
    pub active_users: usize,
    pub total_matches: usize,
    pub successful_connections: usize,
    pub country_stats: BTreeMap<String, usize>,
    pub priority_market_users: usize,
    /// Percent of users that are verified
    pub verification_rate: f64,
    /// Percent of trade matches that reached `contacted`
    pub success_rate: f64,
}

/// Counts of trade matches per review status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    pub total: usize,
    pub pending: usize,
    pub contacted: usize,
    pub rejected: usize,
}

impl MatchStats {
    pub fn from_matches(matches: &[TradeMatch]) -> Self {
        matches.iter().fold(Self::default(), |mut stats, m| {
            stats.total += 1;
            match m.status {
                MatchStatus::Pending => stats.pending += 1,
                MatchStatus::Contacted => stats.contacted += 1,
                MatchStatus::Rejected => stats.rejected += 1,
            }
            stats
        })
    }
}

/// Trend breakdowns for the analytics page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub metrics: PlatformMetrics,
    /// Registrations keyed by `YYYY-MM`
    pub monthly_registrations: BTreeMap<String, usize>,
    /// Trade matches keyed by the country of the user who initiated them
    pub country_matches: BTreeMap<String, usize>,
    /// Users offering each product category
    pub product_distribution: BTreeMap<String, usize>,
    pub match_stats: MatchStats,
}

#[inline]
fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn trade_users(profiles: &[TradeProfile]) -> impl Iterator<Item = &TradeProfile> {
    profiles.iter().filter(|p| !p.is_admin())
}

pub fn platform_metrics(profiles: &[TradeProfile], matches: &[TradeMatch]) -> PlatformMetrics {
    let mut metrics = PlatformMetrics {
        total_users: 0,
        total_importers: 0,
        total_exporters: 0,
        verified_users: 0,
        active_users: 0,
        total_matches: matches.len(),
        successful_connections: matches
            .iter()
            .filter(|m| m.status == MatchStatus::Contacted)
            .count(),
        country_stats: BTreeMap::new(),
        priority_market_users: 0,
        verification_rate: 0.0,
        success_rate: 0.0,
    };

    for profile in trade_users(profiles) {
        metrics.total_users += 1;
        match profile.user_type {
            UserType::Importer => metrics.total_importers += 1,
            UserType::Exporter => metrics.total_exporters += 1,
            UserType::Admin => {}
        }
        if profile.is_verified {
            metrics.verified_users += 1;
        }
        if profile.is_active {
            metrics.active_users += 1;
        }
        if is_priority_market(&profile.country) {
            metrics.priority_market_users += 1;
        }
        *metrics.country_stats.entry(profile.country.clone()).or_default() += 1;
    }

    metrics.verification_rate = percent(metrics.verified_users, metrics.total_users);
    metrics.success_rate = percent(metrics.successful_connections, metrics.total_matches);

    metrics
}

pub fn analytics_report(profiles: &[TradeProfile], matches: &[TradeMatch]) -> AnalyticsReport {
    let mut monthly_registrations = BTreeMap::new();
    let mut product_distribution = BTreeMap::new();

    for profile in trade_users(profiles) {
        if let Some(created_at) = profile.created_at {
            *monthly_registrations
                .entry(created_at.format("%Y-%m").to_string())
                .or_default() += 1;
        }

        // Unreadable product lists are skipped, not counted
        if let Ok(products) = parse_string_list(profile.products_services.as_deref()) {
            for product in products {
                *product_distribution.entry(product).or_default() += 1;
            }
        }
    }

    let countries: HashMap<ProfileId, &str> = profiles
        .iter()
        .map(|p| (p.id, p.country.as_str()))
        .collect();

    let mut country_matches = BTreeMap::new();
    for trade_match in matches {
        if let Some(country) = countries.get(&trade_match.user1_id) {
            *country_matches.entry(country.to_string()).or_default() += 1;
        }
    }

    AnalyticsReport {
        metrics: platform_metrics(profiles, matches),
        monthly_registrations,
        country_matches,
        product_distribution,
        match_stats: MatchStats::from_matches(matches),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn create_test_profile(id: i64, user_type: UserType, country: &str, month: u32) -> TradeProfile {
        TradeProfile {
            id,
            email: format!("user{}@example.com", id),
            company_name: format!("Company {}", id),
            user_type,
            country: country.to_string(),
            is_verified: id % 2 == 0,
            is_active: id != 3,
            created_at: Some(Utc.with_ymd_and_hms(2025, month, 10, 12, 0, 0).unwrap()),
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

    fn create_test_match(id: i64, user1_id: i64, status: MatchStatus) -> TradeMatch {
        TradeMatch {
            id,
            user1_id,
            user2_id: 99,
            compatibility_score: 0.5,
            match_reasons: Vec::new(),
            status,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    fn profiles() -> Vec<TradeProfile> {
        let mut profiles = vec![
            create_test_profile(1, UserType::Admin, "Ghana", 1),
            create_test_profile(2, UserType::Exporter, "Ghana", 1),
            create_test_profile(3, UserType::Importer, "Nigeria", 2),
            create_test_profile(4, UserType::Importer, "Kenya", 2),
        ];
        profiles[2].products_services = Some("not json".to_string());
        profiles[3].products_services =
            Some(r#"["agricultural_products", "textiles_clothing"]"#.to_string());
        profiles
    }

    #[test]
    fn test_platform_metrics_excludes_admin() {
        let matches = vec![
            create_test_match(1, 2, MatchStatus::Contacted),
            create_test_match(2, 2, MatchStatus::Pending),
            create_test_match(3, 4, MatchStatus::Rejected),
            create_test_match(4, 3, MatchStatus::Pending),
        ];

        let metrics = platform_metrics(&profiles(), &matches);

        assert_eq!(metrics.total_users, 3);
        assert_eq!(metrics.total_importers, 2);
        assert_eq!(metrics.total_exporters, 1);
        assert_eq!(metrics.verified_users, 2);
        assert_eq!(metrics.active_users, 2);
        assert_eq!(metrics.priority_market_users, 2);
        assert_eq!(metrics.country_stats.get("Ghana"), Some(&1));
        assert_eq!(metrics.successful_connections, 1);
        assert_eq!(metrics.success_rate, 25.0);
        assert!((metrics.verification_rate - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_rates_are_zero_without_data() {
        let metrics = platform_metrics(&[], &[]);

        assert_eq!(metrics.total_users, 0);
        assert_eq!(metrics.verification_rate, 0.0);
        assert_eq!(metrics.success_rate, 0.0);
    }

    #[test]
    fn test_analytics_report() {
        let matches = vec![
            create_test_match(1, 2, MatchStatus::Contacted),
            create_test_match(2, 2, MatchStatus::Pending),
            create_test_match(3, 4, MatchStatus::Pending),
        ];

        let report = analytics_report(&profiles(), &matches);

        assert_eq!(report.monthly_registrations.get("2025-01"), Some(&1));
        assert_eq!(report.monthly_registrations.get("2025-02"), Some(&2));
        assert_eq!(report.product_distribution.get("agricultural_products"), Some(&2));
        assert_eq!(report.product_distribution.get("textiles_clothing"), Some(&1));
        assert_eq!(report.country_matches.get("Ghana"), Some(&2));
        assert_eq!(report.country_matches.get("Kenya"), Some(&1));
        assert_eq!(
            report.match_stats,
            MatchStats { total: 3, pending: 2, contacted: 1, rejected: 0 }
        );
    }
}
