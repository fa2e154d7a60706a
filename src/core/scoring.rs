use crate::core::markets::is_priority_market;
use crate::core::parsing::ProfileSignals;
use crate::models::{MatchReason, ScoringWeights, TradeProfile, UserType};

/// Product score when either side lists no categories
pub const PRODUCT_FALLBACK_SCORE: f64 = 0.3;

/// Language score when the two sides share no tag
pub const LANGUAGE_MISMATCH_SCORE: f64 = 0.5;

const GEO_DIFFERENT_COUNTRY: f64 = 0.3;
const GEO_PREFERRED_COUNTRY: f64 = 0.4;

const GEO_REASON_THRESHOLD: f64 = 0.7;
const PRODUCT_REASON_THRESHOLD: f64 = 0.6;

/// Final compatibility of a pair: a score in [0, 1] and its reasons
#[derive(Debug, Clone, PartialEq)]
pub struct Compatibility {
    pub score: f64,
    pub reasons: Vec<MatchReason>,
}

impl Compatibility {
    pub fn none() -> Self {
        Self { score: 0.0, reasons: Vec::new() }
    }
}

/// The five sub-scores, each clamped to [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub geographic: f64,
    pub product: f64,
    pub size: f64,
    pub language: f64,
    pub priority: f64,
}

impl SubScores {
    /// Weighted blend, clamped to [0, 1]
    pub fn weighted(&self, weights: &ScoringWeights) -> f64 {
        let total = self.geographic * weights.geographic
            + self.product * weights.product
            + self.size * weights.size
            + self.language * weights.language
            + self.priority * weights.priority;

        clamp_unit(total)
    }

    /// Reasons in fixed order: geography, products, priority market
    pub fn reasons(&self) -> Vec<MatchReason> {
        let mut reasons = Vec::new();
        if self.geographic > GEO_REASON_THRESHOLD {
            reasons.push(MatchReason::GeographicAlignment);
        }
        if self.product > PRODUCT_REASON_THRESHOLD {
            reasons.push(MatchReason::ProductCategoryMatch);
        }
        if self.priority > 0.0 {
            reasons.push(MatchReason::PriorityMarket);
        }
        reasons
    }
}

/// Calculate the compatibility of `candidate` for `subject`
///
/// Scoring formula:
/// score = (
///     geographic * 0.30 +     # different country, preferred-country hits
///     product * 0.40 +        # Jaccard overlap of product categories
///     size * 0.15 +           # company-size proximity
///     language * 0.10 +       # shared language tag
///     priority * 0.05         # priority-market presence
/// )
///
/// Profiles of the same trade role, or involving an admin, never match.
pub fn calculate_compatibility(
    subject: &TradeProfile,
    candidate: &TradeProfile,
    weights: &ScoringWeights,
) -> Compatibility {
    score_signals(
        &ProfileSignals::from_profile(subject),
        &ProfileSignals::from_profile(candidate),
        weights,
    )
}

/// Same as [`calculate_compatibility`] over already parsed profiles
pub fn score_signals(a: &ProfileSignals, b: &ProfileSignals, weights: &ScoringWeights) -> Compatibility {
    if !are_counterparts(a.user_type, b.user_type) {
        return Compatibility::none();
    }

    let sub_scores = breakdown(a, b);

    Compatibility {
        score: sub_scores.weighted(weights),
        reasons: sub_scores.reasons(),
    }
}

/// Compute every sub-score for a pair, regardless of trade roles
pub fn breakdown(a: &ProfileSignals, b: &ProfileSignals) -> SubScores {
    SubScores {
        geographic: geographic_score(a, b),
        product: product_score(a, b),
        size: size_score(a.size_rank, b.size_rank),
        language: language_score(a, b),
        priority: priority_market_score(&a.country, &b.country),
    }
}

#[inline]
fn are_counterparts(a: UserType, b: UserType) -> bool {
    a.counterpart() == Some(b)
}

/// Geographic score (0-1)
/// Base 0.3 across borders, +0.4 for each side that lists the other's country
pub fn geographic_score(a: &ProfileSignals, b: &ProfileSignals) -> f64 {
    let mut score = 0.0;

    if a.country != b.country {
        score += GEO_DIFFERENT_COUNTRY;
    }
    if a.preferred_countries.contains(&b.country) {
        score += GEO_PREFERRED_COUNTRY;
    }
    if b.preferred_countries.contains(&a.country) {
        score += GEO_PREFERRED_COUNTRY;
    }

    clamp_unit(score)
}

/// Product score (0-1): Jaccard index of the category sets
pub fn product_score(a: &ProfileSignals, b: &ProfileSignals) -> f64 {
    if a.products.is_empty() || b.products.is_empty() {
        return PRODUCT_FALLBACK_SCORE;
    }

    let intersection = a.products.intersection(&b.products).count();
    let union = a.products.union(&b.products).count();

    clamp_unit(intersection as f64 / union as f64)
}

/// Size score (0-1): linear falloff over the 1-5 rank scale
#[inline]
pub fn size_score(rank_a: u8, rank_b: u8) -> f64 {
    let diff = (rank_a as f64 - rank_b as f64).abs();
    clamp_unit(1.0 - diff / 4.0)
}

/// Language score (0-1)
pub fn language_score(a: &ProfileSignals, b: &ProfileSignals) -> f64 {
    if a.languages.intersection(&b.languages).next().is_some() {
        1.0
    } else {
        LANGUAGE_MISMATCH_SCORE
    }
}

/// Priority-market score: 1.0 for both sides, 0.5 for one, 0.0 otherwise
#[inline]
pub fn priority_market_score(country_a: &str, country_b: &str) -> f64 {
    match (is_priority_market(country_a), is_priority_market(country_b)) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.5,
        (false, false) => 0.0,
    }
}

/// Clamp to [0, 1], mapping non-finite values to 0
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
