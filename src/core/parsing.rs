//! Parse-or-default helpers for the serialized profile fields.
//!
//! Stored list fields are JSON arrays of strings and languages are a comma-separated
//! string. List parsers return a typed `Result` so callers choose the fallback
//! explicitly; the `*_or_default` variants apply the documented one.

use std::collections::BTreeSet;
use thiserror::Error;
use crate::models::{CompanySize, TradeProfile, UserType};

/// Language assumed when a profile lists none
pub const DEFAULT_LANGUAGE: &str = "english";

/// Rank used for absent or unrecognized company sizes (medium)
pub const DEFAULT_SIZE_RANK: u8 = 3;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed list: {0}")]
    MalformedList(#[from] serde_json::Error),
}

/// Parse a serialized JSON list of strings. Absent or blank input is an empty set.
pub fn parse_string_list(raw: Option<&str>) -> Result<BTreeSet<String>, ParseError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(BTreeSet::new()),
        Some(json) => {
            let items: Vec<String> = serde_json::from_str(json)?;
            Ok(items.into_iter().collect())
        }
    }
}

/// Parse a serialized list, degrading to an empty set when it is malformed
pub fn string_list_or_default(raw: Option<&str>) -> BTreeSet<String> {
    parse_string_list(raw).unwrap_or_else(|e| {
        tracing::debug!("Discarding unparseable list field {:?}: {}", raw, e);
        BTreeSet::new()
    })
}

/// Parse a serialized list keeping its stored order and duplicates
pub fn parse_ordered_list(raw: Option<&str>) -> Result<Vec<String>, ParseError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(json) => Ok(serde_json::from_str(json)?),
    }
}

/// Ordered variant of [`string_list_or_default`]
pub fn ordered_list_or_default(raw: Option<&str>) -> Vec<String> {
    parse_ordered_list(raw).unwrap_or_else(|e| {
        tracing::debug!("Discarding unparseable list field {:?}: {}", raw, e);
        Vec::new()
    })
}

/// Split a comma-separated language field into lowercased tags.
///
/// Tags are not trimmed, so `"English, French"` yields `"english"` and `" french"`.
/// Only an absent or empty value falls back to the default language.
pub fn parse_languages(raw: Option<&str>) -> BTreeSet<String> {
    match raw {
        None | Some("") => BTreeSet::from([DEFAULT_LANGUAGE.to_string()]),
        Some(value) => value.to_lowercase().split(',').map(str::to_string).collect(),
    }
}

/// Ordinal 1-5 of a stored company size, medium when unrecognized
#[inline]
pub fn size_rank(raw: Option<&str>) -> u8 {
    CompanySize::parse(raw)
        .map(CompanySize::rank)
        .unwrap_or(DEFAULT_SIZE_RANK)
}

/// Scoring-ready view of a profile with every serialized field parsed once
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSignals {
    pub user_type: UserType,
    pub country: String,
    pub preferred_countries: BTreeSet<String>,
    pub products: BTreeSet<String>,
    pub size_rank: u8,
    pub languages: BTreeSet<String>,
}

impl ProfileSignals {
    pub fn from_profile(profile: &TradeProfile) -> Self {
        Self {
            user_type: profile.user_type,
            country: profile.country.clone(),
            preferred_countries: string_list_or_default(profile.preferred_countries.as_deref()),
            products: string_list_or_default(profile.products_services.as_deref()),
            size_rank: size_rank(profile.company_size.as_deref()),
            languages: parse_languages(profile.languages.as_deref()),
        }
    }
}

impl From<&TradeProfile> for ProfileSignals {
    fn from(profile: &TradeProfile) -> Self {
        Self::from_profile(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string_list() {
        let set = parse_string_list(Some(r#"["Kenya", "Ghana", "Kenya"]"#)).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("Ghana"));
    }

    #[test]
    fn test_absent_list_is_empty() {
        assert!(parse_string_list(None).unwrap().is_empty());
        assert!(parse_string_list(Some("   ")).unwrap().is_empty());
        assert!(parse_string_list(Some("[]")).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_list_is_an_error() {
        assert!(parse_string_list(Some("not json")).is_err());
        assert!(parse_string_list(Some(r#"{"a": 1}"#)).is_err());
        assert!(parse_string_list(Some("[1, 2]")).is_err());
    }

    #[test]
    fn test_malformed_list_degrades_to_empty() {
        assert!(string_list_or_default(Some("[\"unterminated")).is_empty());
    }

    #[test]
    fn test_ordered_list_keeps_stored_order() {
        let list = ordered_list_or_default(Some(r#"["textiles_clothing", "agricultural_products"]"#));
        assert_eq!(list, vec!["textiles_clothing", "agricultural_products"]);
        assert!(ordered_list_or_default(Some("textiles_clothing")).is_empty());
        assert!(ordered_list_or_default(None).is_empty());
    }

    #[test]
    fn test_parse_languages() {
        let tags = parse_languages(Some("English, French ,Twi"));
        let expected: BTreeSet<String> =
            ["english", " french ", "twi"].iter().map(|s| s.to_string()).collect();
        assert_eq!(tags, expected);
    }

    #[test]
    fn test_languages_default_to_english() {
        let expected = BTreeSet::from(["english".to_string()]);
        assert_eq!(parse_languages(None), expected);
        assert_eq!(parse_languages(Some("")), expected);
    }

    #[test]
    fn test_whitespace_languages_are_kept_as_tags() {
        assert_eq!(parse_languages(Some("   ")), BTreeSet::from(["   ".to_string()]));
        assert_eq!(
            parse_languages(Some(" , ")),
            BTreeSet::from([" ".to_string()])
        );
    }

    #[test]
    fn test_size_rank() {
        assert_eq!(size_rank(Some("micro")), 1);
        assert_eq!(size_rank(Some("enterprise")), 5);
        assert_eq!(size_rank(Some("gigantic")), 3);
        assert_eq!(size_rank(None), 3);
    }
}
