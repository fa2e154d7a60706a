// Core algorithm exports
pub mod filters;
pub mod markets;
pub mod matcher;
pub mod parsing;
pub mod scoring;

pub use filters::is_candidate;
pub use markets::{is_priority_market, product_label, AFCFTA_COUNTRIES, PRIORITY_MARKETS, PRODUCT_CATEGORIES};
pub use matcher::{MatchOutcome, Matcher, DEFAULT_MIN_SCORE};
pub use parsing::{
    ordered_list_or_default, parse_languages, parse_string_list, string_list_or_default, ParseError,
    ProfileSignals,
};
pub use scoring::{breakdown, calculate_compatibility, score_signals, Compatibility, SubScores};
