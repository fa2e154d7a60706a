use crate::core::{
    filters::is_candidate,
    parsing::ProfileSignals,
    scoring::score_signals,
};
use crate::models::{MatchResult, ScoredMatch, ScoringWeights, TradeProfile};

/// Scores must exceed this to be returned
pub const DEFAULT_MIN_SCORE: f64 = 0.3;

/// Result of the matching process
#[derive(Debug, Default)]
pub struct MatchOutcome {
    pub matches: Vec<ScoredMatch>,
    pub total_candidates: usize,
}

/// Ranks opposite-role candidates for a subject profile
///
/// # Pipeline Stages
/// 1. Candidate filtering (opposite role, not the subject)
/// 2. Compatibility scoring
/// 3. Minimum-score threshold
/// 4. Stable descending sort and truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    min_score: f64,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, min_score: f64) -> Self {
        Self { weights, min_score }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), DEFAULT_MIN_SCORE)
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    /// Find matches for a subject among `candidates`
    ///
    /// # Arguments
    /// * `subject` - The profile receiving matches
    /// * `candidates` - Profiles supplied by the store, in encounter order
    /// * `limit` - Maximum number of matches to return
    ///
    /// # Returns
    /// MatchOutcome with matches sorted by score, ties in encounter order
    pub fn find_matches(
        &self,
        subject: &TradeProfile,
        candidates: Vec<TradeProfile>,
        limit: usize,
    ) -> MatchOutcome {
        let subject_signals = ProfileSignals::from_profile(subject);
        let mut total_candidates = 0;

        let mut scored_matches: Vec<ScoredMatch> = candidates
            .into_iter()
            // Stage 1: Role and identity filter
            .filter(|profile| is_candidate(subject, profile))
            .inspect(|_| total_candidates += 1)
            // Stage 2 & 3: Score and apply threshold
            .filter_map(|profile| {
                let compatibility = score_signals(
                    &subject_signals,
                    &ProfileSignals::from_profile(&profile),
                    &self.weights,
                );

                if compatibility.score > self.min_score {
                    Some(ScoredMatch {
                        result: MatchResult {
                            subject_id: subject.id,
                            candidate_id: profile.id,
                            score: compatibility.score,
                            reasons: compatibility.reasons,
                        },
                        candidate: profile,
                    })
                } else {
                    None
                }
            })
            .collect();

        // Stage 4: sort_by is stable, so equal scores keep encounter order
        scored_matches.sort_by(|a, b| {
            b.result
                .score
                .partial_cmp(&a.result.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        scored_matches.truncate(limit);

        tracing::debug!(
            "Ranked {} of {} candidates for profile {}",
            scored_matches.len(),
            total_candidates,
            subject.id
        );

        MatchOutcome {
            matches: scored_matches,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
