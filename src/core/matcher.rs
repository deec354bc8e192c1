use crate::models::{BrandPreferences, Candidate, CreatorMatch, MatchWeights, ScoredCandidate};
use crate::core::scoring::{calculate_match_score, RECOMMENDED_THRESHOLD};

/// Outcome of a ranking pass over the candidate pool.
#[derive(Debug)]
pub struct RankResult {
    pub scored: Vec<ScoredCandidate>,
    pub total_candidates: usize,
}

/// Pure scoring and ranking over an eligible candidate pool.
///
/// The matcher holds no I/O; the engine feeds it candidates the store already
/// filtered for coarse eligibility and persists whatever it ranks.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: MatchWeights,
}

impl Matcher {
    pub fn new(weights: MatchWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: MatchWeights::default(),
        }
    }

    /// Score a single candidate against the campaign preferences.
    pub fn score(&self, candidate: &Candidate, preferences: &BrandPreferences) -> ScoredCandidate {
        let (score, factors) = calculate_match_score(candidate, preferences, &self.weights);
        ScoredCandidate {
            creator_id: candidate.creator.id,
            score,
            factors,
            is_recommended: score >= RECOMMENDED_THRESHOLD,
        }
    }

    /// Score every candidate and rank by descending score.
    ///
    /// The sort is stable: candidates with equal scores keep the order the
    /// store returned them in. `limit` bounds the ranked output, which is the
    /// set the engine persists.
    pub fn rank(
        &self,
        preferences: &BrandPreferences,
        candidates: Vec<Candidate>,
        limit: usize,
    ) -> RankResult {
        let total_candidates = candidates.len();

        let mut scored: Vec<ScoredCandidate> = candidates
            .iter()
            .map(|candidate| self.score(candidate, preferences))
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(limit);

        RankResult {
            scored,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Summary shape for the recommendations endpoint.
#[derive(Debug)]
pub struct RecommendationSummary {
    pub top_recommended: Vec<CreatorMatch>,
    pub other_matches: Vec<CreatorMatch>,
    pub total_found: usize,
    pub average_score: f64,
}

/// Partition ranked matches by the recommended flag and compute the mean
/// score. The average is 0 for an empty result set.
pub fn summarize_recommendations(matches: Vec<CreatorMatch>) -> RecommendationSummary {
    let total_found = matches.len();

    let average_score = if total_found == 0 {
        0.0
    } else {
        let sum: f64 = matches.iter().map(|m| m.match_score).sum();
        crate::core::scoring::round2(sum / total_found as f64)
    };

    let (top_recommended, other_matches): (Vec<CreatorMatch>, Vec<CreatorMatch>) =
        matches.into_iter().partition(|m| m.is_recommended);

    RecommendationSummary {
        top_recommended,
        other_matches,
        total_found,
        average_score,
    }
}
