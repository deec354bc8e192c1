use crate::models::{BrandPreferences, Candidate, FactorBreakdown, MatchWeights};

/// Score at or above which a match is flagged as recommended.
pub const RECOMMENDED_THRESHOLD: f64 = 75.0;

/// Calculate a match score (0-100) for a candidate against brand preferences.
///
/// Weighted sum over independent factors, each capped at its weight:
///
/// ```text
/// category match    25   shared categories / preferred categories
/// platform match    20   shared platforms / required platforms
/// follower match    15   full at >= 70% of the max-follower preference
/// engagement match  15   engagement rate / 10, capped
/// portfolio match   10   completed campaigns / 10, capped,
///                        plus tier bonus (+5 rising, +10 legendary)
///                        plus verification bonus (+5)
/// ```
///
/// Demographic and location factors are carried in the breakdown but not
/// computed; they stay 0. The total is clamped to [0, 100] and rounded to
/// two decimals.
pub fn calculate_match_score(
    candidate: &Candidate,
    preferences: &BrandPreferences,
    weights: &MatchWeights,
) -> (f64, FactorBreakdown) {
    let profile = &candidate.profile;

    let category_match = calculate_overlap_score(
        &profile.categories,
        &preferences.preferred_categories,
        weights.category,
    );

    let platform_names: Vec<String> = profile
        .platform_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let platform_match = calculate_overlap_score(
        &platform_names,
        &preferences.required_platforms,
        weights.platform,
    );

    let follower_match = calculate_follower_score(
        candidate.creator.follower_count,
        preferences.min_follower_count,
        preferences.max_follower_count,
        weights.follower,
    );

    let engagement_match =
        calculate_engagement_score(profile.engagement_rate, weights.engagement);

    let portfolio_match = calculate_portfolio_score(
        candidate.creator.completed_campaigns,
        weights.portfolio,
    ) + candidate.creator.tier.bonus()
        + if profile.is_verified { 5.0 } else { 0.0 };

    let total = (category_match
        + platform_match
        + follower_match
        + engagement_match
        + portfolio_match)
        .clamp(0.0, 100.0);

    let factors = FactorBreakdown {
        category_match,
        platform_match,
        follower_match,
        engagement_match,
        portfolio_match,
        demographic_match: 0.0,
        location_match: 0.0,
    };

    (round2(total), factors)
}

/// Round to two decimal places, the precision persisted for scores.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Overlap score: fraction of wanted values present in the candidate's set,
/// scaled by the factor weight. Zero when nothing is wanted.
#[inline]
fn calculate_overlap_score(have: &[String], wanted: &[String], weight: f64) -> f64 {
    if wanted.is_empty() {
        return 0.0;
    }

    let shared = wanted.iter().filter(|w| have.contains(*w)).count();
    (shared as f64 / wanted.len() as f64) * weight
}

/// Follower score: full weight at or above 70% of the max-follower
/// preference, linear below it, zero outside the [min, max] range.
#[inline]
fn calculate_follower_score(followers: i64, min: i64, max: i64, weight: f64) -> f64 {
    if followers < min || followers > max {
        return 0.0;
    }

    let threshold = max as f64 * 0.7;
    if threshold <= 0.0 || followers as f64 >= threshold {
        weight
    } else {
        (followers as f64 / threshold) * weight
    }
}

/// Engagement score: rate / 10 scaled by the weight, capped at the weight.
/// Zero when the rate is absent or non-positive.
#[inline]
fn calculate_engagement_score(engagement_rate: Option<f64>, weight: f64) -> f64 {
    match engagement_rate {
        Some(rate) if rate > 0.0 => ((rate / 10.0) * weight).min(weight),
        _ => 0.0,
    }
}

/// Portfolio score: completed campaigns / 10 scaled by the weight, capped at
/// the weight. Tier and verification bonuses are added by the caller.
#[inline]
fn calculate_portfolio_score(completed_campaigns: i32, weight: f64) -> f64 {
    ((completed_campaigns.max(0) as f64 / 10.0) * weight).min(weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Campaign, Creator, CreatorProfile, CreatorTier, PlatformAccount};
    use uuid::Uuid;

    fn test_campaign() -> Campaign {
        Campaign {
            id: Uuid::new_v4(),
            title: "Summer drop".to_string(),
            category: "fashion".to_string(),
            compensation: 500.0,
            status: "active".to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    fn test_preferences() -> BrandPreferences {
        BrandPreferences {
            campaign_id: Uuid::new_v4(),
            preferred_categories: vec!["fashion".to_string()],
            required_platforms: vec!["instagram".to_string()],
            min_follower_count: 1_000,
            max_follower_count: 100_000,
            demographics: None,
            budget_min: 400.0,
            budget_max: 600.0,
            locations: vec!["any".to_string()],
        }
    }

    fn test_candidate(followers: i64, tier: CreatorTier, verified: bool) -> Candidate {
        Candidate {
            creator: Creator {
                id: Uuid::new_v4(),
                username: "creator".to_string(),
                role: "creator".to_string(),
                platform: "instagram".to_string(),
                profile_image: None,
                follower_count: followers,
                tier,
                completed_campaigns: 5,
                is_active: true,
            },
            profile: CreatorProfile {
                categories: vec!["fashion".to_string(), "lifestyle".to_string()],
                platforms: vec![PlatformAccount {
                    platform: "instagram".to_string(),
                    handle: Some("@creator".to_string()),
                }],
                engagement_rate: Some(6.0),
                is_verified: verified,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_worked_example() {
        // fashion/instagram creator, 80k followers, 6% engagement,
        // 5 completed campaigns, rising tier, verified:
        // 25 + 20 + 15 + 9 + (5 + 5 + 5) = 84
        let candidate = test_candidate(80_000, CreatorTier::Rising, true);
        let preferences = test_preferences();
        let weights = MatchWeights::default();

        let (score, factors) = calculate_match_score(&candidate, &preferences, &weights);

        assert_eq!(factors.category_match, 25.0);
        assert_eq!(factors.platform_match, 20.0);
        assert_eq!(factors.follower_match, 15.0);
        assert_eq!(factors.engagement_match, 9.0);
        assert_eq!(factors.portfolio_match, 15.0);
        assert_eq!(score, 84.0);
        assert!(score >= RECOMMENDED_THRESHOLD);
    }

    #[test]
    fn test_factors_never_exceed_weights() {
        let mut candidate = test_candidate(100_000, CreatorTier::Legendary, true);
        candidate.creator.completed_campaigns = 500;
        candidate.profile.engagement_rate = Some(95.0);
        let preferences = test_preferences();
        let weights = MatchWeights::default();

        let (score, factors) = calculate_match_score(&candidate, &preferences, &weights);

        assert!(factors.category_match <= 25.0);
        assert!(factors.platform_match <= 20.0);
        assert!(factors.follower_match <= 15.0);
        assert!(factors.engagement_match <= 15.0);
        // portfolio cap plus max tier and verification bonuses
        assert!(factors.portfolio_match <= 25.0);
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn test_empty_preferred_categories_scores_zero() {
        let candidate = test_candidate(80_000, CreatorTier::Standard, false);
        let mut preferences = test_preferences();
        preferences.preferred_categories.clear();
        let weights = MatchWeights::default();

        let (_, factors) = calculate_match_score(&candidate, &preferences, &weights);

        assert_eq!(factors.category_match, 0.0);
    }

    #[test]
    fn test_follower_score_below_threshold_is_linear() {
        // 35k followers against a 100k max: threshold is 70k, so half weight
        let score = calculate_follower_score(35_000, 1_000, 100_000, 15.0);
        assert!((score - 7.5).abs() < 1e-9);

        // At the threshold the full weight applies
        assert_eq!(calculate_follower_score(70_000, 1_000, 100_000, 15.0), 15.0);

        // Outside the range the factor is zero
        assert_eq!(calculate_follower_score(500, 1_000, 100_000, 15.0), 0.0);
        assert_eq!(
            calculate_follower_score(200_000, 1_000, 100_000, 15.0),
            0.0
        );
    }

    #[test]
    fn test_missing_engagement_scores_zero() {
        assert_eq!(calculate_engagement_score(None, 15.0), 0.0);
        assert_eq!(calculate_engagement_score(Some(0.0), 15.0), 0.0);
        assert_eq!(calculate_engagement_score(Some(20.0), 15.0), 15.0);
    }

    #[test]
    fn test_tier_bonuses() {
        assert_eq!(CreatorTier::Standard.bonus(), 0.0);
        assert_eq!(CreatorTier::Rising.bonus(), 5.0);
        assert_eq!(CreatorTier::Legendary.bonus(), 10.0);
    }

    #[test]
    fn test_default_preferences_derivation() {
        let campaign = test_campaign();
        let prefs = BrandPreferences::defaults_for(&campaign);

        assert_eq!(prefs.preferred_categories, vec!["fashion"]);
        assert_eq!(prefs.required_platforms, vec!["instagram", "youtube"]);
        assert_eq!(prefs.min_follower_count, 1_000);
        assert_eq!(prefs.max_follower_count, 100_000);
        assert!((prefs.budget_min - 400.0).abs() < 1e-9);
        assert!((prefs.budget_max - 600.0).abs() < 1e-9);
        assert_eq!(prefs.locations, vec!["any"]);
    }
}
