// Unit tests for creator-match

use creator_match::core::{
    filters::is_eligible,
    scoring::{calculate_match_score, RECOMMENDED_THRESHOLD},
};
use creator_match::models::{
    BrandPreferences, Campaign, Candidate, Creator, CreatorProfile, CreatorTier, MatchWeights,
    PlatformAccount, UpdateProfileRequest,
};
use uuid::Uuid;

fn fashion_campaign() -> Campaign {
    Campaign {
        id: Uuid::new_v4(),
        title: "Fall collection".to_string(),
        category: "fashion".to_string(),
        compensation: 1000.0,
        status: "active".to_string(),
        created_at: chrono::Utc::now(),
    }
}

fn fashion_preferences() -> BrandPreferences {
    BrandPreferences {
        campaign_id: Uuid::new_v4(),
        preferred_categories: vec!["fashion".to_string()],
        required_platforms: vec!["instagram".to_string()],
        min_follower_count: 1_000,
        max_follower_count: 100_000,
        demographics: None,
        budget_min: 800.0,
        budget_max: 1200.0,
        locations: vec!["any".to_string()],
    }
}

fn creator(followers: i64, tier: CreatorTier) -> Creator {
    Creator {
        id: Uuid::new_v4(),
        username: "mira".to_string(),
        role: "creator".to_string(),
        platform: "instagram".to_string(),
        profile_image: None,
        follower_count: followers,
        tier,
        completed_campaigns: 5,
        is_active: true,
    }
}

fn candidate(followers: i64, tier: CreatorTier, verified: bool) -> Candidate {
    Candidate {
        creator: creator(followers, tier),
        profile: CreatorProfile {
            categories: vec!["fashion".to_string(), "lifestyle".to_string()],
            platforms: vec![PlatformAccount {
                platform: "instagram".to_string(),
                handle: Some("@mira".to_string()),
            }],
            engagement_rate: Some(6.0),
            is_verified: verified,
            ..Default::default()
        },
    }
}

#[test]
fn test_worked_example_scores_84() {
    let candidate = candidate(80_000, CreatorTier::Rising, true);
    let (score, factors) =
        calculate_match_score(&candidate, &fashion_preferences(), &MatchWeights::default());

    assert_eq!(factors.category_match, 25.0);
    assert_eq!(factors.platform_match, 20.0);
    assert_eq!(factors.follower_match, 15.0);
    assert_eq!(factors.engagement_match, 9.0);
    assert_eq!(factors.portfolio_match, 15.0);
    assert_eq!(factors.demographic_match, 0.0);
    assert_eq!(factors.location_match, 0.0);
    assert_eq!(score, 84.0);
}

#[test]
fn test_recommended_threshold_boundary() {
    assert!(84.0 >= RECOMMENDED_THRESHOLD);
    assert!(74.99 < RECOMMENDED_THRESHOLD);
    assert!(75.0 >= RECOMMENDED_THRESHOLD);
}

#[test]
fn test_partial_category_overlap() {
    let mut c = candidate(80_000, CreatorTier::Standard, false);
    c.profile.categories = vec!["fashion".to_string()];
    let mut prefs = fashion_preferences();
    prefs.preferred_categories = vec!["fashion".to_string(), "beauty".to_string()];

    let (_, factors) = calculate_match_score(&c, &prefs, &MatchWeights::default());

    // one of two preferred categories present
    assert_eq!(factors.category_match, 12.5);
}

#[test]
fn test_platform_mismatch_scores_zero() {
    let mut c = candidate(80_000, CreatorTier::Standard, false);
    c.profile.platforms = vec![PlatformAccount {
        platform: "tiktok".to_string(),
        handle: None,
    }];

    let (_, factors) =
        calculate_match_score(&c, &fashion_preferences(), &MatchWeights::default());

    assert_eq!(factors.platform_match, 0.0);
}

#[test]
fn test_empty_profile_scores_only_followers_and_portfolio() {
    let c = Candidate {
        creator: creator(80_000, CreatorTier::Standard),
        profile: CreatorProfile::default(),
    };

    let (score, factors) =
        calculate_match_score(&c, &fashion_preferences(), &MatchWeights::default());

    assert_eq!(factors.category_match, 0.0);
    assert_eq!(factors.platform_match, 0.0);
    assert_eq!(factors.follower_match, 15.0);
    assert_eq!(factors.engagement_match, 0.0);
    // 5 completed campaigns, no bonuses
    assert_eq!(factors.portfolio_match, 5.0);
    assert_eq!(score, 20.0);
}

#[test]
fn test_score_clamped_to_100() {
    let mut c = candidate(90_000, CreatorTier::Legendary, true);
    c.creator.completed_campaigns = 100;
    c.profile.engagement_rate = Some(50.0);

    let (score, _) =
        calculate_match_score(&c, &fashion_preferences(), &MatchWeights::default());

    assert!(score <= 100.0);
}

#[test]
fn test_eligibility_follower_bounds() {
    let prefs = fashion_preferences();

    assert!(!is_eligible(&creator(0, CreatorTier::Standard), &prefs));
    assert!(!is_eligible(&creator(999, CreatorTier::Standard), &prefs));
    assert!(is_eligible(&creator(1_000, CreatorTier::Standard), &prefs));
    assert!(is_eligible(&creator(100_000, CreatorTier::Standard), &prefs));
    assert!(!is_eligible(&creator(100_001, CreatorTier::Standard), &prefs));
}

#[test]
fn test_eligibility_requires_creator_role_and_active() {
    let prefs = fashion_preferences();

    let mut brand = creator(50_000, CreatorTier::Standard);
    brand.role = "brand".to_string();
    assert!(!is_eligible(&brand, &prefs));

    let mut inactive = creator(50_000, CreatorTier::Standard);
    inactive.is_active = false;
    assert!(!is_eligible(&inactive, &prefs));
}

#[test]
fn test_default_preferences_derived_from_campaign() {
    let campaign = fashion_campaign();
    let prefs = BrandPreferences::defaults_for(&campaign);

    assert_eq!(prefs.campaign_id, campaign.id);
    assert_eq!(prefs.preferred_categories, vec!["fashion"]);
    assert_eq!(prefs.required_platforms, vec!["instagram", "youtube"]);
    assert_eq!(prefs.min_follower_count, 1_000);
    assert_eq!(prefs.max_follower_count, 100_000);
    assert!((prefs.budget_min - 800.0).abs() < 1e-9);
    assert!((prefs.budget_max - 1200.0).abs() < 1e-9);
    assert_eq!(prefs.locations, vec!["any"]);
}

#[test]
fn test_update_request_partial_deserialization() {
    // A payload carrying only engagementRate leaves every other field None,
    // which the store binds as NULL so COALESCE keeps stored values.
    let req: UpdateProfileRequest =
        serde_json::from_str(r#"{"engagementRate": 4.5}"#).unwrap();

    assert_eq!(req.engagement_rate, Some(4.5));
    assert!(req.categories.is_none());
    assert!(req.platforms.is_none());
    assert!(req.demographics.is_none());
    assert!(req.average_views.is_none());
    assert!(req.is_verified.is_none());
    assert!(req.portfolio.is_none());
}

#[test]
fn test_update_request_validation_bounds() {
    use validator::Validate;

    let mut req = UpdateProfileRequest {
        engagement_rate: Some(150.0),
        ..Default::default()
    };
    assert!(req.validate().is_err());

    req.engagement_rate = Some(5.5);
    assert!(req.validate().is_ok());

    req.average_views = Some(-1);
    assert!(req.validate().is_err());
}

#[test]
fn test_factor_breakdown_wire_names() {
    let c = candidate(80_000, CreatorTier::Rising, true);
    let (_, factors) =
        calculate_match_score(&c, &fashion_preferences(), &MatchWeights::default());

    let json = serde_json::to_value(factors).unwrap();
    assert!(json.get("categoryMatch").is_some());
    assert!(json.get("demographicMatch").is_some());
    assert_eq!(json["demographicMatch"], 0.0);
    assert_eq!(json["locationMatch"], 0.0);
}
