use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A brand campaign creators can be matched against.
///
/// Campaigns are created by the brand-side flow; this service only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub compensation: f64,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Coarse creator ranking used as a scoring bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatorTier {
    Standard,
    Rising,
    Legendary,
}

impl CreatorTier {
    /// Bonus points folded into the portfolio factor.
    pub fn bonus(self) -> f64 {
        match self {
            CreatorTier::Standard => 0.0,
            CreatorTier::Rising => 5.0,
            CreatorTier::Legendary => 10.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CreatorTier::Standard => "standard",
            CreatorTier::Rising => "rising",
            CreatorTier::Legendary => "legendary",
        }
    }
}

impl std::str::FromStr for CreatorTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(CreatorTier::Standard),
            "rising" => Ok(CreatorTier::Rising),
            "legendary" => Ok(CreatorTier::Legendary),
            other => Err(format!("unknown creator tier: {}", other)),
        }
    }
}

/// A content-producing platform user eligible for campaign matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creator {
    pub id: Uuid,
    pub username: String,
    pub role: String,
    pub platform: String,
    #[serde(rename = "profileImage", default)]
    pub profile_image: Option<String>,
    #[serde(rename = "followerCount")]
    pub follower_count: i64,
    pub tier: CreatorTier,
    #[serde(rename = "completedCampaigns")]
    pub completed_campaigns: i32,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// A platform account listed on a creator profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformAccount {
    pub platform: String,
    #[serde(default)]
    pub handle: Option<String>,
}

/// Extended creator profile used for scoring.
///
/// One-to-one with `Creator`; engagement and view data may be absent for
/// creators who never connected analytics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatorProfile {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<PlatformAccount>,
    #[serde(default)]
    pub demographics: Option<serde_json::Value>,
    #[serde(rename = "engagementRate", default)]
    pub engagement_rate: Option<f64>,
    #[serde(rename = "averageViews", default)]
    pub average_views: Option<i64>,
    #[serde(rename = "isVerified", default)]
    pub is_verified: bool,
    #[serde(default)]
    pub portfolio: Option<serde_json::Value>,
    #[serde(rename = "matchScore", default)]
    pub match_score: Option<f64>,
}

impl CreatorProfile {
    /// Platform names from the linked accounts, for intersection against a
    /// campaign's required platforms.
    pub fn platform_names(&self) -> Vec<&str> {
        self.platforms.iter().map(|p| p.platform.as_str()).collect()
    }
}

/// A scoring candidate: the creator joined with their profile.
///
/// Creators without a profile row are scored against an empty profile.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub creator: Creator,
    pub profile: CreatorProfile,
}

/// Matching criteria for one campaign. At most one record per campaign,
/// lazily created with defaults the first time matching runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandPreferences {
    #[serde(rename = "campaignId")]
    pub campaign_id: Uuid,
    #[serde(rename = "preferredCategories")]
    pub preferred_categories: Vec<String>,
    #[serde(rename = "requiredPlatforms")]
    pub required_platforms: Vec<String>,
    #[serde(rename = "minFollowerCount")]
    pub min_follower_count: i64,
    #[serde(rename = "maxFollowerCount")]
    pub max_follower_count: i64,
    #[serde(default)]
    pub demographics: Option<serde_json::Value>,
    #[serde(rename = "budgetMin")]
    pub budget_min: f64,
    #[serde(rename = "budgetMax")]
    pub budget_max: f64,
    pub locations: Vec<String>,
}

impl BrandPreferences {
    /// Default preferences derived from the campaign, used when a brand has
    /// not configured matching criteria yet.
    pub fn defaults_for(campaign: &Campaign) -> Self {
        Self {
            campaign_id: campaign.id,
            preferred_categories: vec![campaign.category.clone()],
            required_platforms: vec!["instagram".to_string(), "youtube".to_string()],
            min_follower_count: 1_000,
            max_follower_count: 100_000,
            demographics: Some(serde_json::json!({
                "ageRange": { "min": 18, "max": 35 },
                "gender": "any",
            })),
            budget_min: campaign.compensation * 0.8,
            budget_max: campaign.compensation * 1.2,
            locations: vec!["any".to_string()],
        }
    }
}

/// Fixed-shape breakdown of the weighted scoring factors.
///
/// `demographic_match` and `location_match` are carried in the record but not
/// computed by the current algorithm; they stay 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    #[serde(rename = "categoryMatch")]
    pub category_match: f64,
    #[serde(rename = "platformMatch")]
    pub platform_match: f64,
    #[serde(rename = "followerMatch")]
    pub follower_match: f64,
    #[serde(rename = "engagementMatch")]
    pub engagement_match: f64,
    #[serde(rename = "portfolioMatch")]
    pub portfolio_match: f64,
    #[serde(rename = "demographicMatch")]
    pub demographic_match: f64,
    #[serde(rename = "locationMatch")]
    pub location_match: f64,
}

/// A candidate with its computed score, before persistence.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub creator_id: Uuid,
    pub score: f64,
    pub factors: FactorBreakdown,
    pub is_recommended: bool,
}

/// A persisted matching result joined with creator and profile display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatorMatch {
    #[serde(rename = "creatorId")]
    pub creator_id: Uuid,
    pub username: String,
    pub platform: String,
    #[serde(rename = "profileImage")]
    pub profile_image: Option<String>,
    #[serde(rename = "followerCount")]
    pub follower_count: i64,
    pub tier: CreatorTier,
    #[serde(rename = "completedCampaigns")]
    pub completed_campaigns: i32,
    #[serde(rename = "engagementRate")]
    pub engagement_rate: Option<f64>,
    #[serde(rename = "averageViews")]
    pub average_views: Option<i64>,
    #[serde(rename = "isVerified")]
    pub is_verified: bool,
    pub categories: Vec<String>,
    pub platforms: Vec<PlatformAccount>,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    pub factors: FactorBreakdown,
    #[serde(rename = "isRecommended")]
    pub is_recommended: bool,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Factor weights for the scoring formula.
///
/// Each factor is capped at its weight; the portfolio factor additionally
/// absorbs the tier and verification bonuses.
#[derive(Debug, Clone, Copy)]
pub struct MatchWeights {
    pub category: f64,
    pub platform: f64,
    pub follower: f64,
    pub engagement: f64,
    pub portfolio: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            category: 25.0,
            platform: 20.0,
            follower: 15.0,
            engagement: 15.0,
            portfolio: 10.0,
        }
    }
}
