use crate::models::{BrandPreferences, Creator};

/// Coarse eligibility filter applied before scoring.
///
/// A creator is a scoring candidate iff they are active, carry a creator
/// role, and their follower count lies within the campaign's preferred range.
/// The store applies the same constraints in SQL; this is the in-process
/// counterpart used by the single-creator re-scoring path.
#[inline]
pub fn is_eligible(creator: &Creator, preferences: &BrandPreferences) -> bool {
    if !creator.is_active {
        return false;
    }

    if creator.role != "creator" && creator.role != "user" {
        return false;
    }

    creator.follower_count >= preferences.min_follower_count
        && creator.follower_count <= preferences.max_follower_count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreatorTier;
    use uuid::Uuid;

    fn test_creator(followers: i64, role: &str, active: bool) -> Creator {
        Creator {
            id: Uuid::new_v4(),
            username: "creator".to_string(),
            role: role.to_string(),
            platform: "instagram".to_string(),
            profile_image: None,
            follower_count: followers,
            tier: CreatorTier::Standard,
            completed_campaigns: 0,
            is_active: active,
        }
    }

    fn test_preferences() -> BrandPreferences {
        BrandPreferences {
            campaign_id: Uuid::new_v4(),
            preferred_categories: vec![],
            required_platforms: vec![],
            min_follower_count: 1_000,
            max_follower_count: 100_000,
            demographics: None,
            budget_min: 0.0,
            budget_max: 0.0,
            locations: vec![],
        }
    }

    #[test]
    fn test_eligible_creator() {
        assert!(is_eligible(&test_creator(50_000, "creator", true), &test_preferences()));
        assert!(is_eligible(&test_creator(50_000, "user", true), &test_preferences()));
    }

    #[test]
    fn test_inactive_creator_excluded() {
        assert!(!is_eligible(&test_creator(50_000, "creator", false), &test_preferences()));
    }

    #[test]
    fn test_brand_role_excluded() {
        assert!(!is_eligible(&test_creator(50_000, "brand", true), &test_preferences()));
    }

    #[test]
    fn test_followers_outside_range_excluded() {
        let prefs = test_preferences();
        assert!(!is_eligible(&test_creator(0, "creator", true), &prefs));
        assert!(!is_eligible(&test_creator(999, "creator", true), &prefs));
        assert!(!is_eligible(&test_creator(100_001, "creator", true), &prefs));
        // Bounds are inclusive
        assert!(is_eligible(&test_creator(1_000, "creator", true), &prefs));
        assert!(is_eligible(&test_creator(100_000, "creator", true), &prefs));
    }
}
