use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::PlatformAccount;

/// Query parameters for the matches endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchQuery {
    #[serde(default = "default_limit")]
    pub limit: u16,
}

impl Default for MatchQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

fn default_limit() -> u16 {
    20
}

/// Partial profile update payload.
///
/// Every field is optional; absent fields are left untouched by the
/// shallow-merge upsert.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub platforms: Option<Vec<PlatformAccount>>,
    #[serde(default)]
    pub demographics: Option<serde_json::Value>,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(alias = "engagement_rate", rename = "engagementRate", default)]
    pub engagement_rate: Option<f64>,
    #[validate(range(min = 0))]
    #[serde(alias = "average_views", rename = "averageViews", default)]
    pub average_views: Option<i64>,
    #[serde(alias = "is_verified", rename = "isVerified", default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub portfolio: Option<serde_json::Value>,
}
