use serde::{Deserialize, Serialize};

use crate::models::domain::CreatorMatch;

/// Response for the matches endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchListResponse {
    pub matches: Vec<CreatorMatch>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Response for the recommendations endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(rename = "topRecommended")]
    pub top_recommended: Vec<CreatorMatch>,
    #[serde(rename = "otherMatches")]
    pub other_matches: Vec<CreatorMatch>,
    #[serde(rename = "totalFound")]
    pub total_found: usize,
    #[serde(rename = "averageScore")]
    pub average_score: f64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
