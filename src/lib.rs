//! Creator Match - campaign/creator matching service
//!
//! Scores a pool of creator profiles against a brand campaign's preferences
//! across weighted factors, persists the ranked results, and serves
//! recommendations over HTTP.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{calculate_match_score, summarize_recommendations, Matcher, RECOMMENDED_THRESHOLD};
pub use models::{
    BrandPreferences, Campaign, Candidate, Creator, CreatorMatch, CreatorProfile, CreatorTier,
    FactorBreakdown, MatchWeights, ScoredCandidate,
};
