// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use filters::is_eligible;
pub use matcher::{summarize_recommendations, Matcher, RankResult, RecommendationSummary};
pub use scoring::{calculate_match_score, RECOMMENDED_THRESHOLD};
