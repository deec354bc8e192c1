// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BrandPreferences, Campaign, Candidate, Creator, CreatorMatch, CreatorProfile, CreatorTier,
    FactorBreakdown, MatchWeights, PlatformAccount, ScoredCandidate,
};
pub use requests::{MatchQuery, UpdateProfileRequest};
pub use responses::{ErrorResponse, HealthResponse, MatchListResponse, RecommendationsResponse};
