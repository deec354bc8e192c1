use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::core::{is_eligible, summarize_recommendations, Matcher, RecommendationSummary};
use crate::models::{Campaign, CreatorMatch, UpdateProfileRequest};
use crate::services::postgres::{PostgresStore, StoreError};

/// Errors surfaced by the matching engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Orchestrates a matching run: fetch campaign and preferences, score the
/// eligible pool, persist the top results, and re-read them for display.
///
/// The engine holds no state across calls beyond the store handle and the
/// configured weights; every run re-reads what it needs.
#[derive(Clone)]
pub struct MatchingEngine {
    store: Arc<PostgresStore>,
    matcher: Matcher,
}

impl MatchingEngine {
    pub fn new(store: Arc<PostgresStore>, matcher: Matcher) -> Self {
        Self { store, matcher }
    }

    /// Run a fresh scoring pass for a campaign and return the full ranked
    /// result list joined with creator display data.
    ///
    /// `limit` bounds how many results are persisted, not the candidate pool.
    /// Brand preferences are lazily created with campaign-derived defaults on
    /// first use. Upserts are keyed on (campaign, creator) so repeated runs
    /// never duplicate rows; there is no transaction around the batch, so a
    /// mid-run failure leaves already-written rows in place.
    pub async fn find_matching_creators(
        &self,
        campaign_id: Uuid,
        limit: usize,
    ) -> Result<Vec<CreatorMatch>, EngineError> {
        let campaign = self
            .store
            .get_campaign(campaign_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("campaign {}", campaign_id)))?;

        let preferences = self.store.get_or_create_brand_preferences(&campaign).await?;

        let candidates = self
            .store
            .list_eligible_creators(
                preferences.min_follower_count,
                preferences.max_follower_count,
            )
            .await?;

        tracing::debug!(
            "Scoring {} candidates for campaign {}",
            candidates.len(),
            campaign_id
        );

        let ranked = self.matcher.rank(&preferences, candidates, limit);

        for scored in &ranked.scored {
            if let Err(e) = self.store.upsert_matching_result(campaign_id, scored).await {
                tracing::error!(
                    "Failed to persist result for campaign {} creator {}: {}",
                    campaign_id,
                    scored.creator_id,
                    e
                );
                return Err(e.into());
            }
        }

        tracing::info!(
            "Scored campaign {}: persisted {} of {} candidates",
            campaign_id,
            ranked.scored.len(),
            ranked.total_candidates
        );

        Ok(self.store.list_matching_results(campaign_id).await?)
    }

    /// Ranked matches for a campaign partitioned into recommended and other,
    /// with the mean score across everything returned.
    pub async fn get_creator_recommendations(
        &self,
        campaign_id: Uuid,
    ) -> Result<RecommendationSummary, EngineError> {
        let matches = self.find_matching_creators(campaign_id, 10).await?;
        Ok(summarize_recommendations(matches))
    }

    /// Shallow-merge a profile update, then re-score the creator against
    /// every active campaign.
    ///
    /// The recalculation is sequential and unbounded in the number of active
    /// campaigns; a failure partway through is logged with context and
    /// propagated, leaving earlier upserts in place.
    pub async fn update_creator_profile(
        &self,
        creator_id: Uuid,
        update: &UpdateProfileRequest,
    ) -> Result<(), EngineError> {
        self.store
            .get_creator(creator_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("creator {}", creator_id)))?;

        self.store.upsert_creator_profile(creator_id, update).await?;

        let campaigns = self.store.list_active_campaigns().await?;
        tracing::info!(
            "Profile updated for creator {}; re-scoring against {} active campaigns",
            creator_id,
            campaigns.len()
        );

        for campaign in &campaigns {
            if let Err(e) = self.rescore_creator(campaign, creator_id).await {
                tracing::error!(
                    "Re-scoring failed for creator {} on campaign {}: {}",
                    creator_id,
                    campaign.id,
                    e
                );
                return Err(e);
            }
        }

        Ok(())
    }

    /// Score one creator against one campaign and upsert the single result.
    /// Ineligible creators are skipped without touching the store.
    async fn rescore_creator(
        &self,
        campaign: &Campaign,
        creator_id: Uuid,
    ) -> Result<(), EngineError> {
        let preferences = self.store.get_or_create_brand_preferences(campaign).await?;

        let candidate = self
            .store
            .get_candidate(creator_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("creator {}", creator_id)))?;

        if !is_eligible(&candidate.creator, &preferences) {
            tracing::debug!(
                "Creator {} not eligible for campaign {}, skipping",
                creator_id,
                campaign.id
            );
            return Ok(());
        }

        let scored = self.matcher.score(&candidate, &preferences);
        self.store.upsert_matching_result(campaign.id, &scored).await?;

        Ok(())
    }
}
