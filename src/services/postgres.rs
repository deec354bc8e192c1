use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    BrandPreferences, Campaign, Candidate, Creator, CreatorMatch, CreatorProfile, CreatorTier,
    PlatformAccount, ScoredCandidate, UpdateProfileRequest,
};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid row data: {0}")]
    InvalidRow(String),
}

/// PostgreSQL client owning the matching tables.
///
/// Campaigns and creators are written by the platform's CRUD layer; this
/// client reads them and owns brand_preferences and matching_results.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Fetch a campaign by id.
    pub async fn get_campaign(&self, id: Uuid) -> Result<Option<Campaign>, StoreError> {
        let query = r#"
            SELECT id, title, category, compensation, status, created_at
            FROM campaigns
            WHERE id = $1
        "#;

        let row = sqlx::query(query).bind(id).fetch_optional(&self.pool).await?;

        row.map(|r| campaign_from_row(&r)).transpose()
    }

    /// List campaigns open for matching.
    pub async fn list_active_campaigns(&self) -> Result<Vec<Campaign>, StoreError> {
        let query = r#"
            SELECT id, title, category, compensation, status, created_at
            FROM campaigns
            WHERE status = 'active'
            ORDER BY created_at
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        rows.iter().map(campaign_from_row).collect()
    }

    /// Fetch a creator by id.
    pub async fn get_creator(&self, id: Uuid) -> Result<Option<Creator>, StoreError> {
        let query = r#"
            SELECT id, username, role, platform, profile_image, follower_count,
                   tier, completed_campaigns, is_active
            FROM creators
            WHERE id = $1
        "#;

        let row = sqlx::query(query).bind(id).fetch_optional(&self.pool).await?;

        row.map(|r| creator_from_row(&r)).transpose()
    }

    /// Load the brand preferences for a campaign, creating a record with
    /// campaign-derived defaults on first use.
    ///
    /// INSERT ... ON CONFLICT DO NOTHING followed by a re-read keeps the
    /// at-most-one-record-per-campaign invariant under concurrent runs.
    pub async fn get_or_create_brand_preferences(
        &self,
        campaign: &Campaign,
    ) -> Result<BrandPreferences, StoreError> {
        if let Some(prefs) = self.get_brand_preferences(campaign.id).await? {
            return Ok(prefs);
        }

        let defaults = BrandPreferences::defaults_for(campaign);

        let query = r#"
            INSERT INTO brand_preferences (
                campaign_id, preferred_categories, required_platforms,
                min_follower_count, max_follower_count, demographics,
                budget_min, budget_max, locations, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW())
            ON CONFLICT (campaign_id) DO NOTHING
        "#;

        sqlx::query(query)
            .bind(defaults.campaign_id)
            .bind(&defaults.preferred_categories)
            .bind(&defaults.required_platforms)
            .bind(defaults.min_follower_count)
            .bind(defaults.max_follower_count)
            .bind(defaults.demographics.as_ref().map(Json))
            .bind(defaults.budget_min)
            .bind(defaults.budget_max)
            .bind(&defaults.locations)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Created default brand preferences for campaign {}", campaign.id);

        // Re-read so a losing concurrent insert still returns the stored row
        self.get_brand_preferences(campaign.id)
            .await?
            .ok_or_else(|| StoreError::InvalidRow("brand preferences vanished after insert".to_string()))
    }

    async fn get_brand_preferences(
        &self,
        campaign_id: Uuid,
    ) -> Result<Option<BrandPreferences>, StoreError> {
        let query = r#"
            SELECT campaign_id, preferred_categories, required_platforms,
                   min_follower_count, max_follower_count, demographics,
                   budget_min, budget_max, locations
            FROM brand_preferences
            WHERE campaign_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(campaign_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| BrandPreferences {
            campaign_id: r.get("campaign_id"),
            preferred_categories: r.get("preferred_categories"),
            required_platforms: r.get("required_platforms"),
            min_follower_count: r.get("min_follower_count"),
            max_follower_count: r.get("max_follower_count"),
            demographics: r.get("demographics"),
            budget_min: r.get("budget_min"),
            budget_max: r.get("budget_max"),
            locations: r.get("locations"),
        }))
    }

    /// List creators eligible for scoring: active, creator role, follower
    /// count within the preferred range. Profiles are left-joined; creators
    /// without one are scored against an empty profile.
    pub async fn list_eligible_creators(
        &self,
        min_followers: i64,
        max_followers: i64,
    ) -> Result<Vec<Candidate>, StoreError> {
        let query = r#"
            SELECT c.id, c.username, c.role, c.platform, c.profile_image,
                   c.follower_count, c.tier, c.completed_campaigns, c.is_active,
                   p.categories, p.platforms, p.demographics, p.engagement_rate,
                   p.average_views, p.is_verified, p.portfolio, p.match_score
            FROM creators c
            LEFT JOIN creator_profiles p ON p.creator_id = c.id
            WHERE c.is_active = TRUE
              AND c.role IN ('creator', 'user')
              AND c.follower_count BETWEEN $1 AND $2
        "#;

        let rows = sqlx::query(query)
            .bind(min_followers)
            .bind(max_followers)
            .fetch_all(&self.pool)
            .await?;

        let candidates: Result<Vec<Candidate>, StoreError> = rows
            .iter()
            .map(|row| {
                Ok(Candidate {
                    creator: creator_from_row(row)?,
                    profile: profile_from_row(row),
                })
            })
            .collect();

        candidates
    }

    /// Fetch one creator joined with their profile, for the single-creator
    /// re-scoring path.
    pub async fn get_candidate(&self, creator_id: Uuid) -> Result<Option<Candidate>, StoreError> {
        let query = r#"
            SELECT c.id, c.username, c.role, c.platform, c.profile_image,
                   c.follower_count, c.tier, c.completed_campaigns, c.is_active,
                   p.categories, p.platforms, p.demographics, p.engagement_rate,
                   p.average_views, p.is_verified, p.portfolio, p.match_score
            FROM creators c
            LEFT JOIN creator_profiles p ON p.creator_id = c.id
            WHERE c.id = $1
        "#;

        let row = sqlx::query(query)
            .bind(creator_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| {
            Ok(Candidate {
                creator: creator_from_row(&r)?,
                profile: profile_from_row(&r),
            })
        })
        .transpose()
    }

    /// Persist one scored candidate for a campaign.
    ///
    /// Upsert keyed on (campaign_id, creator_id): repeated runs update the
    /// existing row in place. The workflow `status` column belongs to the
    /// contact flow and is never touched on update.
    pub async fn upsert_matching_result(
        &self,
        campaign_id: Uuid,
        scored: &ScoredCandidate,
    ) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO matching_results (
                id, campaign_id, creator_id, score, factors,
                is_recommended, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, 'pending', NOW(), NOW())
            ON CONFLICT (campaign_id, creator_id)
            DO UPDATE SET
                score = EXCLUDED.score,
                factors = EXCLUDED.factors,
                is_recommended = EXCLUDED.is_recommended,
                updated_at = NOW()
        "#;

        sqlx::query(query)
            .bind(Uuid::new_v4())
            .bind(campaign_id)
            .bind(scored.creator_id)
            .bind(scored.score)
            .bind(Json(&scored.factors))
            .bind(scored.is_recommended)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Upserted matching result: campaign {} creator {} score {}",
            campaign_id,
            scored.creator_id,
            scored.score
        );

        Ok(())
    }

    /// List all matching results for a campaign joined with creator and
    /// profile display fields, ordered by descending score.
    pub async fn list_matching_results(
        &self,
        campaign_id: Uuid,
    ) -> Result<Vec<CreatorMatch>, StoreError> {
        let query = r#"
            SELECT r.creator_id, r.score, r.factors, r.is_recommended, r.status,
                   r.created_at,
                   c.username, c.platform, c.profile_image, c.follower_count,
                   c.tier, c.completed_campaigns,
                   p.engagement_rate, p.average_views, p.is_verified,
                   p.categories, p.platforms
            FROM matching_results r
            JOIN creators c ON c.id = r.creator_id
            LEFT JOIN creator_profiles p ON p.creator_id = r.creator_id
            WHERE r.campaign_id = $1
            ORDER BY r.score DESC
        "#;

        let rows = sqlx::query(query)
            .bind(campaign_id)
            .fetch_all(&self.pool)
            .await?;

        let matches: Result<Vec<CreatorMatch>, StoreError> = rows
            .iter()
            .map(|row| {
                let tier: String = row.get("tier");
                let tier: CreatorTier = tier
                    .parse()
                    .map_err(StoreError::InvalidRow)?;
                let factors: Json<crate::models::FactorBreakdown> = row.get("factors");
                let platforms: Option<Json<Vec<PlatformAccount>>> = row.get("platforms");

                Ok(CreatorMatch {
                    creator_id: row.get("creator_id"),
                    username: row.get("username"),
                    platform: row.get("platform"),
                    profile_image: row.get("profile_image"),
                    follower_count: row.get("follower_count"),
                    tier,
                    completed_campaigns: row.get("completed_campaigns"),
                    engagement_rate: row.get("engagement_rate"),
                    average_views: row.get("average_views"),
                    is_verified: row.get::<Option<bool>, _>("is_verified").unwrap_or(false),
                    categories: row
                        .get::<Option<Vec<String>>, _>("categories")
                        .unwrap_or_default(),
                    platforms: platforms.map(|p| p.0).unwrap_or_default(),
                    match_score: row.get("score"),
                    factors: factors.0,
                    is_recommended: row.get("is_recommended"),
                    status: row.get("status"),
                    created_at: row.get("created_at"),
                })
            })
            .collect();

        matches
    }

    /// Shallow-merge upsert of a creator profile.
    ///
    /// Absent payload fields bind NULL and COALESCE keeps the stored value;
    /// `updated_at` is always refreshed.
    pub async fn upsert_creator_profile(
        &self,
        creator_id: Uuid,
        update: &UpdateProfileRequest,
    ) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO creator_profiles (
                creator_id, categories, platforms, demographics,
                engagement_rate, average_views, is_verified, portfolio,
                updated_at
            )
            VALUES (
                $1,
                COALESCE($2, ARRAY[]::text[]),
                COALESCE($3, '[]'::jsonb),
                $4, $5, $6,
                COALESCE($7, FALSE),
                $8,
                NOW()
            )
            ON CONFLICT (creator_id)
            DO UPDATE SET
                categories = COALESCE($2, creator_profiles.categories),
                platforms = COALESCE($3, creator_profiles.platforms),
                demographics = COALESCE($4, creator_profiles.demographics),
                engagement_rate = COALESCE($5, creator_profiles.engagement_rate),
                average_views = COALESCE($6, creator_profiles.average_views),
                is_verified = COALESCE($7, creator_profiles.is_verified),
                portfolio = COALESCE($8, creator_profiles.portfolio),
                updated_at = NOW()
        "#;

        sqlx::query(query)
            .bind(creator_id)
            .bind(update.categories.as_ref())
            .bind(update.platforms.as_ref().map(Json))
            .bind(update.demographics.as_ref().map(Json))
            .bind(update.engagement_rate)
            .bind(update.average_views)
            .bind(update.is_verified)
            .bind(update.portfolio.as_ref().map(Json))
            .execute(&self.pool)
            .await?;

        tracing::debug!("Upserted profile for creator {}", creator_id);

        Ok(())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn campaign_from_row(row: &sqlx::postgres::PgRow) -> Result<Campaign, StoreError> {
    Ok(Campaign {
        id: row.get("id"),
        title: row.get("title"),
        category: row.get("category"),
        compensation: row.get("compensation"),
        status: row.get("status"),
        created_at: row.get("created_at"),
    })
}

fn creator_from_row(row: &sqlx::postgres::PgRow) -> Result<Creator, StoreError> {
    let tier: String = row.get("tier");
    let tier: CreatorTier = tier.parse().map_err(StoreError::InvalidRow)?;

    Ok(Creator {
        id: row.get("id"),
        username: row.get("username"),
        role: row.get("role"),
        platform: row.get("platform"),
        profile_image: row.get("profile_image"),
        follower_count: row.get("follower_count"),
        tier,
        completed_campaigns: row.get("completed_campaigns"),
        is_active: row.get("is_active"),
    })
}

fn profile_from_row(row: &sqlx::postgres::PgRow) -> CreatorProfile {
    let platforms: Option<Json<Vec<PlatformAccount>>> = row.get("platforms");

    CreatorProfile {
        categories: row
            .get::<Option<Vec<String>>, _>("categories")
            .unwrap_or_default(),
        platforms: platforms.map(|p| p.0).unwrap_or_default(),
        demographics: row.get("demographics"),
        engagement_rate: row.get("engagement_rate"),
        average_views: row.get("average_views"),
        is_verified: row.get::<Option<bool>, _>("is_verified").unwrap_or(false),
        portfolio: row.get("portfolio"),
        match_score: row.get("match_score"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_parsing() {
        assert_eq!("rising".parse::<CreatorTier>().unwrap(), CreatorTier::Rising);
        assert!("superstar".parse::<CreatorTier>().is_err());
    }
}
