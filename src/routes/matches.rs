use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    ErrorResponse, HealthResponse, MatchListResponse, MatchQuery, RecommendationsResponse,
    UpdateProfileRequest,
};
use crate::services::{EngineError, MatchingEngine, PostgresStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: MatchingEngine,
    pub store: Arc<PostgresStore>,
    pub max_limit: u16,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/campaigns/{campaign_id}/matches", web::get().to(get_matches))
        .route(
            "/campaigns/{campaign_id}/recommendations",
            web::get().to(get_recommendations),
        )
        .route("/creators/{creator_id}/profile", web::put().to(update_profile));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// GET /api/v1/campaigns/{campaign_id}/matches?limit=20
///
/// Triggers a fresh scoring run for the campaign and returns every persisted
/// matching result, ranked by descending score.
async fn get_matches(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<MatchQuery>,
) -> impl Responder {
    let campaign_id = path.into_inner();
    let limit = query.limit.min(state.max_limit) as usize;

    tracing::info!("Finding matches for campaign {}, limit {}", campaign_id, limit);

    match state.engine.find_matching_creators(campaign_id, limit).await {
        Ok(matches) => {
            tracing::info!(
                "Returning {} matches for campaign {}",
                matches.len(),
                campaign_id
            );

            let total_results = matches.len();
            HttpResponse::Ok().json(MatchListResponse {
                matches,
                total_results,
            })
        }
        Err(e) => engine_error_response(&e, "Failed to find matches"),
    }
}

/// Recommendations endpoint
///
/// GET /api/v1/campaigns/{campaign_id}/recommendations
///
/// Runs matching with a fixed limit of 10 and partitions the results into
/// recommended and other matches, with the average score across everything
/// returned.
async fn get_recommendations(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let campaign_id = path.into_inner();

    match state.engine.get_creator_recommendations(campaign_id).await {
        Ok(summary) => HttpResponse::Ok().json(RecommendationsResponse {
            top_recommended: summary.top_recommended,
            other_matches: summary.other_matches,
            total_found: summary.total_found,
            average_score: summary.average_score,
        }),
        Err(e) => engine_error_response(&e, "Failed to build recommendations"),
    }
}

/// Profile update endpoint
///
/// PUT /api/v1/creators/{creator_id}/profile
///
/// Shallow-merges the partial payload into the creator's profile and
/// re-scores the creator against every active campaign. Returns 204 on
/// success.
async fn update_profile(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateProfileRequest>,
) -> impl Responder {
    let creator_id = path.into_inner();

    if let Err(errors) = req.validate() {
        tracing::info!(
            "Validation failed for profile update on creator {}: {}",
            creator_id,
            errors
        );
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.engine.update_creator_profile(creator_id, &req).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => engine_error_response(&e, "Failed to update profile"),
    }
}

/// Map engine errors onto HTTP status codes with a JSON body.
fn engine_error_response(error: &EngineError, context: &str) -> HttpResponse {
    match error {
        EngineError::NotFound(what) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: what.clone(),
            status_code: 404,
        }),
        EngineError::Store(e) => {
            tracing::error!("{}: {}", context, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: context.to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
