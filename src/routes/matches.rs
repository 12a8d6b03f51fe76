use crate::core::weights::{expand_priorities, WeightVector};
use crate::core::{MatchMode, Matcher};
use crate::models::{
    ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse, UpdateWeightsRequest,
    WeightsResponse,
};
use crate::services::{AppwriteResolver, ResolverError};
use actix_web::{web, HttpResponse, Responder};
use std::sync::{Arc, PoisonError, RwLock};
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<AppwriteResolver>,
    /// Live weight vector; updated with validate-then-swap so readers never
    /// observe an invalid sum.
    pub weights: Arc<RwLock<WeightVector>>,
    pub matcher: Matcher,
    /// Limit applied when the request does not carry one.
    pub default_limit: u16,
    /// Cap on any requested limit.
    pub max_limit: u16,
}

impl AppState {
    fn weights_snapshot(&self) -> WeightVector {
        self.weights
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/weights", web::get().to(get_weights))
        .route("/weights", web::put().to(update_weights));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "limit": 20,
///   "mode": "standard" | "priority"
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_id = &req.user_id;
    let limit = resolve_limit(req.limit, state.default_limit, state.max_limit);

    tracing::info!(
        "Finding matches for user: {}, limit: {}, mode: {:?}",
        user_id,
        limit,
        req.mode
    );

    // Requester's own bundle is mandatory
    let requester = match state.resolver.get_bundle(user_id).await {
        Ok(bundle) => bundle,
        Err(ResolverError::ProfileNotFound(_)) => {
            tracing::info!("Bundle not found for requester {}", user_id);
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Profile not found".to_string(),
                message: format!("No attribute bundle for user {}", user_id),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch bundle for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch user bundle".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // Candidate bundles; incomplete ones are already filtered by the resolver
    let candidates = match state.resolver.get_all_bundles(user_id).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to query candidates for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to query candidates".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    tracing::debug!("Resolved {} candidates for {}", candidates.len(), user_id);

    let weights = state.weights_snapshot();
    let outcome = state
        .matcher
        .find_matches(&requester, candidates, &weights, req.mode, limit);

    let response = FindMatchesResponse {
        total_candidates: outcome.total_candidates,
        matches: outcome.matches,
    };

    tracing::info!(
        "Returning {} matches for user {} (from {} candidates)",
        response.matches.len(),
        user_id,
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// Current weight vector snapshot
///
/// GET /api/v1/weights
async fn get_weights(state: web::Data<AppState>) -> impl Responder {
    let snapshot = state.weights_snapshot().snapshot();
    HttpResponse::Ok().json(WeightsResponse { weights: snapshot })
}

/// Update the weight vector
///
/// PUT /api/v1/weights
///
/// Body carries either `weights` (partial or full factor map) or
/// `priorities` (six-category schema). The new vector is validated before
/// the swap; an invalid sum leaves the previous vector untouched.
async fn update_weights(
    state: web::Data<AppState>,
    req: web::Json<UpdateWeightsRequest>,
) -> impl Responder {
    let current = state.weights_snapshot();

    let updated = match build_updated_vector(&current, &req) {
        Ok(vector) => vector,
        Err(message) => {
            tracing::info!("Rejected weight update: {}", message);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid weights".to_string(),
                message,
                status_code: 400,
            });
        }
    };

    {
        let mut live = state
            .weights
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *live = updated.clone();
    }

    tracing::info!("Weight vector updated");

    HttpResponse::Ok().json(WeightsResponse {
        weights: updated.snapshot(),
    })
}

/// Requested limit capped at the configured maximum; a missing limit takes
/// the configured default.
fn resolve_limit(requested: Option<u16>, default_limit: u16, max_limit: u16) -> usize {
    requested.unwrap_or(default_limit).min(max_limit) as usize
}

/// Validate-then-build the replacement vector; the live state is only
/// touched after this succeeds.
fn build_updated_vector(
    current: &WeightVector,
    req: &UpdateWeightsRequest,
) -> Result<WeightVector, String> {
    match (&req.weights, &req.priorities) {
        (Some(partial), None) => current.merge(partial).map_err(|e| e.to_string()),
        (None, Some(priorities)) => {
            let expanded = expand_priorities(priorities).map_err(|e| e.to_string())?;
            // Merge the full expanded map so the configured tolerance sticks
            current.merge(&expanded.snapshot()).map_err(|e| e.to_string())
        }
        (Some(_), Some(_)) => {
            Err("Provide either 'weights' or 'priorities', not both".to_string())
        }
        (None, None) => Err("Provide 'weights' or 'priorities'".to_string()),
    }
}
