// Axum API Server Module
//
// Purpose: thin JSON transport over PredictionService::recommend
// Inference is microseconds of CPU work, so handlers call it inline.

#[cfg(feature = "api")]
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use crate::config::ServiceConfig;

#[cfg(feature = "api")]
use crate::error::{RecommendError, ValidationError};

#[cfg(feature = "api")]
use crate::features::{Feature, RawMeasurements};

#[cfg(feature = "api")]
use crate::service::{PredictionResult, PredictionService};

/// Largest batch accepted by `/api/recommend/batch`
pub const MAX_BATCH_SIZE: usize = 1_000;

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
}

#[cfg(feature = "api")]
impl AppState {
    /// Load classifier and catalog. Fails if either cannot be initialised.
    pub fn new(config: &ServiceConfig) -> anyhow::Result<Self> {
        let service = config.build_service()?;
        Ok(Self::from_service(service))
    }

    pub fn from_service(service: PredictionService) -> Self {
        Self { service: Arc::new(service) }
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Input domains and dashboard defaults
        .route("/api/features", get(get_features))

        // Catalog endpoints
        .route("/api/crops", get(list_crops))
        .route("/api/crops/:label", get(get_crop))

        // Recommendation endpoints
        .route("/api/recommend", post(recommend))
        .route("/api/recommend/batch", post(recommend_batch))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive()) // Allow all origins (adjust for production)
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "classes": state.service.labels().len(),
    }))
}

#[cfg(feature = "api")]
async fn get_features() -> Json<serde_json::Value> {
    let data: Vec<serde_json::Value> = Feature::ALL
        .iter()
        .map(|f| {
            let domain = f.domain();
            serde_json::json!({
                "field": f.name(),
                "column": f.column(),
                "unit": f.unit(),
                "min": domain.min,
                "max": domain.max,
                "default": f.dashboard_default(),
            })
        })
        .collect();

    Json(serde_json::json!({
        "rows": data.len(),
        "data": data,
    }))
}

#[cfg(feature = "api")]
async fn list_crops(State(state): State<AppState>) -> Json<serde_json::Value> {
    let data: Vec<serde_json::Value> = state
        .service
        .catalog()
        .iter()
        .map(|info| {
            serde_json::json!({
                "label": info.crop.label(),
                "display_name": info.display_name,
                "description": info.description,
                "image_ref": info.image_ref,
            })
        })
        .collect();

    Json(serde_json::json!({
        "rows": data.len(),
        "data": data,
    }))
}

#[cfg(feature = "api")]
async fn get_crop(
    State(state): State<AppState>,
    Path(label): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let info = state
        .service
        .catalog()
        .lookup(&label)
        .map_err(|_| AppError::NotFound(format!("Crop {} not found", label)))?;

    Ok(Json(serde_json::json!({
        "label": info.crop.label(),
        "display_name": info.display_name,
        "description": info.description,
        "image_ref": info.image_ref,
    })))
}

#[cfg(feature = "api")]
async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<RawMeasurements>, JsonRejection>,
) -> Result<Json<PredictionResult>, AppError> {
    let Json(payload) = payload?;
    let result = state.service.recommend(&payload)?;
    tracing::debug!("Recommended '{}'", result.label);
    Ok(Json(result))
}

#[cfg(feature = "api")]
#[derive(Debug, serde::Deserialize)]
struct BatchRecommendRequest {
    inputs: Vec<RawMeasurements>,
}

/// Batch recommendation - one entry per input, order preserved
#[cfg(feature = "api")]
async fn recommend_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchRecommendRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(payload) = payload?;
    if payload.inputs.len() > MAX_BATCH_SIZE {
        return Err(AppError::BadRequest(format!(
            "Batch of {} inputs exceeds limit of {}",
            payload.inputs.len(),
            MAX_BATCH_SIZE
        )));
    }

    let start = std::time::Instant::now();
    let results: Vec<serde_json::Value> = state
        .service
        .recommend_batch(&payload.inputs)
        .into_iter()
        .map(|r| match r {
            Ok(result) => serde_json::json!({ "ok": result }),
            Err(RecommendError::Validation(e)) => serde_json::json!({ "violations": e.violations }),
            // Already logged by the service with the offending label
            Err(RecommendError::UnknownCrop(_)) => serde_json::json!({ "error": "internal error" }),
        })
        .collect();
    let elapsed = start.elapsed();

    tracing::debug!("Batch of {} recommendations in {:?}", results.len(), elapsed);

    Ok(Json(serde_json::json!({
        "rows": results.len(),
        "results": results,
        "query_time_us": elapsed.as_micros(),
    })))
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
enum AppError {
    Validation(ValidationError),
    /// Body was not a well-formed measurements document
    Malformed(JsonRejection),
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

#[cfg(feature = "api")]
impl From<RecommendError> for AppError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::Validation(e) => AppError::Validation(e),
            RecommendError::UnknownCrop(e) => AppError::Internal(e.to_string()),
        }
    }
}

#[cfg(feature = "api")]
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Malformed(rejection)
    }
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({
                    "error": "invalid measurements",
                    "violations": e.violations,
                })),
            )
                .into_response(),
            AppError::Malformed(rejection) => (
                rejection.status(),
                Json(serde_json::json!({ "error": rejection.body_text() })),
            )
                .into_response(),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": msg }))).into_response()
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": msg }))).into_response()
            }
            AppError::Internal(msg) => {
                // Detail stays in the logs
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "internal error" })),
                )
                    .into_response()
            }
        }
    }
}
