use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::pipeline::{Pipeline, PipelineError};

pub const SERVICE_TITLE: &str = "Prediksi Konsentrasi Skripsi PTIK";
pub const MODEL_NAME: &str = "Random Forest";

#[derive(Debug, Deserialize)]
pub struct PredictionRequest {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub concentration: String,
    pub probabilities: HashMap<String, f64>,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub title: &'static str,
    pub version: &'static str,
    pub model: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub model_loaded: bool,
    pub available_classes: Vec<String>,
}

/// Error taxonomy of the request handler. Every variant maps to one HTTP
/// status and a `{"detail": ...}` body.
#[derive(Debug)]
pub enum ApiError {
    /// Request body failed schema validation (malformed JSON, missing field)
    Schema(String),
    /// Request body parsed but violated an input constraint
    Validation(String),
    /// The inference pipeline failed; the underlying message is surfaced
    Pipeline(PipelineError),
    /// The artifacts are not usable (defensive; they are loaded eagerly)
    ModelUnavailable,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::Schema(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Pipeline(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error during prediction: {}", err),
            ),
            Self::ModelUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Model not loaded properly".to_string(),
            ),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Builds the service router around a loaded pipeline.
///
/// CORS is wide open (all origins, methods and headers); tighten per
/// deployment if the frontend domain is known.
pub fn app(pipeline: Arc<Pipeline>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(read_root))
        .route("/health", get(health_check))
        .route("/predict", post(predict))
        .layer(cors)
        .with_state(pipeline)
}

/// Static service metadata
async fn read_root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        title: SERVICE_TITLE,
        version: env!("CARGO_PKG_VERSION"),
        model: MODEL_NAME,
        status: "active",
    })
}

/// Reports whether the artifacts are loaded, plus the known class list.
/// Artifacts are loaded eagerly before the router exists, so the check is
/// effectively always true; it is still performed defensively.
async fn health_check(State(pipeline): State<Arc<Pipeline>>) -> Result<Json<HealthStatus>, ApiError> {
    let classes = pipeline.class_names();
    if classes.is_empty() {
        return Err(ApiError::ModelUnavailable);
    }
    Ok(Json(HealthStatus {
        status: "healthy",
        model_loaded: true,
        available_classes: classes.to_vec(),
    }))
}

/// Predicts the concentration for a thesis title.
///
/// Per-request state machine: parse (422 on schema failure), validate
/// non-empty title (400), invoke the pipeline (500 on failure), respond.
async fn predict(
    State(pipeline): State<Arc<Pipeline>>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::Schema(rejection.body_text()))?;

    if request.title.trim().is_empty() {
        return Err(ApiError::Validation(
            "Judul skripsi tidak boleh kosong".to_string(),
        ));
    }

    let (concentration, probabilities) = pipeline
        .predict(&request.title)
        .map_err(ApiError::Pipeline)?;

    Ok(Json(PredictionResponse {
        concentration,
        probabilities,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_maps_to_422() {
        let response = ApiError::Schema("missing field `title`".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_validation_error_maps_to_400() {
        let response = ApiError::Validation("empty title".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_pipeline_error_maps_to_500() {
        let response =
            ApiError::Pipeline(PipelineError::ModelError("boom".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
