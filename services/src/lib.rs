//! HTTP service over the detection logs.
//!
//! Three data routes and a health check: `/csv-data` merges every CSV log
//! file into one JSON array (the viewer's dataset), `/detections` ingests
//! new detection rows, and `/i18n/ja.json` serves the localized UI string
//! bundle the viewer's table widget loads at startup.

use crate::config::Config;
use crate::store::{DetectionRow, DetectionStore};
use axum::{
    Json, Router,
    extract::{Extension, Request, State},
    http::{HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{any, get, post},
};
use seawatch_utils::version_info::{RuntimeEnv, format_version_for_runtime_env};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod store;
pub mod telemetry;

/// The Japanese UI string bundle, embedded so deployments stay
/// self-contained.
const JA_LANGUAGE_BUNDLE: &str = include_str!("../assets/ja.json");

/// Build the application router around a detection store.
pub async fn routes<S>(store: S, config: Config) -> Router
where
    S: DetectionStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/is-health", get(health_check::<S>))
        .route("/csv-data", get(csv_data::<S>))
        .route("/detections", post(ingest::<S>))
        .route("/i18n/ja.json", get(language_bundle))
        .fallback(any(catch_all))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http_request",
                    http_request.method = ?request.method(),
                    http_request.uri = ?request.uri(),
                    http_request.version = ?request.version(),
                )
            }),
        )
        .layer(Extension(config))
        .with_state(store)
}

async fn health_check<S>(
    State(store): State<S>,
    Extension(config): Extension<Config>,
) -> impl IntoResponse
where
    S: DetectionStore,
{
    let mut response = if store.is_available().await {
        (StatusCode::OK, "OK").into_response()
    } else {
        (StatusCode::BAD_GATEWAY, "502").into_response()
    };

    let env_value = config.environment().to_string();
    response.headers_mut().insert(
        HeaderName::from_static("x-service-env"),
        HeaderValue::from_str(&env_value).expect("environment header is valid ASCII"),
    );

    let runtime_env: RuntimeEnv = config.environment().into();
    let version_value = format_version_for_runtime_env(runtime_env);
    response.headers_mut().insert(
        HeaderName::from_static("x-service-version"),
        HeaderValue::from_str(&version_value).expect("version header is valid ASCII"),
    );

    response
}

/// The viewer's dataset: every log file merged into one JSON array,
/// newest detection first. An empty log directory yields `[]`.
async fn csv_data<S>(State(store): State<S>) -> Response
where
    S: DetectionStore,
{
    match store.load_records().await {
        Ok(records) => Json(records).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to merge detection logs");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "failed to read detection logs"})),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    pub detections: Vec<DetectionRow>,
}

#[derive(Debug, Serialize)]
struct IngestResponse {
    appended: usize,
}

async fn ingest<S>(State(store): State<S>, Json(payload): Json<IngestRequest>) -> Response
where
    S: DetectionStore,
{
    match store.append(payload.detections).await {
        Ok(appended) => Json(IngestResponse { appended }).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to append detections");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "failed to append detections"})),
            )
                .into_response()
        }
    }
}

async fn language_bundle() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        JA_LANGUAGE_BUNDLE,
    )
}

async fn catch_all() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nothing to see here")
}
