//! HTTP routes

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use hat_codegen::{
    validate::{normalize_time, NameRegistry},
    workspace, Automation, CodeGenerator,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::client::HatClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub generator: CodeGenerator,
    pub client: HatClient,
}

/// API response wrapper using serde_json::Value for flexibility
#[derive(Serialize)]
struct ApiResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ApiResponse {
    fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: Some(serde_json::to_value(data).unwrap_or(serde_json::Value::Null)),
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// System info response
#[derive(Serialize)]
struct SystemInfo {
    name: String,
    version: String,
}

/// Generated program plus editor warnings
#[derive(Serialize)]
struct TranspileResult {
    code: String,
    warnings: Vec<String>,
}

/// Time validation request
#[derive(Deserialize)]
struct TimeRequest {
    time: String,
}

/// Normalized time of day
#[derive(Serialize)]
struct TimeResult {
    time: String,
}

/// Report a rejected JSON body in the usual envelope
fn rejection_response(rejection: JsonRejection) -> Response {
    (
        rejection.status(),
        Json(ApiResponse::error(rejection.body_text())),
    )
        .into_response()
}

/// Decode a workspace and generate its program
fn transpile_workspace(
    generator: &CodeGenerator,
    body: &str,
) -> Result<TranspileResult, hat_codegen::CodegenError> {
    let automations = workspace::decode_workspace(body)?;
    let (_, duplicates) = NameRegistry::from_program(&automations);

    Ok(TranspileResult {
        code: generator.emit_program(&automations),
        warnings: duplicates.iter().map(ToString::to_string).collect(),
    })
}

/// Health check
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Get system info
async fn system_info() -> impl IntoResponse {
    Json(ApiResponse::success(SystemInfo {
        name: "Hat Studio".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Generate code from a serialized editor workspace
async fn transpile(State(state): State<AppState>, body: String) -> impl IntoResponse {
    match transpile_workspace(&state.generator, &body) {
        Ok(result) => (StatusCode::OK, Json(ApiResponse::success(result))),
        Err(e) => (StatusCode::BAD_REQUEST, Json(ApiResponse::error(e.to_string()))),
    }
}

/// Generate code from a JSON automation program
async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<Vec<Automation>>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(automations)) => state.generator.emit_program(&automations).into_response(),
        Err(rejection) => rejection_response(rejection),
    }
}

/// Normalize a user-entered time of day to `HH:MM:SS`
async fn validate_time(payload: Result<Json<TimeRequest>, JsonRejection>) -> Response {
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => return rejection_response(rejection),
    };

    match normalize_time(&request.time) {
        Some(time) => (StatusCode::OK, Json(ApiResponse::success(TimeResult { time }))),
        None => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Time has no hour component")),
        ),
    }
    .into_response()
}

/// List runtime devices, highest toolbox priority first
async fn list_devices(State(state): State<AppState>) -> impl IntoResponse {
    match state.client.list_devices().await {
        Ok(mut devices) => {
            hat_devices::sort_by_priority(&mut devices);
            (StatusCode::OK, Json(ApiResponse::success(devices)))
        }
        Err(e) => (StatusCode::BAD_GATEWAY, Json(ApiResponse::error(e.to_string()))),
    }
}

/// List events the runtime's devices can emit
///
/// Falls back to the built-in catalog for the runtime's devices when the
/// runtime cannot list events itself.
async fn list_events(State(state): State<AppState>) -> impl IntoResponse {
    match state.client.list_possible_events().await {
        Ok(events) => return (StatusCode::OK, Json(ApiResponse::success(events))),
        Err(e) => tracing::warn!("Runtime event list unavailable, using catalog: {}", e),
    }

    match state.client.list_devices().await {
        Ok(devices) => (
            StatusCode::OK,
            Json(ApiResponse::success(hat_devices::possible_events(&devices))),
        ),
        Err(e) => (StatusCode::BAD_GATEWAY, Json(ApiResponse::error(e.to_string()))),
    }
}

/// Generate code from a workspace and push it to the runtime
async fn deploy(State(state): State<AppState>, body: String) -> impl IntoResponse {
    let result = match transpile_workspace(&state.generator, &body) {
        Ok(result) => result,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ApiResponse::error(e.to_string())));
        }
    };

    match state.client.update_code(result.code.clone()).await {
        Ok(()) => {
            tracing::info!("Deployed {} bytes of source to the runtime", result.code.len());
            (StatusCode::OK, Json(ApiResponse::success(result)))
        }
        Err(e) => (StatusCode::BAD_GATEWAY, Json(ApiResponse::error(e.to_string()))),
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/system/info", get(system_info))
        .route("/api/v1/transpile", post(transpile))
        .route("/api/v1/generate", post(generate))
        .route("/api/v1/validate/time", post(validate_time))
        .route("/api/v1/devices", get(list_devices))
        .route("/api/v1/events", get(list_events))
        .route("/api/v1/deploy", post(deploy))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
