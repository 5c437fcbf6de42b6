//! # API REST
//!
//! REST API for the healthcare assistant.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS)
//!
//! Uses `api-shared` for wire types and `assist-core` for query resolution.

#![warn(rust_2018_idioms)]

use api_shared::{
    GreetingRes, HealthRes, HealthService, ModeDto, QueryReq, QueryRes, SamplePromptRes,
    SamplesRes,
};
use assist_core::{Mode, Responder};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across REST handlers.
#[derive(Clone)]
pub struct AppState {
    responder: Arc<Responder>,
}

impl AppState {
    pub fn new(responder: Arc<Responder>) -> Self {
        Self { responder }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, query, greeting, samples),
    components(schemas(
        HealthRes,
        ModeDto,
        QueryReq,
        QueryRes,
        GreetingRes,
        SamplePromptRes,
        SamplesRes,
    ))
)]
pub struct ApiDoc;

#[derive(Debug, Deserialize, IntoParams)]
pub struct GreetingParams {
    /// Defaults to `patient`.
    mode: Option<ModeDto>,
}

/// Builds the REST application with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/assistant/query", post(query))
        .route("/assistant/greeting", get(greeting))
        .route("/assistant/samples", get(samples))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used by monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/assistant/query",
    request_body = QueryReq,
    responses(
        (status = 200, description = "Answer to the query", body = QueryRes),
        (status = 422, description = "Malformed request body")
    )
)]
/// Answer a free-text question as the given persona.
///
/// Always returns 200 once the body parses. When neither the local tables nor the remote
/// service can answer, `response` carries a user-facing explanation and `resolution` is
/// `remote_failed`.
#[axum::debug_handler]
async fn query(State(state): State<AppState>, Json(req): Json<QueryReq>) -> Json<QueryRes> {
    let mode = Mode::from(req.mode);
    let reply = state.responder.resolve(&req.query, mode).await;
    Json(QueryRes::from_reply(reply, mode))
}

#[utoipa::path(
    get,
    path = "/assistant/greeting",
    params(GreetingParams),
    responses(
        (status = 200, description = "Welcome message for the persona", body = GreetingRes),
        (status = 400, description = "Unknown mode")
    )
)]
#[axum::debug_handler]
async fn greeting(
    State(state): State<AppState>,
    Query(params): Query<GreetingParams>,
) -> Json<GreetingRes> {
    let mode = Mode::from(params.mode.unwrap_or_default());
    Json(GreetingRes {
        mode: mode.into(),
        message: state.responder.greeting(mode).to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/assistant/samples",
    responses(
        (status = 200, description = "Suggested prompts for doctors", body = SamplesRes)
    )
)]
#[axum::debug_handler]
async fn samples(State(state): State<AppState>) -> Json<SamplesRes> {
    Json(SamplesRes {
        samples: state
            .responder
            .samples()
            .iter()
            .map(SamplePromptRes::from)
            .collect(),
    })
}
