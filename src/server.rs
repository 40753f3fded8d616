use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::envelope::RequestEnvelope;
use crate::response::ResponseEnvelope;
use crate::skill::Skill;

/// Shared state handed to every route.
pub struct AppState {
    pub config: Arc<Config>,
    pub skill: Skill,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);
        let skill = Skill::new(Arc::clone(&config))?;
        Ok(Self { config, skill })
    }
}

/// Builds the application router with all routes.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/webhook-alexa", post(webhook_alexa))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler.
///
/// Returns `200 OK` with server status and version. Used by load balancers,
/// monitoring, and CI to verify the server is running.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Voice webhook handler. Every well-formed envelope gets `200 OK` with a
/// spoken response, including the ones the skill only knows how to apologize
/// for; the platform cannot render an HTTP error to the user.
async fn webhook_alexa(
    State(state): State<Arc<AppState>>,
    Json(envelope): Json<RequestEnvelope>,
) -> Json<ResponseEnvelope> {
    Json(state.skill.process(&envelope).await)
}
