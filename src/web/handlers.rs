//! HTTP handlers for the chat webhook

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::dispatch::{DispatchError, Dispatcher};

/// Shared application state
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub token: String,
    pub trigger: String,
    pub strict_amounts: bool,
}

impl AppState {
    /// Build the state from the startup configuration
    pub fn new(config: &Config, dispatcher: Dispatcher) -> Self {
        AppState {
            dispatcher,
            token: config.token.clone(),
            trigger: config.trigger.clone(),
            strict_amounts: config.strict_amounts,
        }
    }
}

/// Form fields posted by the chat outgoing webhook
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WebhookRequest {
    pub token: String,
    pub trigger_word: String,
    pub text: String,
}

/// Message sent back to the channel
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct KarmaResponse {
    pub text: String,
}

/// Handle a karma command posted by the chat integration
pub async fn webhook_handler(
    State(state): State<Arc<AppState>>,
    Form(req): Form<WebhookRequest>,
) -> Response {
    // Anyone without the token could otherwise hand out karma
    if req.token != state.token {
        warn!("Invalid token: {}", req.token);
        return StatusCode::UNAUTHORIZED.into_response();
    }

    if req.trigger_word != state.trigger {
        debug!("Ignoring trigger word: {}", req.trigger_word);
        return StatusCode::OK.into_response();
    }

    debug!("Handling text: {}", req.text);

    match state.dispatcher.handle_text(&req.text, state.strict_amounts) {
        Ok(tally) => reply(StatusCode::OK, tally.to_string()),
        Err(DispatchError::Parse(e)) => {
            warn!("Cannot find the user: {}", e);
            reply(StatusCode::OK, format!("Cannot find the user: {}", e))
        }
        Err(DispatchError::Backend(e)) => {
            reply(StatusCode::INTERNAL_SERVER_ERROR, format!("Storage error: {}", e))
        }
    }
}

/// Liveness check
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn reply(status: StatusCode, text: String) -> Response {
    (status, Json(KarmaResponse { text })).into_response()
}
