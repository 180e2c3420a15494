use crate::llm::chat::ChatClient;
use crate::models::api::{ ChatReply, HealthReply };
use super::error::ApiError;

use std::sync::Arc;
use serde_json::Value;
use axum::{
    body::Bytes,
    extract::State,
    routing::{ get, post },
    Json,
    Router,
};
use tower_http::cors::{ Any, CorsLayer };
use log::{ info, debug };

pub const NO_RESPONSE: &str = "No response";

#[derive(Clone)]
pub struct AppState {
    pub chat_client: Arc<dyn ChatClient>,
}

impl AppState {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/api/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

/// Only a falsy `message` (absent, `null`, `false`, `0` or `""`) is
/// rejected; any other value is forwarded, non-strings in their JSON form.
/// A body that is not JSON at all fails as a server error.
fn required_message(body: &[u8]) -> Result<String, ApiError> {
    let body: Value = serde_json::from_slice(body)?;
    match body.get("message") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Err(ApiError::MessageRequired),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Err(ApiError::MessageRequired),
        Some(Value::String(s)) if s.is_empty() => Err(ApiError::MessageRequired),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
    }
}

async fn chat_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatReply>, ApiError> {
    let message = required_message(&body)?;
    info!("Chat request received ({} chars)", message.chars().count());

    let content = state.chat_client.complete(&message).await?;
    let message = if content.is_empty() { NO_RESPONSE.to_string() } else { content };
    debug!("Chat reply ready ({} chars)", message.chars().count());

    Ok(Json(ChatReply { message }))
}

async fn health_handler() -> Json<HealthReply> {
    Json(HealthReply { status: "ok".into() })
}
