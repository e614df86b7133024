//! Chatbot route handler.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::services::chatbot;
use crate::state::AppState;

/// Build the chatbot router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/chatbot", post(chat))
}

/// Chat request body.
#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
}

/// Answer a chat message. Greetings and help requests get scripted replies;
/// anything else is treated as a product price query.
///
/// POST /api/chatbot
async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    let reply = chatbot::reply(state.pool(), &body.message).await?;
    Ok(Json(json!({ "reply": reply })))
}
