//! Axum route handlers for the career assistant chat.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;

use crate::chat::transcript::{spawn_reply, ChatMessage, ChatView};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// GET /api/v1/chat
pub async fn handle_get_chat(State(state): State<AppState>) -> Json<ChatView> {
    Json(state.chat.lock().await.view())
}

/// POST /api/v1/chat/messages
///
/// Appends the user's message and returns it; the assistant reply shows up in
/// `GET /api/v1/chat` once the composing delay has passed.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), AppError> {
    let pending = state.chat.lock().await.submit(req.content)?;
    info!(message_id = %pending.user_message.id, "Chat message received");

    let message = pending.user_message.clone();
    spawn_reply(
        state.chat.clone(),
        state.catalog.clone(),
        pending,
        state.config.chat_reply_delay,
    );
    Ok((StatusCode::ACCEPTED, Json(message)))
}

/// POST /api/v1/chat/reset
pub async fn handle_reset_chat(State(state): State<AppState>) -> Json<ChatView> {
    let mut chat = state.chat.lock().await;
    chat.clear();
    Json(chat.view())
}
