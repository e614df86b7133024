//! Contact message route handlers.
//!
//! Customers submit messages and look up replies by email address; knowing
//! the address is the only gate on the lookup. Admin viewing marks a message
//! read, and replying forces it read.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use kirana_core::MessageId;

use crate::db::ContactMessageRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Build the contact messages router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/contact", post(submit_message))
        .route("/api/check-reply", post(check_reply))
        .route("/admin/messages", get(admin_list))
        .route("/admin/messages/{id}", get(admin_view))
        .route("/api/admin/messages/{id}/reply", post(admin_reply))
        .route("/api/admin/messages/{id}/delete", post(admin_delete))
}

/// Contact form request body.
#[derive(Debug, Deserialize)]
struct ContactRequest {
    name: String,
    email: String,
    message: String,
}

/// Submit a contact message. New messages start out unread.
///
/// POST /api/contact
#[instrument(skip(state, body))]
async fn submit_message(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = body.name.trim();
    let email = body.email.trim();
    let message = body.message.trim();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(AppError::Validation(
            "सभी फील्ड भरें (Please fill all fields)".to_owned(),
        ));
    }

    let message_id = ContactMessageRepository::new(state.pool())
        .create(name, email, message)
        .await?;

    tracing::info!(%message_id, "contact message submitted");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "आपका संदेश भेज दिया गया है (Your message has been sent)",
            "message_id": message_id,
        })),
    ))
}

/// Reply lookup request body.
#[derive(Debug, Deserialize)]
struct CheckReplyRequest {
    email: String,
}

/// Look up all messages from an email address, case-insensitively.
///
/// POST /api/check-reply
async fn check_reply(
    State(state): State<AppState>,
    Json(body): Json<CheckReplyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = body.email.trim();
    if email.is_empty() {
        return Err(AppError::Validation(
            "ईमेल जरूरी है (Email is required)".to_owned(),
        ));
    }

    let messages = ContactMessageRepository::new(state.pool())
        .find_by_email(email)
        .await?;

    Ok(Json(json!({ "success": true, "messages": messages })))
}

/// Message list plus unread count for the admin panel.
///
/// GET /admin/messages
async fn admin_list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ContactMessageRepository::new(state.pool());
    let messages = repo.list_all().await?;
    let unread_count = repo.unread_count().await?;

    Ok(Json(json!({
        "success": true,
        "messages": messages,
        "unread_count": unread_count,
    })))
}

/// View one message, marking it read as a side effect.
///
/// GET /admin/messages/{id}
#[instrument(skip(admin, state), fields(admin = %admin.username))]
async fn admin_view(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ContactMessageRepository::new(state.pool());
    let message_id = MessageId::new(id);

    let mut message = repo
        .get_by_id(message_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("message {id}")))?;

    repo.mark_read(message_id)
        .await
        .map_err(message_not_found(id))?;
    message.is_read = true;

    Ok(Json(json!({ "success": true, "message": message })))
}

/// Reply request body.
#[derive(Debug, Deserialize)]
struct ReplyRequest {
    reply: String,
}

/// Store an admin reply, forcing the message read.
///
/// POST /api/admin/messages/{id}/reply
#[instrument(skip(admin, state, body), fields(admin = %admin.username))]
async fn admin_reply(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ReplyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let reply = body.reply.trim();
    if reply.is_empty() {
        return Err(AppError::Validation("Reply cannot be empty".to_owned()));
    }

    ContactMessageRepository::new(state.pool())
        .reply(MessageId::new(id), reply)
        .await
        .map_err(message_not_found(id))?;

    tracing::info!(message_id = id, "contact message replied");

    Ok(Json(json!({
        "success": true,
        "message": "Reply sent successfully",
    })))
}

/// Delete a message.
///
/// POST /api/admin/messages/{id}/delete
#[instrument(skip(admin, state), fields(admin = %admin.username))]
async fn admin_delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ContactMessageRepository::new(state.pool())
        .delete(MessageId::new(id))
        .await
        .map_err(message_not_found(id))?;

    tracing::info!(message_id = id, "contact message deleted");

    Ok(Json(json!({
        "success": true,
        "message": "Message deleted successfully",
    })))
}

fn message_not_found(id: i32) -> impl FnOnce(crate::db::RepositoryError) -> AppError {
    move |e| match e {
        crate::db::RepositoryError::NotFound => AppError::NotFound(format!("message {id}")),
        other => AppError::Database(other),
    }
}
