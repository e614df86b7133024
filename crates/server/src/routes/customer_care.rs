//! Customer care issue route handlers.
//!
//! Reporting is anonymous; everything else is the admin ticket API, which
//! speaks JSON rather than form/redirect.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use kirana_core::IssueId;

use crate::db::{CustomerCareRepository, customer_care::NewIssue};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Build the customer care router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/customer-care/report", post(report_issue))
        .route("/admin/customer-care", get(admin_list))
        .route("/admin/customer-care/{id}", get(admin_view))
        .route("/api/admin/customer-care/{id}/respond", post(admin_respond))
        .route("/api/admin/customer-care/{id}/delete", post(admin_delete))
}

/// Issue report request body.
#[derive(Debug, Deserialize)]
struct ReportRequest {
    name: String,
    email: String,
    phone: String,
    issue_type: String,
    description: String,
    #[serde(default)]
    order_id: Option<String>,
    #[serde(default = "default_priority")]
    priority: String,
}

fn default_priority() -> String {
    "normal".to_owned()
}

/// Report a customer care issue. New issues start out `open`.
///
/// POST /api/customer-care/report
#[instrument(skip(state, body), fields(issue_type = %body.issue_type))]
async fn report_issue(
    State(state): State<AppState>,
    Json(body): Json<ReportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let required = [
        body.name.trim(),
        body.email.trim(),
        body.phone.trim(),
        body.issue_type.trim(),
        body.description.trim(),
    ];
    if required.iter().any(|field| field.is_empty()) {
        return Err(AppError::Validation("Missing required fields".to_owned()));
    }

    let issue_id = CustomerCareRepository::new(state.pool())
        .create(NewIssue {
            name: body.name.trim().to_owned(),
            email: body.email.trim().to_owned(),
            phone: body.phone.trim().to_owned(),
            order_id: body.order_id,
            issue_type: body.issue_type.trim().to_owned(),
            description: body.description.trim().to_owned(),
            priority: body.priority,
        })
        .await?;

    tracing::info!(%issue_id, "customer care issue reported");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "आपकी समस्या दर्ज की गई है। हम 24 घंटे में आपसे संपर्क करेंगे। (Your issue has been reported. We will contact you within 24 hours.)",
            "issue_id": issue_id,
        })),
    ))
}

#[derive(Debug, Deserialize)]
struct IssueFilter {
    status: Option<String>,
    priority: Option<String>,
}

/// List issues for the admin panel, optionally filtered by status or
/// priority, plus the open-issue count.
///
/// GET /admin/customer-care
async fn admin_list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<IssueFilter>,
) -> Result<impl IntoResponse, AppError> {
    let repo = CustomerCareRepository::new(state.pool());

    let issues = match (filter.status.as_deref(), filter.priority.as_deref()) {
        (Some(status), _) => repo.list_by_status(status).await?,
        (None, Some(priority)) => repo.list_by_priority(priority).await?,
        (None, None) => repo.list_all().await?,
    };
    let open_count = repo.open_count().await?;

    Ok(Json(json!({
        "success": true,
        "issues": issues,
        "open_count": open_count,
    })))
}

/// View one issue.
///
/// GET /admin/customer-care/{id}
async fn admin_view(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let issue = CustomerCareRepository::new(state.pool())
        .get_by_id(IssueId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("issue {id}")))?;

    Ok(Json(json!({ "success": true, "issue": issue })))
}

/// Respond request body.
#[derive(Debug, Deserialize)]
struct RespondRequest {
    response: String,
    #[serde(default = "default_respond_status")]
    status: String,
}

fn default_respond_status() -> String {
    "open".to_owned()
}

/// Record a response and status on an issue. A `resolved` status stamps
/// `resolved_at`; any later status change leaves the stamp in place.
///
/// POST /api/admin/customer-care/{id}/respond
#[instrument(skip(admin, state, body), fields(admin = %admin.username))]
async fn admin_respond(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<RespondRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = body.response.trim();
    if response.is_empty() {
        return Err(AppError::Validation("Response cannot be empty".to_owned()));
    }

    CustomerCareRepository::new(state.pool())
        .respond(IssueId::new(id), response, &body.status)
        .await
        .map_err(issue_not_found(id))?;

    tracing::info!(issue_id = id, status = %body.status, "issue responded");

    Ok(Json(json!({
        "success": true,
        "message": "Response sent successfully",
    })))
}

/// Delete an issue.
///
/// POST /api/admin/customer-care/{id}/delete
#[instrument(skip(admin, state), fields(admin = %admin.username))]
async fn admin_delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    CustomerCareRepository::new(state.pool())
        .delete(IssueId::new(id))
        .await
        .map_err(issue_not_found(id))?;

    tracing::info!(issue_id = id, "issue deleted");

    Ok(Json(json!({
        "success": true,
        "message": "Issue deleted successfully",
    })))
}

fn issue_not_found(id: i32) -> impl FnOnce(crate::db::RepositoryError) -> AppError {
    move |e| match e {
        crate::db::RepositoryError::NotFound => AppError::NotFound(format!("issue {id}")),
        other => AppError::Database(other),
    }
}
