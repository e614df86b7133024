//! Admin session and account management route handlers.
//!
//! Login/logout plus the master-only account directory. The master-only
//! routes take `RequireMasterAdmin`, which re-reads the privilege flag from
//! the database on every request.

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use kirana_core::AdminId;

use crate::db::AdminRepository;
use crate::error::AppError;
use crate::middleware::{
    RequireAdmin, RequireMasterAdmin, clear_current_admin, set_current_admin,
};
use crate::models::CurrentAdmin;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Build the admin accounts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", get(login_page).post(login))
        .route("/admin/logout", post(logout))
        .route("/admin/admins", get(list_admins))
        .route("/admin/admins/add", post(add_admin))
        .route("/admin/admins/{id}/delete", post(delete_admin))
}

/// Login entry point. An already-authenticated session skips straight to the
/// dashboard.
///
/// GET /admin/login
async fn login_page(session: Session) -> Result<impl IntoResponse, AppError> {
    let current: Option<CurrentAdmin> = session
        .get(crate::models::session_keys::CURRENT_ADMIN)
        .await
        .map_err(|e| AppError::Internal(format!("session load failed: {e}")))?;

    if current.is_some() {
        return Ok(Redirect::to("/admin/dashboard").into_response());
    }

    Ok(Json(json!({
        "success": true,
        "message": "कृपया लॉगिन करें (Please login)",
    }))
    .into_response())
}

/// Login form body.
#[derive(Debug, Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

/// Authenticate and establish an admin session.
///
/// Unknown usernames and wrong passwords get the same rejection, so the
/// response never reveals which usernames exist.
///
/// POST /admin/login
#[instrument(skip(session, state, form), fields(username = %form.username))]
async fn login(
    session: Session,
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    let admin = AuthService::new(state.pool())
        .authenticate(form.username.trim(), &form.password)
        .await?;

    let current = CurrentAdmin {
        id: admin.id,
        username: admin.username,
        is_master: admin.is_master,
    };
    set_current_admin(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session store failed: {e}")))?;

    tracing::info!(admin_id = %current.id, "admin logged in");
    Ok(Redirect::to("/admin/dashboard"))
}

/// Drop the admin session.
///
/// POST /admin/logout
async fn logout(session: Session) -> Result<Redirect, AppError> {
    clear_current_admin(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session clear failed: {e}")))?;

    Ok(Redirect::to("/admin/login"))
}

/// Admin account directory. Any admin may view it; the response carries
/// whether the caller currently holds master privilege so the client can
/// hide the mutation controls.
///
/// GET /admin/admins
async fn list_admins(
    RequireAdmin(current): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let repo = AdminRepository::new(state.pool());
    let admins = repo.list_all().await?;
    let current_is_master = repo.is_master(current.id).await?;

    Ok(Json(json!({
        "success": true,
        "admins": admins,
        "current_is_master": current_is_master,
    })))
}

/// New admin form body.
#[derive(Debug, Deserialize)]
struct AddAdminForm {
    username: String,
    password: String,
}

/// Create a regular admin account. Master only; new accounts are never
/// masters.
///
/// POST /admin/admins/add
#[instrument(skip(master, state, form), fields(admin = %master.username))]
async fn add_admin(
    RequireMasterAdmin(master): RequireMasterAdmin,
    State(state): State<AppState>,
    Form(form): Form<AddAdminForm>,
) -> Result<Redirect, AppError> {
    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        return Err(AppError::Validation(
            "यूजरनेम और पासवर्ड दोनों जरूरी हैं (Username and password are both required)"
                .to_owned(),
        ));
    }

    let id = AuthService::new(state.pool())
        .create_admin(username, &form.password, false)
        .await?;

    tracing::info!(new_admin_id = %id, username, "admin account created");
    Ok(Redirect::to("/admin/admins"))
}

/// Delete a regular admin account. Master only; masters are never deletable
/// and a master cannot delete their own session's account.
///
/// POST /admin/admins/{id}/delete
#[instrument(skip(master, state), fields(admin = %master.username))]
async fn delete_admin(
    RequireMasterAdmin(master): RequireMasterAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    let target = AdminId::new(id);
    if target == master.id {
        return Err(AppError::Forbidden(
            "आप खुद को डिलीट नहीं कर सकते (You cannot delete yourself)".to_owned(),
        ));
    }

    AuthService::new(state.pool()).delete_admin(target).await?;

    tracing::info!(deleted_admin_id = id, "admin account deleted");
    Ok(Redirect::to("/admin/admins"))
}
