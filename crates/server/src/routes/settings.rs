//! Shop settings route handlers.

use axum::{
    Form, Json, Router,
    extract::State,
    response::{IntoResponse, Redirect},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::db::SettingsRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new().route("/admin/settings", get(view_settings).post(update_settings))
}

/// All shop settings as a key/value map.
///
/// GET /admin/settings
async fn view_settings(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let settings = SettingsRepository::new(state.pool()).all().await?;
    Ok(Json(json!({ "success": true, "settings": settings })))
}

/// Settings form body. Missing time fields fall back to the seeded defaults.
#[derive(Debug, Deserialize)]
struct SettingsForm {
    #[serde(default = "default_open_time")]
    open_time: String,
    #[serde(default = "default_close_time")]
    close_time: String,
    #[serde(default)]
    phone: String,
}

fn default_open_time() -> String {
    "08:00".to_owned()
}

fn default_close_time() -> String {
    "21:00".to_owned()
}

/// Update the shop timings and phone.
///
/// POST /admin/settings
#[instrument(skip(admin, state, form), fields(admin = %admin.username))]
async fn update_settings(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> Result<Redirect, AppError> {
    let repo = SettingsRepository::new(state.pool());
    repo.set("shop_open_time", &form.open_time).await?;
    repo.set("shop_close_time", &form.close_time).await?;
    repo.set("shop_phone", &form.phone).await?;

    tracing::info!("shop settings updated");
    Ok(Redirect::to("/admin/settings"))
}
