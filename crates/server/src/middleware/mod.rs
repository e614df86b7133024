//! HTTP middleware: session layer and admin auth extractors.

pub mod auth;
pub mod session;

pub use auth::{RequireAdmin, RequireMasterAdmin, clear_current_admin, set_current_admin};
pub use session::create_session_layer;
