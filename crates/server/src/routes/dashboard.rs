//! Admin dashboard route handler.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use serde_json::json;

use crate::db::{
    AdminRepository, ContactMessageRepository, CustomerCareRepository, OrderRepository,
    ProductRepository,
};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// How many recent orders the dashboard shows.
const RECENT_ORDERS: usize = 5;

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/admin/dashboard", get(dashboard))
}

/// Shop-wide stats and the most recent orders.
///
/// GET /admin/dashboard
async fn dashboard(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let pool = state.pool();

    let products = ProductRepository::new(pool);
    let orders = OrderRepository::new(pool);

    let product_count = products.count().await?;
    let unavailable_count = products.unavailable_count().await?;
    let order_count = orders.count().await?;
    let admin_count = AdminRepository::new(pool).count().await?;
    let open_issues = CustomerCareRepository::new(pool).open_count().await?;
    let unread_messages = ContactMessageRepository::new(pool).unread_count().await?;

    let mut recent_orders = orders.list_all().await?;
    recent_orders.truncate(RECENT_ORDERS);

    Ok(Json(json!({
        "success": true,
        "stats": {
            "products": product_count,
            "unavailable_products": unavailable_count,
            "orders": order_count,
            "admins": admin_count,
            "open_issues": open_issues,
            "unread_messages": unread_messages,
        },
        "recent_orders": recent_orders,
    })))
}
