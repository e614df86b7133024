//! Order route handlers.

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};
use tracing::instrument;

use kirana_core::{OrderId, OrderStatus};

use crate::db::{OrderRepository, orders::NewOrder};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::Order;
use crate::state::AppState;

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/place-order", post(place_order))
        .route("/api/my-orders/{mobile}", get(my_orders))
        .route("/admin/orders", get(admin_list))
        .route("/admin/orders/{id}/status", post(admin_update_status))
        .route("/admin/orders/{id}/delete", post(admin_delete))
}

/// Checkout request body.
#[derive(Debug, Deserialize)]
struct PlaceOrderRequest {
    customer_name: String,
    mobile: String,
    address: String,
    /// `{product, qty, price}`-shaped entries, stored verbatim.
    items: Vec<JsonValue>,
    /// Client-supplied total; recorded as-is.
    total: Decimal,
    #[serde(default = "default_payment_method")]
    payment_method: String,
}

fn default_payment_method() -> String {
    "cod".to_owned()
}

#[derive(Debug, Serialize)]
struct PlaceOrderResponse {
    success: bool,
    order_id: OrderId,
    payment_method: String,
    total: Decimal,
}

/// Place an order.
///
/// POST /api/place-order
#[instrument(skip(state, body), fields(mobile = %body.mobile))]
async fn place_order(
    State(state): State<AppState>,
    Json(body): Json<PlaceOrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let customer_name = body.customer_name.trim();
    let mobile = body.mobile.trim();
    let address = body.address.trim();

    if customer_name.is_empty() || mobile.is_empty() || address.is_empty() || body.items.is_empty()
    {
        return Err(AppError::Validation(
            "सभी फील्ड भरें (Please fill all fields)".to_owned(),
        ));
    }

    let order_id = OrderRepository::new(state.pool())
        .create(NewOrder {
            customer_name: customer_name.to_owned(),
            mobile: mobile.to_owned(),
            address: address.to_owned(),
            items: JsonValue::Array(body.items),
            total: body.total,
            payment_method: body.payment_method.clone(),
        })
        .await?;

    tracing::info!(%order_id, "order placed");

    Ok(Json(PlaceOrderResponse {
        success: true,
        order_id,
        payment_method: body.payment_method,
        total: body.total,
    }))
}

/// Get orders for one mobile number.
///
/// GET /api/my-orders/{mobile}
async fn my_orders(
    State(state): State<AppState>,
    Path(mobile): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let orders = OrderRepository::new(state.pool())
        .list_by_mobile(&mobile)
        .await?;

    Ok(Json(json!({ "success": true, "orders": orders })))
}

/// List all orders for the admin panel.
///
/// GET /admin/orders
async fn admin_list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;
    Ok(Json(orders))
}

/// Status update form body.
#[derive(Debug, Deserialize)]
struct StatusForm {
    status: String,
}

/// Update an order's status. Any-to-any transitions, idempotent.
///
/// POST /admin/orders/{id}/status
#[instrument(skip(admin, state), fields(admin = %admin.username))]
async fn admin_update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect, AppError> {
    let status: OrderStatus = form
        .status
        .parse()
        .map_err(|_| AppError::InvalidStatus(form.status.clone()))?;

    OrderRepository::new(state.pool())
        .update_status(OrderId::new(id), status)
        .await
        .map_err(order_not_found(id))?;

    tracing::info!(order_id = id, %status, "order status updated");
    Ok(Redirect::to("/admin/orders"))
}

/// Delete an order.
///
/// POST /admin/orders/{id}/delete
#[instrument(skip(admin, state), fields(admin = %admin.username))]
async fn admin_delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    OrderRepository::new(state.pool())
        .delete(OrderId::new(id))
        .await
        .map_err(order_not_found(id))?;

    tracing::info!(order_id = id, "order deleted");
    Ok(Redirect::to("/admin/orders"))
}

fn order_not_found(id: i32) -> impl FnOnce(crate::db::RepositoryError) -> AppError {
    move |e| match e {
        crate::db::RepositoryError::NotFound => AppError::NotFound(format!("order {id}")),
        other => AppError::Database(other),
    }
}
