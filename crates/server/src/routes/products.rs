//! Product catalog route handlers.

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use kirana_core::ProductId;

use crate::db::{ProductRepository, SettingsRepository};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::Product;
use crate::state::AppState;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/shop-info", get(shop_info))
        .route("/admin/products", get(admin_list))
        .route("/admin/products/add", post(admin_add))
        .route("/admin/products/{id}/edit", post(admin_edit))
        .route("/admin/products/{id}/delete", post(admin_delete))
        .route("/admin/products/{id}/toggle", post(admin_toggle))
}

#[derive(Debug, Deserialize)]
struct CatalogQuery {
    search: Option<String>,
}

/// Catalog listing. With `?search=`, a case-insensitive name search over the
/// whole catalog; without it, the available products only.
///
/// GET /api/products
async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ProductRepository::new(state.pool());

    let products = match query.search.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => repo.search(q).await?,
        _ => repo.list_available().await?,
    };

    Ok(Json(json!({ "success": true, "products": products })))
}

/// Shop opening hours and phone number.
///
/// GET /api/shop-info
async fn shop_info(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let timings = SettingsRepository::new(state.pool()).shop_timings().await?;
    Ok(Json(json!({ "success": true, "shop": timings })))
}

/// Full catalog for the admin panel, unavailable products included.
///
/// GET /admin/products
async fn admin_list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    Ok(Json(products))
}

/// Product create/edit form body. An absent or empty image keeps the
/// existing value on edit and falls back to the default asset on create.
#[derive(Debug, Deserialize)]
struct ProductForm {
    name: String,
    price: Decimal,
    image: Option<String>,
}

impl ProductForm {
    fn image(&self) -> Option<&str> {
        self.image.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Add a product.
///
/// POST /admin/products/add
#[instrument(skip(admin, state, form), fields(admin = %admin.username))]
async fn admin_add(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect, AppError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(
            "प्रोडक्ट का नाम जरूरी है (Product name is required)".to_owned(),
        ));
    }

    let image = form.image().unwrap_or("default.png");
    let id = ProductRepository::new(state.pool())
        .create(name, form.price, image)
        .await?;

    tracing::info!(product_id = %id, name, "product added");
    Ok(Redirect::to("/admin/products"))
}

/// Edit a product's name, price, and optionally image.
///
/// POST /admin/products/{id}/edit
#[instrument(skip(admin, state, form), fields(admin = %admin.username))]
async fn admin_edit(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect, AppError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(
            "प्रोडक्ट का नाम जरूरी है (Product name is required)".to_owned(),
        ));
    }

    ProductRepository::new(state.pool())
        .update(ProductId::new(id), name, form.price, form.image())
        .await
        .map_err(product_not_found(id))?;

    tracing::info!(product_id = id, "product updated");
    Ok(Redirect::to("/admin/products"))
}

/// Delete a product. Past orders keep their item snapshots.
///
/// POST /admin/products/{id}/delete
#[instrument(skip(admin, state), fields(admin = %admin.username))]
async fn admin_delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await
        .map_err(product_not_found(id))?;

    tracing::info!(product_id = id, "product deleted");
    Ok(Redirect::to("/admin/products"))
}

/// Flip a product's availability.
///
/// POST /admin/products/{id}/toggle
#[instrument(skip(admin, state), fields(admin = %admin.username))]
async fn admin_toggle(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    let now_available = ProductRepository::new(state.pool())
        .toggle_availability(ProductId::new(id))
        .await
        .map_err(product_not_found(id))?;

    tracing::info!(product_id = id, now_available, "availability toggled");
    Ok(Redirect::to("/admin/products"))
}

fn product_not_found(id: i32) -> impl FnOnce(crate::db::RepositoryError) -> AppError {
    move |e| match e {
        crate::db::RepositoryError::NotFound => AppError::NotFound(format!("product {id}")),
        other => AppError::Database(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(image: Option<&str>) -> ProductForm {
        ProductForm {
            name: "Rice".to_owned(),
            price: Decimal::new(60, 0),
            image: image.map(str::to_owned),
        }
    }

    #[test]
    fn test_empty_image_field_counts_as_absent() {
        assert_eq!(form(None).image(), None);
        assert_eq!(form(Some("")).image(), None);
        assert_eq!(form(Some("   ")).image(), None);
        assert_eq!(form(Some(" rice.png ")).image(), Some("rice.png"));
    }
}
