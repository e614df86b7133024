//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                  - Liveness check
//! GET  /health/ready                            - Readiness check (DB ping)
//!
//! # Storefront API (anonymous)
//! GET  /api/products                            - Catalog listing / search
//! GET  /api/shop-info                           - Shop hours and phone
//! POST /api/place-order                         - Place an order
//! GET  /api/my-orders/{mobile}                  - Orders by mobile number
//! POST /api/chatbot                             - Keyword chatbot
//! POST /api/customer-care/report                - Report an issue
//! POST /api/contact                             - Submit a contact message
//! POST /api/check-reply                         - Look up replies by email
//!
//! # Admin session (form-encoded, redirect responses)
//! GET/POST /admin/login                         - Login
//! POST /admin/logout                            - Logout
//! GET  /admin/dashboard                         - Stats overview
//! GET  /admin/products                          - Product management
//! POST /admin/products/add
//! POST /admin/products/{id}/edit
//! POST /admin/products/{id}/delete
//! POST /admin/products/{id}/toggle              - Toggle availability
//! GET  /admin/orders                            - Order management
//! POST /admin/orders/{id}/status
//! POST /admin/orders/{id}/delete
//! GET  /admin/admins                            - Admin accounts
//! POST /admin/admins/add                        - Master only
//! POST /admin/admins/{id}/delete                - Master only, no self-delete
//! GET/POST /admin/settings                      - Shop settings
//!
//! # Admin ticket API (JSON)
//! GET  /admin/customer-care                     - Issue list + open count
//! GET  /admin/customer-care/{id}
//! POST /api/admin/customer-care/{id}/respond
//! POST /api/admin/customer-care/{id}/delete
//! GET  /admin/messages                          - Message list + unread count
//! GET  /admin/messages/{id}                     - View (marks read)
//! POST /api/admin/messages/{id}/reply
//! POST /api/admin/messages/{id}/delete
//! ```

use axum::Router;

use crate::state::AppState;

pub mod admins;
pub mod chatbot;
pub mod customer_care;
pub mod dashboard;
pub mod messages;
pub mod orders;
pub mod products;
pub mod settings;

/// Build the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(admins::router())
        .merge(chatbot::router())
        .merge(customer_care::router())
        .merge(dashboard::router())
        .merge(messages::router())
        .merge(orders::router())
        .merge(products::router())
        .merge(settings::router())
}
