//! Domain models for the shop.

pub mod admin;
pub mod order;
pub mod product;
pub mod session;
pub mod ticket;

pub use admin::Admin;
pub use order::Order;
pub use product::Product;
pub use session::{CurrentAdmin, session_keys};
pub use ticket::{ContactMessage, CustomerCareIssue};
