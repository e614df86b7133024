//! Kirana server library.
//!
//! This crate provides the storefront API and admin back office as a library,
//! allowing it to be tested and reused.
//!
//! # Security
//!
//! Admin routes mutate shared shop state (catalog, orders, tickets,
//! settings, admin accounts). Every admin request re-checks the session
//! identity via the extractors in [`middleware::auth`]; master-only
//! operations additionally re-check the `is_master` flag per request.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
