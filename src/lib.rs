//! Read-only reporting API over stores, products, and sales.
//!
//! Three listing endpoints sit behind a thin HTTP layer; the sales listing
//! runs three structurally parallel queries (page, count, aggregates) that
//! share a single typed predicate built once per request.

pub mod common;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod services;

use std::sync::Arc;

use axum::{routing::get, Router};

pub use handlers::AppServices;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<db::DbPool>,
    pub config: config::AppConfig,
    pub services: AppServices,
}

/// The full read-only API surface: resource listings plus health.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/stores", handlers::stores::routes())
        .nest("/products", handlers::products::routes())
        .nest("/sales", handlers::sales::routes())
        .route("/health", get(handlers::health::health))
}
