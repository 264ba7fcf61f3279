//! RentingCar web backend.
//!
//! Car rental bookings: branch (delegation) and fleet records, users and
//! their bookings, and the booking engine that prices a rental and checks a
//! booking before it is stored.

pub mod booking;
pub mod cache;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod routes;
pub mod seed;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::cache::AppCache;
use crate::config::Config;
use crate::db::MemoryStore;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub cache: AppCache,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: MemoryStore, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            cache: AppCache::new(),
            config: Arc::new(config),
        }
    }
}

/// Build the full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/api", routes::router().nest("/booking", booking::router()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
