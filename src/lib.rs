//! Mandacaru Broker stock service library
//!
//! This module exposes the backend components for use by tests and other consumers.

pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;
pub mod validation;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repositories::{InMemoryStockRepository, StockRepository, StockStore};
use services::StockService;
use std::sync::Arc;

/// Application state shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub stock_service: Arc<StockService>,
}

impl AppState {
    /// Create a new AppState over any stock store
    pub fn new(store: Arc<dyn StockStore>) -> Self {
        Self {
            stock_service: Arc::new(StockService::new(store)),
        }
    }

    /// AppState backed by PostgreSQL
    pub fn with_pool(pool: sqlx::PgPool) -> Self {
        Self::new(Arc::new(StockRepository::new(pool)))
    }

    /// AppState backed by an empty in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStockRepository::new()))
    }
}
