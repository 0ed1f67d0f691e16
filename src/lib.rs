//! Bookshelf: a personal reading tracker
//!
//! A REST JSON API over a single table of book records, with search and
//! import from an external book catalog, plus a typed client and view models
//! for front ends.

use std::sync::Arc;

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repository: repository::Repository,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        repository: repository::Repository,
        services: services::Services,
    ) -> Self {
        Self {
            config: Arc::new(config),
            repository,
            services: Arc::new(services),
        }
    }
}
