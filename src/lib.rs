//! AgentFast CDN API
//!
//! JSON/CSV HTTP API for the customer control panel and the operations
//! back-office.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        axum Router                           │
//! │   /health   /api-docs/openapi.json                           │
//! │                                                              │
//! │  ┌────────────────────────┐   ┌───────────────────────────┐  │
//! │  │      /admin/api        │   │          /api             │  │
//! │  │ customers nodes dns    │   │ access-control alerts     │  │
//! │  │ domains finance        │   │ apikeys logs origin       │  │
//! │  │ security packages      │   │ tickets performance       │  │
//! │  │ tickets audit settings │   │                           │  │
//! │  └───────────┬────────────┘   └─────────────┬─────────────┘  │
//! │              │  validation · response       │                │
//! │  ┌───────────▼──────────────────────────────▼─────────────┐  │
//! │  │        Registry (Repository<T>)  ·  SettingsStore      │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod models;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod settings;
pub mod store;
pub mod telemetry;
pub mod validation;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use settings::SettingsStore;
pub use store::Registry;

/// Shared handler state
pub struct ApiState {
    pub registry: Registry,
    pub settings: SettingsStore,
    /// Reported by `/health`
    pub version: String,
}

impl ApiState {
    /// State over the given stores, reporting the crate version
    pub fn new(registry: Registry, settings: SettingsStore) -> Self {
        Self {
            registry,
            settings,
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }

    /// Fixture data and default settings
    pub fn seeded() -> Self {
        Self::new(Registry::seeded(), SettingsStore::default())
    }
}

/// Build the API router
pub fn build_router(state: ApiState, config: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .nest("/admin/api", routes::admin::router())
        .nest("/api", routes::user::router())
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http());

    if config.cors_permissive {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(Arc::new(state))
}
