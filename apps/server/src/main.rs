// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PlantQC Server - Plant 3D QA/QC and quantity-takeoff service.
//!
//! This server fronts the APS Model Derivative API for Plant 3D models:
//! it lists viewables, derives P&ID tag and class-name option lists,
//! produces quantity-takeoff chart figures, resolves QA/QC filter
//! highlights, and serves an embedded 3D viewer page.
//!
//! # Endpoints
//!
//! - `GET /api/v1/health` - Health check
//! - `GET /api/v1/models/:urn/viewables` - Viewable picker options
//! - `GET /api/v1/models/:urn/viewables/:guid/tags` - Tag picker options
//! - `GET /api/v1/models/:urn/viewables/:guid/classes` - Class picker options
//! - `GET /api/v1/models/:urn/viewables/:guid/takeoff` - Takeoff chart figure
//! - `POST /api/v1/models/:urn/viewables/:guid/qaqc` - QA/QC highlights
//! - `GET /api/v1/models/:urn/viewer` - Embedded viewer page
//! - `POST /api/v1/models/:urn/viewer/qaqc` - Viewer page with highlights

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod config;
mod error;
mod routes;
mod services;
mod types;

use config::Config;
use plantqc_core::{ClassCounts, PropertyPayload, TagIndex, Viewable};
use services::{ApsClient, MemoCache};

/// Application state shared across handlers. The four memo caches mirror
/// the four expensive lookups: raw payload, tag index, class counts and
/// viewable metadata.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub aps: Arc<ApsClient>,
    pub payloads: Arc<MemoCache<Arc<PropertyPayload>>>,
    pub tag_indexes: Arc<MemoCache<Arc<TagIndex>>>,
    pub class_counts: Arc<MemoCache<Arc<ClassCounts>>>,
    pub viewables: Arc<MemoCache<Arc<Vec<Viewable>>>>,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,tower_http=debug,plantqc_server=debug".into()),
        )
        .pretty()
        .init();

    let config = Config::from_env();

    tracing::info!(
        port = config.port,
        aps_base_url = %config.aps_base_url,
        "Starting PlantQC Server"
    );

    let aps = match ApsClient::from_config(&config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!(error = %e, "APS client configuration failed");
            std::process::exit(1);
        }
    };

    let state = AppState {
        config: Arc::new(config.clone()),
        aps,
        payloads: Arc::new(MemoCache::new()),
        tag_indexes: Arc::new(MemoCache::new()),
        class_counts: Arc::new(MemoCache::new()),
        viewables: Arc::new(MemoCache::new()),
    };

    // Build router
    let app = Router::new()
        // Root endpoint - API information
        .route("/", get(routes::health::info))
        // Health check
        .route("/api/v1/health", get(routes::health::check))
        // Option lists
        .route(
            "/api/v1/properties",
            get(routes::viewables::list_property_names),
        )
        .route(
            "/api/v1/models/:urn/viewables",
            get(routes::viewables::list_viewables),
        )
        .route(
            "/api/v1/models/:urn/viewables/:guid/tags",
            get(routes::viewables::list_tags),
        )
        .route(
            "/api/v1/models/:urn/viewables/:guid/classes",
            get(routes::viewables::list_classes),
        )
        // Takeoff chart
        .route(
            "/api/v1/models/:urn/viewables/:guid/takeoff",
            get(routes::takeoff::takeoff_figure),
        )
        // QA/QC highlight resolution
        .route(
            "/api/v1/models/:urn/viewables/:guid/qaqc",
            post(routes::qaqc::resolve),
        )
        // Viewer pages
        .route("/api/v1/models/:urn/viewer", get(routes::viewer::viewer_page))
        .route(
            "/api/v1/models/:urn/viewer/qaqc",
            post(routes::viewer::qaqc_page),
        )
        // Middleware
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Build the CORS layer from the configured origins. A `"*"` entry, or
/// a list with no parseable origin, opens the service up for
/// development; otherwise only the listed origins are allowed.
fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_origins(origins: &[&str]) -> Config {
        Config {
            port: 8080,
            aps_base_url: "https://developer.api.autodesk.com".into(),
            aps_client_id: None,
            aps_client_secret: None,
            aps_token_scope: "data:read".into(),
            request_timeout_secs: 300,
            cors_origins: origins.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_cors_layer_builds_from_origin_list() {
        // restricted list and development wildcard both construct
        let _ = cors_layer(&config_with_origins(&[
            "http://localhost:3000",
            "https://app.example.com",
        ]));
        let _ = cors_layer(&config_with_origins(&["*"]));
        let _ = cors_layer(&config_with_origins(&[]));
    }
}
