// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Health check endpoint.

use axum::Json;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
}

/// API information response.
#[derive(Debug, Serialize)]
pub struct ApiInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

/// Endpoint information.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// GET /api/v1/health - Health check endpoint.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        service: "plantqc-server",
    })
}

/// GET / - API information endpoint.
pub async fn info() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        service: "plantqc-server",
        version: env!("CARGO_PKG_VERSION"),
        description: "Plant 3D QA/QC and quantity-takeoff service",
        endpoints: vec![
            EndpointInfo {
                method: "GET",
                path: "/api/v1/health",
                description: "Health check endpoint",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/v1/properties",
                description: "Fixed property names for filter configuration",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/v1/models/:urn/viewables",
                description: "Viewable picker options",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/v1/models/:urn/viewables/:guid/tags",
                description: "Sorted P&ID tag picker options",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/v1/models/:urn/viewables/:guid/classes",
                description: "Class-name picker options with counts",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/v1/models/:urn/viewables/:guid/takeoff",
                description: "Quantity-takeoff chart figure",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/v1/models/:urn/viewables/:guid/qaqc",
                description: "Resolve QA/QC filter highlights",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/v1/models/:urn/viewer",
                description: "Embedded 3D viewer page",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/v1/models/:urn/viewer/qaqc",
                description: "Viewer page with QA/QC highlights applied",
            },
        ],
    })
}
