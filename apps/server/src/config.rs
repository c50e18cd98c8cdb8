// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// APS (Autodesk Platform Services) API base URL.
    pub aps_base_url: String,
    /// OAuth2 client id for the client-credentials token exchange.
    pub aps_client_id: Option<String>,
    /// OAuth2 client secret.
    pub aps_client_secret: Option<String>,
    /// Token scope requested from APS.
    pub aps_token_scope: String,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Allowed CORS origins (comma-separated, or "*" for all in development).
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .unwrap_or(8080),
            aps_base_url: std::env::var("APS_BASE_URL")
                .unwrap_or_else(|_| "https://developer.api.autodesk.com".into())
                .trim_end_matches('/')
                .to_string(),
            aps_client_id: std::env::var("APS_CLIENT_ID").ok(),
            aps_client_secret: std::env::var("APS_CLIENT_SECRET").ok(),
            aps_token_scope: std::env::var("APS_TOKEN_SCOPE")
                .unwrap_or_else(|_| "data:read".into()),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "300".into())
                .parse()
                .unwrap_or(300),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| {
                    "http://localhost:3000,http://localhost:5173,http://127.0.0.1:3000,http://127.0.0.1:5173".into()
                })
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
