// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! APS (Autodesk Platform Services) REST client: OAuth2 token exchange
//! and Model Derivative metadata/property fetches.
//!
//! Thin by design — no retry or backoff; an upstream failure surfaces
//! immediately as an [`ApiError`] and aborts that request's render.

use serde::Deserialize;
use serde_json::Value;

use plantqc_core::Viewable;

use crate::config::Config;
use crate::error::ApiError;

/// APS REST API client.
pub struct ApsClient {
    base_url: String,
    client_id: String,
    client_secret: String,
    scope: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct MetadataResponse {
    #[serde(default)]
    data: MetadataData,
}

#[derive(Debug, Default, Deserialize)]
struct MetadataData {
    #[serde(default)]
    metadata: Vec<Viewable>,
}

impl ApsClient {
    /// Build a client from configuration. Fails when OAuth credentials
    /// are not configured — every endpoint needs a token.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let (client_id, client_secret) = match (&config.aps_client_id, &config.aps_client_secret) {
            (Some(id), Some(secret)) => (id.clone(), secret.clone()),
            _ => {
                return Err(ApiError::Auth(
                    "APS_CLIENT_ID / APS_CLIENT_SECRET not configured".into(),
                ))
            }
        };

        Ok(Self {
            base_url: config.aps_base_url.clone(),
            client_id,
            client_secret,
            scope: config.aps_token_scope.clone(),
            http: reqwest::Client::new(),
        })
    }

    /// Fetch a two-legged access token via the client-credentials grant.
    pub async fn get_access_token(&self) -> Result<String, ApiError> {
        let resp = self
            .http
            .post(format!("{}/authentication/v2/token", self.base_url))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", &self.client_id),
                ("client_secret", &self.client_secret),
                ("scope", &self.scope),
            ])
            .send()
            .await
            .map_err(|e| ApiError::Auth(format!("Token request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(ApiError::Auth(format!(
                "Token exchange failed with status {}",
                resp.status()
            )));
        }

        let body: TokenResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Auth(format!("Token response parse failed: {e}")))?;

        Ok(body.access_token)
    }

    /// List the viewables of a converted model.
    ///
    /// `GET /modelderivative/v2/designdata/{urn}/metadata` returns
    /// `{"data": {"metadata": [{name, guid, role}, ...]}}`.
    pub async fn get_metadata_viewables(
        &self,
        token: &str,
        encoded_urn: &str,
    ) -> Result<Vec<Viewable>, ApiError> {
        let resp = self
            .http
            .get(format!(
                "{}/modelderivative/v2/designdata/{}/metadata",
                self.base_url, encoded_urn
            ))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("Metadata request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "Metadata request returned {}",
                resp.status()
            )));
        }

        let body: MetadataResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Upstream(format!("Metadata response parse failed: {e}")))?;

        tracing::debug!(
            urn = encoded_urn,
            viewables = body.data.metadata.len(),
            "Fetched metadata viewables"
        );

        Ok(body.data.metadata)
    }

    /// Fetch the full property payload of one viewable.
    ///
    /// The raw `{"data": {"collection": [...]}}` JSON is returned as-is;
    /// tolerant decoding happens in `plantqc-core`. A 202 means property
    /// extraction is still running upstream; that surfaces as an error
    /// rather than a retry loop.
    pub async fn get_all_model_properties(
        &self,
        token: &str,
        encoded_urn: &str,
        guid: &str,
    ) -> Result<Value, ApiError> {
        let resp = self
            .http
            .get(format!(
                "{}/modelderivative/v2/designdata/{}/metadata/{}/properties",
                self.base_url, encoded_urn, guid
            ))
            .query(&[("forceget", "true")])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("Properties request failed: {e}")))?;

        if resp.status() == reqwest::StatusCode::ACCEPTED {
            return Err(ApiError::Upstream(
                "Property extraction still in progress upstream, try again later".into(),
            ));
        }
        if !resp.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "Properties request returned {}",
                resp.status()
            )));
        }

        let payload: Value = resp
            .json()
            .await
            .map_err(|e| ApiError::Upstream(format!("Properties response parse failed: {e}")))?;

        tracing::debug!(urn = encoded_urn, guid = guid, "Fetched property payload");

        Ok(payload)
    }
}
