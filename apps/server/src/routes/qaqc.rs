// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! QA/QC filter evaluation endpoint.

use axum::{
    extract::{Path, State},
    Json,
};

use plantqc_core::{encode_model_urn, resolve_highlights};

use crate::error::ApiError;
use crate::services::derived;
use crate::types::{QaqcRequest, QaqcResponse};
use crate::AppState;

/// POST /api/v1/models/:urn/viewables/:guid/qaqc
///
/// Evaluates the declared filter rules against the viewable's elements
/// and returns the highlight assignments, at most one per element
/// (first matching rule wins). An empty or all-inert rule list yields an
/// empty highlight set — the caller shows the plain viewer.
pub async fn resolve(
    State(state): State<AppState>,
    Path((urn, guid)): Path<(String, String)>,
    Json(body): Json<QaqcRequest>,
) -> Result<Json<QaqcResponse>, ApiError> {
    if guid.is_empty() {
        return Err(ApiError::MissingSelection("viewable guid"));
    }

    let token = state.aps.get_access_token().await?;
    let encoded_urn = encode_model_urn(&urn);

    let payload = derived::cached_payload(&state, &token, &encoded_urn, &guid).await?;
    let highlights = resolve_highlights(&payload, &body.filters);

    tracing::info!(
        urn = %encoded_urn,
        guid = %guid,
        rules = body.filters.len(),
        highlights = highlights.len(),
        "Resolved QA/QC highlights"
    );

    let count = highlights.len();
    Ok(Json(QaqcResponse { highlights, count }))
}
