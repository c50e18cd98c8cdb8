// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Option-list endpoints backing the UI pickers.

use axum::{
    extract::{Path, State},
    Json,
};

use plantqc_core::{
    class_name_options, encode_model_urn, tag_options, viewable_options, OptionItem,
    PROPERTY_OPTIONS,
};

use crate::error::ApiError;
use crate::services::derived;
use crate::types::OptionsResponse;
use crate::AppState;

/// GET /api/v1/properties
///
/// The fixed Plant 3D property names offered for filter configuration.
pub async fn list_property_names() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        options: PROPERTY_OPTIONS
            .iter()
            .map(|name| OptionItem {
                label: (*name).to_string(),
                value: (*name).to_string(),
            })
            .collect(),
    })
}

/// GET /api/v1/models/:urn/viewables
///
/// Viewable picker options: `"name (role)"` labels, guid values.
pub async fn list_viewables(
    State(state): State<AppState>,
    Path(urn): Path<String>,
) -> Result<Json<OptionsResponse>, ApiError> {
    let token = state.aps.get_access_token().await?;
    let encoded_urn = encode_model_urn(&urn);

    let viewables = derived::cached_viewables(&state, &token, &encoded_urn).await?;
    Ok(Json(OptionsResponse {
        options: viewable_options(&viewables),
    }))
}

/// GET /api/v1/models/:urn/viewables/:guid/tags
///
/// Sorted P&ID tag picker options for the selected viewable.
pub async fn list_tags(
    State(state): State<AppState>,
    Path((urn, guid)): Path<(String, String)>,
) -> Result<Json<OptionsResponse>, ApiError> {
    if guid.is_empty() {
        return Err(ApiError::MissingSelection("viewable guid"));
    }

    let token = state.aps.get_access_token().await?;
    let encoded_urn = encode_model_urn(&urn);

    let index = derived::cached_tag_index(&state, &token, &encoded_urn, &guid).await?;
    Ok(Json(OptionsResponse {
        options: tag_options(&index),
    }))
}

/// GET /api/v1/models/:urn/viewables/:guid/classes
///
/// Class-name picker options sorted by count descending, labeled
/// `"Display Name (count)"`.
pub async fn list_classes(
    State(state): State<AppState>,
    Path((urn, guid)): Path<(String, String)>,
) -> Result<Json<OptionsResponse>, ApiError> {
    if guid.is_empty() {
        return Err(ApiError::MissingSelection("viewable guid"));
    }

    let token = state.aps.get_access_token().await?;
    let encoded_urn = encode_model_urn(&urn);

    let counts = derived::cached_class_counts(&state, &token, &encoded_urn, &guid).await?;
    Ok(Json(OptionsResponse {
        options: class_name_options(&counts),
    }))
}
