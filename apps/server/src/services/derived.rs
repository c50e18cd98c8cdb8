// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Memoized accessors for the expensive derivations.
//!
//! Each accessor checks its cache under the (token, encoded URN, guid)
//! tuple before hitting APS, mirroring how every view shares one payload
//! fetch per model/viewable selection.

use std::sync::Arc;

use plantqc_core::{
    build_class_name_counts, build_tag_index, ClassCounts, PropertyPayload, TagIndex, Viewable,
};

use crate::error::ApiError;
use crate::services::memo::MemoCache;
use crate::AppState;

/// Property payload for one (token, urn, guid), fetched at most once.
pub async fn cached_payload(
    state: &AppState,
    token: &str,
    encoded_urn: &str,
    guid: &str,
) -> Result<Arc<PropertyPayload>, ApiError> {
    let key = MemoCache::<Arc<PropertyPayload>>::generate_key(&[token, encoded_urn, guid]);
    if let Some(payload) = state.payloads.get(&key) {
        tracing::debug!(urn = encoded_urn, guid = guid, "Property payload cache hit");
        return Ok(payload);
    }

    let raw = state
        .aps
        .get_all_model_properties(token, encoded_urn, guid)
        .await?;
    let payload = Arc::new(PropertyPayload::from_value(&raw));
    state.payloads.insert(key, Arc::clone(&payload));
    Ok(payload)
}

/// Deduplicated tag index for one (token, urn, guid).
pub async fn cached_tag_index(
    state: &AppState,
    token: &str,
    encoded_urn: &str,
    guid: &str,
) -> Result<Arc<TagIndex>, ApiError> {
    let key = MemoCache::<Arc<TagIndex>>::generate_key(&[token, encoded_urn, guid]);
    if let Some(index) = state.tag_indexes.get(&key) {
        return Ok(index);
    }

    let payload = cached_payload(state, token, encoded_urn, guid).await?;
    let index = Arc::new(build_tag_index(&payload));
    state.tag_indexes.insert(key, Arc::clone(&index));
    Ok(index)
}

/// Class-name counts for one (token, urn, guid).
pub async fn cached_class_counts(
    state: &AppState,
    token: &str,
    encoded_urn: &str,
    guid: &str,
) -> Result<Arc<ClassCounts>, ApiError> {
    let key = MemoCache::<Arc<ClassCounts>>::generate_key(&[token, encoded_urn, guid]);
    if let Some(counts) = state.class_counts.get(&key) {
        return Ok(counts);
    }

    let payload = cached_payload(state, token, encoded_urn, guid).await?;
    let counts = Arc::new(build_class_name_counts(&payload));
    state.class_counts.insert(key, Arc::clone(&counts));
    Ok(counts)
}

/// Viewable metadata for one (token, urn).
pub async fn cached_viewables(
    state: &AppState,
    token: &str,
    encoded_urn: &str,
) -> Result<Arc<Vec<Viewable>>, ApiError> {
    let key = MemoCache::<Arc<Vec<Viewable>>>::generate_key(&[token, encoded_urn]);
    if let Some(viewables) = state.viewables.get(&key) {
        return Ok(viewables);
    }

    let viewables = Arc::new(state.aps.get_metadata_viewables(token, encoded_urn).await?);
    state.viewables.insert(key, Arc::clone(&viewables));
    Ok(viewables)
}
