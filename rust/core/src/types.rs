// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tolerant data model for Model Derivative property payloads.
//!
//! The upstream API returns `{"data": {"collection": [object, ...]}}`
//! where each object's `properties` is a mapping from group name to a
//! mapping of property key to value. Group names are arbitrary and carry
//! no semantics; the same semantic property can live under different
//! groups per element. Anything structurally off (missing `data`, a
//! non-array `collection`, non-object `properties`) reads as empty.

use serde_json::Value;

/// One CAD object from the property payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementRecord {
    /// Internal Model Derivative object id. May be absent.
    pub object_id: Option<i64>,
    /// Viewer-stable element identifier used for highlighting.
    pub external_id: Option<String>,
    /// Display name, e.g. `"ACPPASSET [4612B]"`.
    pub name: Option<String>,
    /// Grouped properties: `{group name: {key: value}}`. Kept as raw JSON
    /// because key spellings and groupings vary per element; anything
    /// that is not an object means "no properties".
    pub properties: Value,
}

impl ElementRecord {
    /// Build a record from one collection entry. A non-object entry
    /// yields a record with no properties, which downstream derivations
    /// skip.
    pub fn from_value(raw: &Value) -> Self {
        Self {
            object_id: raw.get("objectid").and_then(Value::as_i64),
            external_id: raw
                .get("externalId")
                .and_then(Value::as_str)
                .map(str::to_string),
            name: raw.get("name").and_then(Value::as_str).map(str::to_string),
            properties: raw.get("properties").cloned().unwrap_or(Value::Null),
        }
    }

    /// Whether this element carries a well-formed grouped-properties map.
    pub fn has_properties(&self) -> bool {
        self.properties.is_object()
    }
}

/// Top-level property payload: the ordered element collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyPayload {
    pub collection: Vec<ElementRecord>,
}

impl PropertyPayload {
    /// Extract the collection from a raw payload. Missing or oddly typed
    /// `data`/`collection` produce an empty payload, never an error.
    pub fn from_value(raw: &Value) -> Self {
        let collection = raw
            .get("data")
            .and_then(|data| data.get("collection"))
            .and_then(Value::as_array)
            .map(|items| items.iter().map(ElementRecord::from_value).collect())
            .unwrap_or_default();

        Self { collection }
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }
}

/// Render a property value as text for tag keys, class buckets and
/// filter comparison. Strings render without quotes; everything else
/// falls back to its compact JSON form. Real payloads only carry strings
/// and numbers here; the fallback keeps odd payloads deterministic.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
