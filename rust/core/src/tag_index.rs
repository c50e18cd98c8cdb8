// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deduplicated tag → element lookup table.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::props::{find_property_any_group, resolve_pid};
use crate::types::{value_text, PropertyPayload};

const TAG_KEY: &str = "Tag";

/// One entry of the tag index.
#[derive(Debug, Clone, PartialEq)]
pub struct TagIndexEntry {
    pub object_id: Option<i64>,
    pub name: Option<String>,
    /// Resolved P&ID identifier (always present; elements without one are
    /// excluded from the index). Kept as raw JSON since payloads carry it
    /// as either a number or a string.
    pub pid: Value,
    /// The element's original grouped properties.
    pub properties: Value,
}

/// Tag-keyed index. A `BTreeMap` so iteration yields tags in sorted
/// order, which is what the tag picker wants.
pub type TagIndex = BTreeMap<String, TagIndexEntry>;

/// Build a deduplicated mapping from tag string to element record.
///
/// Elements are visited in collection order. An element is skipped when
/// it lacks a well-formed `properties` map, when its `Tag` is absent or
/// blank after trimming, or when no P&ID alias resolves.
///
/// The first element with a given tag owns the bare key; later elements
/// with the same tag land under `"{tag}#{objectid}"`, or `"{tag}#dup"`
/// when the object id is absent. A third id-less duplicate overwrites
/// the second under the same `#dup` key; that lossiness is intentional
/// and pinned by a test below.
pub fn build_tag_index(payload: &PropertyPayload) -> TagIndex {
    let mut out = TagIndex::new();

    for element in &payload.collection {
        if !element.has_properties() {
            continue;
        }

        let Some(tag_value) = find_property_any_group(&element.properties, TAG_KEY) else {
            continue;
        };
        let tag = value_text(tag_value).trim().to_string();
        if tag.is_empty() {
            continue;
        }

        // Only keep elements that belong to a P&ID
        let Some(pid) = resolve_pid(&element.properties) else {
            continue;
        };

        let entry = TagIndexEntry {
            object_id: element.object_id,
            name: element.name.clone(),
            pid: pid.clone(),
            properties: element.properties.clone(),
        };

        if out.contains_key(&tag) {
            let key = match element.object_id {
                Some(id) => format!("{tag}#{id}"),
                None => format!("{tag}#dup"),
            };
            out.insert(key, entry);
        } else {
            out.insert(tag, entry);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn element(object_id: Option<i64>, tag: &str, pid: Option<i64>) -> Value {
        let mut general = serde_json::Map::new();
        general.insert("Tag".into(), json!(tag));
        if let Some(pid) = pid {
            general.insert("PnPID".into(), json!(pid));
        }
        let mut obj = serde_json::Map::new();
        if let Some(id) = object_id {
            obj.insert("objectid".into(), json!(id));
        }
        obj.insert("name".into(), json!(format!("ASSET [{tag}]")));
        obj.insert("properties".into(), json!({ "General": general }));
        Value::Object(obj)
    }

    fn payload(elements: Vec<Value>) -> PropertyPayload {
        PropertyPayload::from_value(&json!({"data": {"collection": elements}}))
    }

    #[test]
    fn test_basic_index() {
        let payload = payload(vec![element(Some(1), "AV-309", Some(714))]);
        let index = build_tag_index(&payload);

        let entry = &index["AV-309"];
        assert_eq!(entry.object_id, Some(1));
        assert_eq!(entry.name.as_deref(), Some("ASSET [AV-309]"));
        assert_eq!(entry.pid, json!(714));
    }

    #[test]
    fn test_duplicate_tags_keep_first_under_bare_key() {
        let payload = payload(vec![
            element(Some(1), "AV-309", Some(714)),
            element(Some(2), "AV-309", Some(714)),
        ]);
        let index = build_tag_index(&payload);

        assert_eq!(index.len(), 2);
        assert_eq!(index["AV-309"].object_id, Some(1));
        assert_eq!(index["AV-309#2"].object_id, Some(2));
    }

    #[test]
    fn test_duplicate_without_object_id_uses_dup_suffix() {
        let payload = payload(vec![
            element(Some(1), "AV-309", Some(714)),
            element(None, "AV-309", Some(714)),
        ]);
        let index = build_tag_index(&payload);
        assert_eq!(index["AV-309#dup"].object_id, None);
    }

    #[test]
    fn test_third_idless_duplicate_overwrites_dup_key() {
        // Two id-less duplicates collide on "#dup"; the later one wins.
        let mut second = element(None, "AV-309", Some(714));
        second["name"] = json!("SECOND");
        let mut third = element(None, "AV-309", Some(714));
        third["name"] = json!("THIRD");

        let payload = payload(vec![element(Some(1), "AV-309", Some(714)), second, third]);
        let index = build_tag_index(&payload);

        assert_eq!(index.len(), 2);
        assert_eq!(index["AV-309#dup"].name.as_deref(), Some("THIRD"));
    }

    #[test]
    fn test_skips_elements_without_pid() {
        let payload = payload(vec![element(Some(1), "AV-309", None)]);
        assert!(build_tag_index(&payload).is_empty());
    }

    #[test]
    fn test_skips_blank_tag() {
        let payload = payload(vec![
            element(Some(1), "   ", Some(714)),
            element(Some(2), "", Some(714)),
        ]);
        assert!(build_tag_index(&payload).is_empty());
    }

    #[test]
    fn test_tag_trimmed_and_pid_probed_across_groups() {
        let raw = json!({"data": {"collection": [{
            "objectid": 9,
            "properties": {
                "Misc": {"Tag": "  P-100  "},
                "Drawing": {"PId": "D-7"},
            }
        }]}});
        let index = build_tag_index(&PropertyPayload::from_value(&raw));
        assert_eq!(index["P-100"].pid, json!("D-7"));
    }

    #[test]
    fn test_every_entry_has_pid() {
        let payload = payload(vec![
            element(Some(1), "A", Some(1)),
            element(Some(2), "B", None),
            element(Some(3), "C", Some(3)),
        ]);
        let index = build_tag_index(&payload);
        assert_eq!(index.len(), 2);
        assert!(index.values().all(|entry| !entry.pid.is_null()));
    }

    #[test]
    fn test_malformed_payload_yields_empty_index() {
        let payload = PropertyPayload::from_value(&json!({"data": {"collection": 1}}));
        assert!(build_tag_index(&payload).is_empty());
    }
}
