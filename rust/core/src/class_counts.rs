// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Quantity-takeoff counts grouped by equipment class name.

use rustc_hash::FxHashMap;

use crate::props::{find_property_any_group, resolve_pid};
use crate::types::{value_text, PropertyPayload};

const CLASS_NAME_KEY: &str = "Class Name";

/// Bucket for elements with a missing or blank class name.
pub const UNKNOWN_CLASS: &str = "Unknown";

/// Element count per class name. No iteration-order guarantee; consumers
/// that need deterministic output sort explicitly (count descending for
/// charts and option lists).
pub type ClassCounts = FxHashMap<String, usize>;

/// Count elements per class name, restricted to elements that belong to
/// a P&ID (same skip rules as the tag index: well-formed properties and
/// a resolvable P&ID alias). A missing or blank-after-trim `Class Name`
/// counts under [`UNKNOWN_CLASS`].
pub fn build_class_name_counts(payload: &PropertyPayload) -> ClassCounts {
    let mut counts = ClassCounts::default();

    for element in &payload.collection {
        if !element.has_properties() {
            continue;
        }
        if resolve_pid(&element.properties).is_none() {
            continue;
        }

        let class_name = match find_property_any_group(&element.properties, CLASS_NAME_KEY) {
            Some(value) => {
                let name = value_text(value).trim().to_string();
                if name.is_empty() {
                    UNKNOWN_CLASS.to_string()
                } else {
                    name
                }
            }
            None => UNKNOWN_CLASS.to_string(),
        };

        *counts.entry(class_name).or_insert(0) += 1;
    }

    counts
}
