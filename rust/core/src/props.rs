// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property lookup across arbitrarily named property groups.

use serde_json::Value;

/// Ordered key aliases under which an element's P&ID identifier may be
/// stored. The first alias that resolves wins.
pub const PID_KEY_ALIASES: [&str; 4] = ["PnPID", "PId", "PID", "P&ID"];

/// Search every property group for `key` and return the value from the
/// first group (payload order) that contains it.
///
/// The lookup stops at the first group containing the key even when a
/// later group carries the same key; this first-group-wins policy is
/// explicit, not incidental. A JSON `null` value reads as absent. A
/// non-object `properties` value or non-object group is skipped rather
/// than treated as a fault.
pub fn find_property_any_group<'a>(properties: &'a Value, key: &str) -> Option<&'a Value> {
    let groups = properties.as_object()?;

    for group in groups.values() {
        if let Some(group) = group.as_object() {
            if let Some(value) = group.get(key) {
                return if value.is_null() { None } else { Some(value) };
            }
        }
    }
    None
}

/// Resolve an element's P&ID identifier by probing [`PID_KEY_ALIASES`]
/// in order. `None` means the element does not belong to a P&ID.
pub fn resolve_pid(properties: &Value) -> Option<&Value> {
    PID_KEY_ALIASES
        .iter()
        .find_map(|key| find_property_any_group(properties, key))
}
