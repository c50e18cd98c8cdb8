// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Option lists for the UI pickers (viewables, tags, class names).

use serde::{Deserialize, Serialize};

use crate::class_counts::ClassCounts;
use crate::tag_index::TagIndex;

/// One picker option: display label plus the value submitted back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionItem {
    pub label: String,
    pub value: String,
}

/// A viewable scene/sheet descriptor from the Model Derivative metadata
/// endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewable {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub guid: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Viewable picker options: label `"name (role)"` (or bare name when the
/// role is empty), value = guid. Entries without a guid are dropped.
pub fn viewable_options(viewables: &[Viewable]) -> Vec<OptionItem> {
    viewables
        .iter()
        .filter_map(|viewable| {
            let guid = viewable.guid.as_deref()?;
            let name = viewable.name.as_deref().unwrap_or("Unknown View");
            let label = match viewable.role.as_deref() {
                Some(role) if !role.is_empty() => format!("{name} ({role})"),
                _ => name.to_string(),
            };
            Some(OptionItem {
                label,
                value: guid.to_string(),
            })
        })
        .collect()
}

/// Tag picker options: sorted tag strings, label == value. The index is
/// a `BTreeMap`, so iteration is already sorted.
pub fn tag_options(index: &TagIndex) -> Vec<OptionItem> {
    index
        .keys()
        .map(|tag| OptionItem {
            label: tag.clone(),
            value: tag.clone(),
        })
        .collect()
}

/// Class-name picker options sorted by count descending, label
/// `"Display Name (count)"` with underscores rendered as spaces, value =
/// raw class name. Equal counts order by name so output is deterministic.
pub fn class_name_options(counts: &ClassCounts) -> Vec<OptionItem> {
    let mut sorted: Vec<(&String, &usize)> = counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    sorted
        .into_iter()
        .map(|(class_name, count)| OptionItem {
            label: format!("{} ({count})", class_name.replace('_', " ")),
            value: class_name.clone(),
        })
        .collect()
}
