// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! QA/QC filter matching and highlight-color resolution.

use serde::{Deserialize, Serialize};

use crate::props::find_property_any_group;
use crate::types::{value_text, PropertyPayload};

/// Highlight color applied when a rule does not specify one.
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#FF0000";

/// Property names offered for filter configuration, matching the fields
/// Plant 3D assigns to P&ID elements.
pub const PROPERTY_OPTIONS: [&str; 14] = [
    "Description",
    "Status",
    "Tag",
    "Size",
    "Spec",
    "Service",
    "Insulation Thickness",
    "Type",
    "Number",
    "Capacity",
    "PnPID",
    "PnPGuid",
    "Class Name",
    "Manufacturer",
];

/// One user-declared QA/QC filter rule. Rules are evaluated in
/// declaration order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRule {
    /// Class names this rule applies to. An empty set makes the rule
    /// inert.
    #[serde(default)]
    pub class_names: Vec<String>,
    /// Optional property to check, drawn from [`PROPERTY_OPTIONS`].
    #[serde(default)]
    pub property_name: Option<String>,
    /// Expected property value; empty or absent turns the property check
    /// into an existence check.
    #[serde(default)]
    pub expected_value: Option<String>,
    /// `#RRGGBB` highlight color; [`DEFAULT_HIGHLIGHT_COLOR`] when unset.
    #[serde(default)]
    pub highlight_color: Option<String>,
}

/// A highlight instruction for the 3D viewer, serialized in the shape
/// the viewer contract expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightAssignment {
    pub external_element_id: String,
    pub color: String,
}

/// A rule with its inert parts resolved: empty class sets dropped by the
/// caller, expected value trimmed and lowercased once, color defaulted.
struct ActiveRule<'a> {
    class_names: &'a [String],
    property_name: Option<&'a str>,
    expected_value: String,
    color: &'a str,
}

fn activate(rule: &FilterRule) -> Option<ActiveRule<'_>> {
    if rule.class_names.is_empty() {
        return None;
    }
    let property_name = rule
        .property_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());
    let expected_value = rule
        .expected_value
        .as_deref()
        .map_or_else(String::new, |value| value.trim().to_lowercase());
    let color = rule
        .highlight_color
        .as_deref()
        .filter(|color| !color.is_empty())
        .unwrap_or(DEFAULT_HIGHLIGHT_COLOR);

    Some(ActiveRule {
        class_names: &rule.class_names,
        property_name,
        expected_value,
        color,
    })
}

/// Evaluate the declared rules against every element and resolve at most
/// one highlight color per element.
///
/// Elements are scanned in collection order; per element the rules are
/// tried in declaration order and the first rule that passes wins — no
/// later rule can recolor an element. Elements without a usable
/// `externalId`, without properties, or without a `Class Name` produce
/// no assignment. Property values compare case-insensitively after
/// trimming.
pub fn resolve_highlights(
    payload: &PropertyPayload,
    rules: &[FilterRule],
) -> Vec<HighlightAssignment> {
    let active: Vec<ActiveRule<'_>> = rules.iter().filter_map(activate).collect();
    if active.is_empty() {
        return Vec::new();
    }

    let mut highlights = Vec::new();

    for element in &payload.collection {
        if !element.has_properties() {
            continue;
        }
        let Some(external_id) = element.external_id.as_deref().filter(|id| !id.is_empty()) else {
            continue;
        };
        let Some(class_value) = find_property_any_group(&element.properties, "Class Name") else {
            continue;
        };
        let class_name = value_text(class_value);

        for rule in &active {
            if !rule.class_names.iter().any(|name| name == &class_name) {
                continue;
            }

            if let Some(property_name) = rule.property_name {
                let Some(actual) = find_property_any_group(&element.properties, property_name)
                else {
                    continue;
                };
                // Empty expected value means existence is enough. Both
                // sides fold Unicode case, not just ASCII.
                if !rule.expected_value.is_empty()
                    && value_text(actual).trim().to_lowercase() != rule.expected_value
                {
                    continue;
                }
            }

            highlights.push(HighlightAssignment {
                external_element_id: external_id.to_string(),
                color: rule.color.to_string(),
            });
            break; // first matching rule owns the element's color
        }
    }

    highlights
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(elements: serde_json::Value) -> PropertyPayload {
        PropertyPayload::from_value(&json!({"data": {"collection": elements}}))
    }

    fn rule(class_names: &[&str], color: &str) -> FilterRule {
        FilterRule {
            class_names: class_names.iter().map(|s| s.to_string()).collect(),
            highlight_color: Some(color.to_string()),
            ..FilterRule::default()
        }
    }

    #[test]
    fn test_class_only_rule_matches_every_instance() {
        let payload = payload(json!([
            {"externalId": "a", "properties": {"G": {"Class Name": "Valve", "Status": "Open"}}},
            {"externalId": "b", "properties": {"G": {"Class Name": "Valve"}}},
            {"externalId": "c", "properties": {"G": {"Class Name": "Pump"}}},
        ]));
        let highlights = resolve_highlights(&payload, &[rule(&["Valve"], "#00FF00")]);
        assert_eq!(
            highlights,
            vec![
                HighlightAssignment {
                    external_element_id: "a".into(),
                    color: "#00FF00".into()
                },
                HighlightAssignment {
                    external_element_id: "b".into(),
                    color: "#00FF00".into()
                },
            ]
        );
    }

    #[test]
    fn test_property_value_match_is_trimmed_case_insensitive() {
        let payload = payload(json!([
            {"externalId": "a", "properties": {"G": {"Class Name": "Valve", "Status": "  OPEN "}}},
            {"externalId": "b", "properties": {"G": {"Class Name": "Valve", "Status": "Closed"}}},
            {"externalId": "c", "properties": {"G": {"Class Name": "Valve"}}},
        ]));
        let mut with_value = rule(&["Valve"], "#0000FF");
        with_value.property_name = Some("Status".into());
        with_value.expected_value = Some("Open".into());

        let highlights = resolve_highlights(&payload, &[with_value]);
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].external_element_id, "a");
    }

    #[test]
    fn test_property_value_match_folds_unicode_case() {
        let payload = payload(json!([
            {"externalId": "a", "properties": {"G": {"Class Name": "Valve", "Status": "  GESCHLOSSEN ÖL "}}},
        ]));
        let mut with_value = rule(&["Valve"], "#0000FF");
        with_value.property_name = Some("Status".into());
        with_value.expected_value = Some("geschlossen öl".into());

        let highlights = resolve_highlights(&payload, &[with_value]);
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].external_element_id, "a");
    }

    #[test]
    fn test_property_without_value_is_existence_check() {
        let payload = payload(json!([
            {"externalId": "a", "properties": {"G": {"Class Name": "Valve", "Service": "CIP"}}},
            {"externalId": "b", "properties": {"G": {"Class Name": "Valve"}}},
        ]));
        let mut existence = rule(&["Valve"], "#0000FF");
        existence.property_name = Some("Service".into());
        existence.expected_value = Some("   ".into());

        let highlights = resolve_highlights(&payload, &[existence]);
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].external_element_id, "a");
    }

    #[test]
    fn test_first_rule_wins() {
        let payload = payload(json!([
            {"externalId": "e", "properties": {"G": {"Class Name": "Valve"}}},
        ]));
        let rules = [rule(&["Valve"], "#111111"), rule(&["Valve"], "#222222")];
        let highlights = resolve_highlights(&payload, &rules);
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].color, "#111111");
    }

    #[test]
    fn test_inert_rule_skipped() {
        let payload = payload(json!([
            {"externalId": "e", "properties": {"G": {"Class Name": "Valve"}}},
        ]));
        let rules = [rule(&[], "#111111"), rule(&["Valve"], "#222222")];
        let highlights = resolve_highlights(&payload, &rules);
        assert_eq!(highlights[0].color, "#222222");
    }

    #[test]
    fn test_default_color_applied() {
        let payload = payload(json!([
            {"externalId": "e", "properties": {"G": {"Class Name": "Valve"}}},
        ]));
        let bare = FilterRule {
            class_names: vec!["Valve".into()],
            ..FilterRule::default()
        };
        let highlights = resolve_highlights(&payload, &[bare]);
        assert_eq!(highlights[0].color, DEFAULT_HIGHLIGHT_COLOR);
    }

    #[test]
    fn test_skips_elements_without_external_id_or_class() {
        let payload = payload(json!([
            {"properties": {"G": {"Class Name": "Valve"}}},
            {"externalId": "", "properties": {"G": {"Class Name": "Valve"}}},
            {"externalId": "x", "properties": {"G": {"Size": "DN50"}}},
            {"externalId": "y", "properties": "junk"},
        ]));
        assert!(resolve_highlights(&payload, &[rule(&["Valve"], "#111111")]).is_empty());
    }

    #[test]
    fn test_no_rules_no_highlights() {
        let payload = payload(json!([
            {"externalId": "e", "properties": {"G": {"Class Name": "Valve"}}},
        ]));
        assert!(resolve_highlights(&payload, &[]).is_empty());
    }

    #[test]
    fn test_rule_deserializes_from_camel_case() {
        let rule: FilterRule = serde_json::from_value(json!({
            "classNames": ["Valve"],
            "propertyName": "Status",
            "expectedValue": "Open",
            "highlightColor": "#ABCDEF",
        }))
        .unwrap();
        assert_eq!(rule.class_names, vec!["Valve"]);
        assert_eq!(rule.property_name.as_deref(), Some("Status"));
        assert_eq!(rule.highlight_color.as_deref(), Some("#ABCDEF"));
    }
}
