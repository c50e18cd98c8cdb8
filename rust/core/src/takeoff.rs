// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Quantity-takeoff chart data derived from class counts.

use serde::Serialize;

use crate::class_counts::ClassCounts;

/// Pie slices kept before the remainder folds into "Other".
pub const PIE_TOP_N: usize = 8;

/// Data backing the combined takeoff chart: a donut pie of the top
/// classes and a horizontal bar of all classes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TakeoffSummary {
    /// Display labels (underscores rendered as spaces), count descending.
    pub labels: Vec<String>,
    /// Counts aligned with `labels`.
    pub values: Vec<usize>,
    /// Sum of all counts.
    pub total: usize,
    /// Pie labels: top [`PIE_TOP_N`] classes plus an `"Other"` bucket
    /// when more classes exist.
    pub pie_labels: Vec<String>,
    pub pie_values: Vec<usize>,
    /// Bar series reversed so the largest class renders at the top.
    pub bar_labels: Vec<String>,
    pub bar_values: Vec<usize>,
    /// Percentage per bar: `value / total * 100`.
    pub bar_percentages: Vec<f64>,
}

impl TakeoffSummary {
    /// Derive the chart series from raw class counts. Ordering is count
    /// descending with name-ascending tie-breaks so repeated renders are
    /// identical.
    pub fn from_counts(counts: &ClassCounts) -> Self {
        let mut sorted: Vec<(&String, &usize)> = counts.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        let labels: Vec<String> = sorted
            .iter()
            .map(|(name, _)| name.replace('_', " "))
            .collect();
        let values: Vec<usize> = sorted.iter().map(|(_, count)| **count).collect();
        let total: usize = values.iter().sum();

        let (pie_labels, pie_values) = if labels.len() > PIE_TOP_N {
            let mut pie_labels: Vec<String> = labels[..PIE_TOP_N].to_vec();
            let mut pie_values: Vec<usize> = values[..PIE_TOP_N].to_vec();
            pie_labels.push("Other".to_string());
            pie_values.push(values[PIE_TOP_N..].iter().sum());
            (pie_labels, pie_values)
        } else {
            (labels.clone(), values.clone())
        };

        let bar_labels: Vec<String> = labels.iter().rev().cloned().collect();
        let bar_values: Vec<usize> = values.iter().rev().copied().collect();
        let bar_percentages = bar_values
            .iter()
            .map(|&value| value as f64 / total.max(1) as f64 * 100.0)
            .collect();

        Self {
            labels,
            values,
            total,
            pie_labels,
            pie_values,
            bar_labels,
            bar_values,
            bar_percentages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, usize)]) -> ClassCounts {
        pairs
            .iter()
            .map(|(name, count)| (name.to_string(), *count))
            .collect()
    }

    #[test]
    fn test_descending_order_and_display_labels() {
        let summary =
            TakeoffSummary::from_counts(&counts(&[("Single_Valve", 12), ("Pump", 3), ("Tank", 7)]));
        assert_eq!(summary.labels, vec!["Single Valve", "Tank", "Pump"]);
        assert_eq!(summary.values, vec![12, 7, 3]);
        assert_eq!(summary.total, 22);
    }

    #[test]
    fn test_pie_buckets_remainder_as_other() {
        let pairs: Vec<(String, usize)> = (0..10).map(|i| (format!("Class_{i}"), 10 - i)).collect();
        let counts: ClassCounts = pairs.into_iter().collect();

        let summary = TakeoffSummary::from_counts(&counts);
        assert_eq!(summary.pie_labels.len(), PIE_TOP_N + 1);
        assert_eq!(summary.pie_labels.last().map(String::as_str), Some("Other"));
        // classes 8 and 9 carry counts 2 and 1
        assert_eq!(summary.pie_values.last(), Some(&3));
    }

    #[test]
    fn test_small_pie_has_no_other() {
        let summary = TakeoffSummary::from_counts(&counts(&[("A", 1), ("B", 2)]));
        assert!(!summary.pie_labels.iter().any(|label| label == "Other"));
    }

    #[test]
    fn test_bar_series_reversed_with_percentages() {
        let summary = TakeoffSummary::from_counts(&counts(&[("A", 3), ("B", 1)]));
        assert_eq!(summary.bar_labels, vec!["B", "A"]);
        assert_eq!(summary.bar_values, vec![1, 3]);
        assert_eq!(summary.bar_percentages, vec![25.0, 75.0]);
    }

    #[test]
    fn test_empty_counts() {
        let summary = TakeoffSummary::from_counts(&ClassCounts::default());
        assert!(summary.is_empty());
        assert_eq!(summary.total, 0);
    }
}
