// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Quantity-takeoff chart endpoint.
//!
//! Emits a Plotly-shaped figure JSON the front-end renders directly: a
//! donut pie of the top classes next to a horizontal bar of all classes.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use plantqc_core::{encode_model_urn, TakeoffSummary};

use crate::error::ApiError;
use crate::services::derived;
use crate::AppState;

const CHART_TITLE: &str = "Quantity Takeoff - PID Elements by Class Name";

/// Pie slice palette.
const PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// GET /api/v1/models/:urn/viewables/:guid/takeoff
pub async fn takeoff_figure(
    State(state): State<AppState>,
    Path((urn, guid)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    if guid.is_empty() {
        return Err(ApiError::MissingSelection("viewable guid"));
    }

    let token = state.aps.get_access_token().await?;
    let encoded_urn = encode_model_urn(&urn);

    let counts = derived::cached_class_counts(&state, &token, &encoded_urn, &guid).await?;
    let summary = TakeoffSummary::from_counts(&counts);

    tracing::debug!(
        urn = %encoded_urn,
        guid = %guid,
        classes = summary.labels.len(),
        total = summary.total,
        "Built takeoff summary"
    );

    Ok(Json(build_figure(&summary)))
}

/// Assemble the combined pie + bar figure. An empty summary renders as a
/// single centered annotation instead of empty traces.
fn build_figure(summary: &TakeoffSummary) -> Value {
    if summary.is_empty() {
        return placeholder_figure("No PID elements found in the selected view");
    }

    let pie_colors: Vec<&str> = PALETTE
        .iter()
        .copied()
        .cycle()
        .take(summary.pie_labels.len())
        .collect();

    // Bar opacity scales with the value for a gradient effect
    let max_value = summary.bar_values.iter().copied().max().unwrap_or(1).max(1);
    let bar_colors: Vec<String> = summary
        .bar_values
        .iter()
        .map(|&value| {
            let alpha = 0.4 + 0.6 * (value as f64 / max_value as f64);
            format!("rgba(99, 110, 250, {alpha:.3})")
        })
        .collect();

    let chart_height = (summary.labels.len() * 25 + 150).max(500);

    json!({
        "data": [
            {
                "type": "pie",
                "labels": summary.pie_labels,
                "values": summary.pie_values,
                "hole": 0.4,
                "textinfo": "percent",
                "textposition": "outside",
                "marker": {"colors": pie_colors},
                "showlegend": false,
                "domain": {"x": [0.0, 0.35]},
            },
            {
                "type": "bar",
                "orientation": "h",
                "x": summary.bar_values,
                "y": summary.bar_labels,
                "text": summary.bar_values,
                "textposition": "outside",
                "marker": {
                    "color": bar_colors,
                    "line": {"color": "rgba(99, 110, 250, 1)", "width": 1},
                },
                "customdata": summary.bar_percentages,
                "showlegend": false,
                "xaxis": "x2",
                "yaxis": "y2",
            },
        ],
        "layout": {
            "title": {
                "text": format!(
                    "<b>{CHART_TITLE}</b><br><sup>Total: {} elements | {} unique classes</sup>",
                    summary.total,
                    summary.labels.len()
                ),
                "x": 0.5,
                "xanchor": "center",
            },
            "height": chart_height,
            "margin": {"t": 100, "b": 50, "l": 200, "r": 80},
            "showlegend": false,
            "xaxis2": {
                "title": {"text": "Count"},
                "domain": [0.45, 1.0],
                "gridcolor": "lightgray",
                "range": [0, summary.values.first().copied().unwrap_or(0) as f64 * 1.15],
            },
            "yaxis2": {"tickfont": {"size": 10}},
            "annotations": [
                {"text": "Distribution Overview", "x": 0.175, "y": 1.05,
                 "xref": "paper", "yref": "paper", "showarrow": false},
                {"text": "Count by Class Name", "x": 0.725, "y": 1.05,
                 "xref": "paper", "yref": "paper", "showarrow": false},
            ],
        },
    })
}

fn placeholder_figure(message: &str) -> Value {
    json!({
        "data": [],
        "layout": {
            "title": {"text": CHART_TITLE},
            "showlegend": false,
            "annotations": [{
                "text": message,
                "xref": "paper", "yref": "paper",
                "x": 0.5, "y": 0.5,
                "showarrow": false,
                "font": {"size": 16},
            }],
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantqc_core::ClassCounts;

    fn summary(pairs: &[(&str, usize)]) -> TakeoffSummary {
        let counts: ClassCounts = pairs
            .iter()
            .map(|(name, count)| (name.to_string(), *count))
            .collect();
        TakeoffSummary::from_counts(&counts)
    }

    #[test]
    fn test_empty_summary_renders_placeholder() {
        let figure = build_figure(&summary(&[]));
        assert_eq!(figure["data"].as_array().unwrap().len(), 0);
        let annotation = &figure["layout"]["annotations"][0]["text"];
        assert_eq!(annotation, "No PID elements found in the selected view");
    }

    #[test]
    fn test_figure_has_pie_and_bar_traces() {
        let figure = build_figure(&summary(&[("Single_Valve", 3), ("Pump", 1)]));
        let traces = figure["data"].as_array().unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0]["type"], "pie");
        assert_eq!(traces[1]["type"], "bar");
        // bar reversed: largest value last
        assert_eq!(traces[1]["x"][1], 3);
        assert_eq!(traces[1]["y"][1], "Single Valve");
    }

    #[test]
    fn test_title_carries_totals() {
        let figure = build_figure(&summary(&[("A", 2), ("B", 2)]));
        let title = figure["layout"]["title"]["text"].as_str().unwrap();
        assert!(title.contains("Total: 4 elements"));
        assert!(title.contains("2 unique classes"));
    }

    #[test]
    fn test_bar_alpha_gradient_bounds() {
        let figure = build_figure(&summary(&[("A", 10), ("B", 1)]));
        let colors = figure["data"][1]["marker"]["color"].as_array().unwrap();
        // smallest value first (reversed series), faintest color
        assert_eq!(colors[0], "rgba(99, 110, 250, 0.460)");
        assert_eq!(colors[1], "rgba(99, 110, 250, 1.000)");
    }
}
