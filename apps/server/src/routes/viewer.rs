// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Embedded 3D viewer pages.
//!
//! Serves a self-contained HTML page that loads the APS viewer from the
//! Autodesk CDN, opens the requested model (and optionally a specific
//! viewable), and applies QA/QC highlight colors through the viewer's
//! theming API. The token, encoded URN, guid and highlight list are
//! injected as JSON literals into the page.

use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use serde_json::json;

use plantqc_core::{encode_model_urn, resolve_highlights, HighlightAssignment};

use crate::error::ApiError;
use crate::services::derived;
use crate::types::{QaqcRequest, ViewerQuery};
use crate::AppState;

/// GET /api/v1/models/:urn/viewer?guid=...
///
/// Plain viewer page, no highlighting.
pub async fn viewer_page(
    State(state): State<AppState>,
    Path(urn): Path<String>,
    Query(query): Query<ViewerQuery>,
) -> Result<Html<String>, ApiError> {
    let token = state.aps.get_access_token().await?;
    let encoded_urn = encode_model_urn(&urn);

    Ok(Html(render_viewer(
        &token,
        &encoded_urn,
        query.guid.as_deref(),
        &[],
    )?))
}

/// POST /api/v1/models/:urn/viewer/qaqc?guid=...
///
/// Viewer page with the filter rules from the body evaluated and their
/// highlight colors applied. Inert rule sets fall back to the plain
/// viewer, matching the option pickers' empty-selection behavior.
pub async fn qaqc_page(
    State(state): State<AppState>,
    Path(urn): Path<String>,
    Query(query): Query<ViewerQuery>,
    Json(body): Json<QaqcRequest>,
) -> Result<Html<String>, ApiError> {
    let Some(guid) = query.guid.as_deref().filter(|guid| !guid.is_empty()) else {
        return Err(ApiError::MissingSelection("viewable guid"));
    };

    let token = state.aps.get_access_token().await?;
    let encoded_urn = encode_model_urn(&urn);

    let payload = derived::cached_payload(&state, &token, &encoded_urn, guid).await?;
    let highlights = resolve_highlights(&payload, &body.filters);

    Ok(Html(render_viewer(
        &token,
        &encoded_urn,
        Some(guid),
        &highlights,
    )?))
}

/// Fill the page template. Values are injected as JSON literals so no
/// manual escaping is needed.
fn render_viewer(
    token: &str,
    encoded_urn: &str,
    guid: Option<&str>,
    highlights: &[HighlightAssignment],
) -> Result<String, ApiError> {
    let page = VIEWER_TEMPLATE
        .replace("__ACCESS_TOKEN__", &serde_json::to_string(token)?)
        .replace("__MODEL_URN__", &serde_json::to_string(encoded_urn)?)
        .replace("__VIEWABLE_GUID__", &serde_json::to_string(&json!(guid))?)
        .replace("__HIGHLIGHTS__", &serde_json::to_string(highlights)?);
    Ok(page)
}

const VIEWER_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Plant 3D Viewer</title>
  <link rel="stylesheet" href="https://developer.api.autodesk.com/modelderivative/v2/viewers/7.*/style.min.css">
  <style>
    body {
      margin: 0;
      padding: 0;
      overflow: hidden;
      font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    }
    #viewer-container {
      width: 100vw;
      height: 100vh;
    }
    #highlight-overlay {
      position: absolute;
      top: 20px;
      right: 20px;
      background-color: rgba(0, 0, 0, 0.8);
      color: #ffffff;
      padding: 12px 15px;
      border-radius: 8px;
      font-size: 13px;
      opacity: 0.9;
    }
    #highlight-overlay.hidden {
      display: none;
    }
  </style>
</head>
<body>
  <div id="viewer-container"></div>
  <div id="highlight-overlay" class="hidden"></div>

  <script src="https://developer.api.autodesk.com/modelderivative/v2/viewers/7.*/viewer3D.min.js"></script>
  <script>
    const ACCESS_TOKEN = __ACCESS_TOKEN__;
    const MODEL_URN = __MODEL_URN__;
    const VIEWABLE_GUID = __VIEWABLE_GUID__;
    const HIGHLIGHTS = __HIGHLIGHTS__;

    const options = {
      env: 'AutodeskProduction',
      api: 'derivativeV2',
      getAccessToken: (onTokenReady) => onTokenReady(ACCESS_TOKEN, 3600),
    };

    function hexToVector4(hex) {
      const value = hex.replace('#', '');
      const r = parseInt(value.substring(0, 2), 16) / 255;
      const g = parseInt(value.substring(2, 4), 16) / 255;
      const b = parseInt(value.substring(4, 6), 16) / 255;
      return new THREE.Vector4(r, g, b, 1);
    }

    function applyHighlights(viewer) {
      if (!HIGHLIGHTS.length) return;
      viewer.model.getExternalIdMapping((mapping) => {
        let applied = 0;
        for (const entry of HIGHLIGHTS) {
          const dbId = mapping[entry.externalElementId];
          if (dbId === undefined) continue;
          viewer.setThemingColor(dbId, hexToVector4(entry.color), viewer.model, true);
          applied += 1;
        }
        const overlay = document.getElementById('highlight-overlay');
        overlay.textContent = 'Highlighted elements: ' + applied;
        overlay.classList.remove('hidden');
      });
    }

    Autodesk.Viewing.Initializer(options, () => {
      const viewer = new Autodesk.Viewing.GuiViewer3D(
        document.getElementById('viewer-container')
      );
      viewer.start();

      Autodesk.Viewing.Document.load('urn:' + MODEL_URN, (doc) => {
        const root = doc.getRoot();
        let viewable = VIEWABLE_GUID ? root.findByGuid(VIEWABLE_GUID) : null;
        if (!viewable) {
          viewable = root.getDefaultGeometry();
        }
        viewer.loadDocumentNode(doc, viewable).then(() => {
          viewer.addEventListener(
            Autodesk.Viewing.OBJECT_TREE_CREATED_EVENT,
            () => applyHighlights(viewer),
            { once: true }
          );
        });
      }, (code, message) => {
        document.body.innerHTML = '<p>Failed to load model: ' + message + '</p>';
      });
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_injects_json_literals() {
        let highlights = vec![HighlightAssignment {
            external_element_id: "ext-1".into(),
            color: "#00FF00".into(),
        }];
        let page = render_viewer("tok\"en", "dXJu", Some("guid-1"), &highlights).unwrap();

        // token quote is escaped, not raw
        assert!(page.contains(r#"const ACCESS_TOKEN = "tok\"en";"#));
        assert!(page.contains(r#"const MODEL_URN = "dXJu";"#));
        assert!(page.contains(r#"const VIEWABLE_GUID = "guid-1";"#));
        assert!(page.contains(r#""externalElementId":"ext-1""#));
        assert!(page.contains(r##""color":"#00FF00""##));
        assert!(!page.contains("__ACCESS_TOKEN__"));
    }

    #[test]
    fn test_render_without_guid_or_highlights() {
        let page = render_viewer("token", "dXJu", None, &[]).unwrap();
        assert!(page.contains("const VIEWABLE_GUID = null;"));
        assert!(page.contains("const HIGHLIGHTS = [];"));
    }
}
