// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request types for the API.

use plantqc_core::FilterRule;
use serde::Deserialize;

/// Body of a QA/QC request: filter rules in declaration order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QaqcRequest {
    #[serde(default)]
    pub filters: Vec<FilterRule>,
}

/// Query parameters for the viewer page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewerQuery {
    /// Viewable guid to open; the viewer falls back to the default
    /// viewable when absent.
    #[serde(default)]
    pub guid: Option<String>,
}
