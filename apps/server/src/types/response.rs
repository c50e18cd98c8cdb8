// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use plantqc_core::{HighlightAssignment, OptionItem};
use serde::Serialize;

/// Option list for a UI picker (viewables, tags, class names).
#[derive(Debug, Clone, Serialize)]
pub struct OptionsResponse {
    pub options: Vec<OptionItem>,
}

/// Resolved QA/QC highlights, one entry per matched element.
#[derive(Debug, Clone, Serialize)]
pub struct QaqcResponse {
    pub highlights: Vec<HighlightAssignment>,
    pub count: usize,
}
