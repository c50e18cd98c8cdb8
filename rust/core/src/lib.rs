// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # PlantQC Core
//!
//! Pure data transformations over Autodesk Model Derivative property
//! payloads for Plant 3D models:
//!
//! - **Property Lookup**: resolve a key across arbitrarily named property
//!   groups ([`find_property_any_group`])
//! - **Tag Index**: deduplicated tag → element lookup table
//!   ([`build_tag_index`])
//! - **Quantity Takeoff**: per-class element counts and chart summaries
//!   ([`build_class_name_counts`], [`TakeoffSummary`])
//! - **QA/QC Filters**: first-match-wins highlight resolution
//!   ([`resolve_highlights`])
//!
//! Everything in this crate is synchronous and I/O-free. Malformed
//! upstream data (missing `collection`, non-object `properties`) is
//! treated as empty input, never as an error: Plant 3D property payloads
//! are heterogeneous by nature and tolerance is deliberate.
//!
//! ## Quick Start
//!
//! ```rust
//! use plantqc_core::{PropertyPayload, build_tag_index, build_class_name_counts};
//!
//! let raw = serde_json::json!({
//!     "data": {"collection": [{
//!         "objectid": 42,
//!         "name": "ACPPASSET [4612B]",
//!         "externalId": "ext-42",
//!         "properties": {
//!             "General": {"Tag": "AV-309", "PnPID": 714},
//!             "Asset": {"Class Name": "Single_Valve"}
//!         }
//!     }]}
//! });
//!
//! let payload = PropertyPayload::from_value(&raw);
//! let index = build_tag_index(&payload);
//! assert!(index.contains_key("AV-309"));
//!
//! let counts = build_class_name_counts(&payload);
//! assert_eq!(counts["Single_Valve"], 1);
//! ```

pub mod class_counts;
pub mod filters;
pub mod options;
pub mod props;
pub mod tag_index;
pub mod takeoff;
pub mod types;
pub mod urn;

pub use class_counts::{build_class_name_counts, ClassCounts, UNKNOWN_CLASS};
pub use filters::{
    resolve_highlights, FilterRule, HighlightAssignment, DEFAULT_HIGHLIGHT_COLOR, PROPERTY_OPTIONS,
};
pub use options::{class_name_options, tag_options, viewable_options, OptionItem, Viewable};
pub use props::{find_property_any_group, resolve_pid, PID_KEY_ALIASES};
pub use tag_index::{build_tag_index, TagIndex, TagIndexEntry};
pub use takeoff::{TakeoffSummary, PIE_TOP_N};
pub use types::{value_text, ElementRecord, PropertyPayload};
pub use urn::encode_model_urn;
