// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model URN encoding for Model Derivative API calls.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Encode a version URN for use in Model Derivative URLs.
///
/// A `urn:`-prefixed value is base64url-encoded (UTF-8 bytes) without
/// trailing `=` padding. Anything else is assumed to be already encoded
/// and passes through with trailing `=` stripped.
pub fn encode_model_urn(urn: &str) -> String {
    if urn.starts_with("urn:") {
        URL_SAFE_NO_PAD.encode(urn.as_bytes())
    } else {
        urn.trim_end_matches('=').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urn_is_base64url_without_padding() {
        let encoded = encode_model_urn("urn:adsk.wipprod:fs.file:vf.xyz");
        assert_eq!(encoded, "dXJuOmFkc2sud2lwcHJvZDpmcy5maWxlOnZmLnh5eg");
        assert!(!encoded.ends_with('='));
    }

    #[test]
    fn test_non_urn_passes_through_minus_padding() {
        assert_eq!(encode_model_urn("already-encoded=="), "already-encoded");
        assert_eq!(encode_model_urn("already-encoded"), "already-encoded");
    }
}
