//! Download links for generated documents.
//!
//! The artifact travels to the browser inline, as a base64 `data:` URI in
//! the `href` of an anchor with a `download` attribute.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// MIME type used in the data URI.
pub const DOWNLOAD_MIME: &str = "application/octet-stream";

/// Anchor text of the download link.
pub const DOWNLOAD_TEXT: &str = "Download the generated document";

/// A downloadable artifact encoded as a data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    /// Suggested file name
    pub file_name: String,
    /// `data:` URI carrying the bytes
    pub href: String,
}

impl DownloadLink {
    /// Encode bytes as a download link.
    pub fn new(bytes: &[u8], file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            href: data_uri(bytes, DOWNLOAD_MIME),
        }
    }

    /// Decode the payload back into bytes.
    pub fn decode(&self) -> Option<Vec<u8>> {
        let (_, payload) = self.href.split_once(";base64,")?;
        BASE64.decode(payload).ok()
    }
}

/// Build a base64 `data:` URI.
pub fn data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}
