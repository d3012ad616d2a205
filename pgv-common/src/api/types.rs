//! Photo service response types
//!
//! One fetch returns a page: a `data` array of photo entries plus a `links`
//! array of named pagination handles. Cursor hrefs are opaque tokens echoed
//! back verbatim via the `c` query parameter; image hrefs are path fragments
//! made absolute by prefixing the service base URL.

use serde::{Deserialize, Serialize};

/// One page of photo metadata with its navigation links
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageResponse {
    /// Photos on this page, in display order
    pub data: Vec<PhotoResource>,
    /// Named pagination links; absent on unpaged responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<LinkResource>>,
}

/// Photo entry as returned by the service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PhotoResource {
    /// Opaque photo identifier
    pub id: String,
    /// Original file name, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Capture timestamp as reported by the service
    #[serde(rename = "dateTime", default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// Per-photo resource links
    pub links: PhotoResourceLinks,
}

/// Resource links of one photo
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PhotoResourceLinks {
    /// Path fragment of the full-size view
    pub view: String,
    /// Path fragment of the thumbnail, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
}

/// Named pagination link
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinkResource {
    /// Link name, e.g. "next" or "previous"
    pub name: String,
    /// Opaque cursor token for the adjacent page
    pub href: String,
}
