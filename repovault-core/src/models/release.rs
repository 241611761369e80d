//! Release types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A release as returned by the forge API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    /// Forge-assigned identifier.
    pub id: u64,
    /// Git tag the release was cut from.
    pub tag_name: String,
    /// Free-text release notes.
    pub body: Option<String>,
    /// Downloadable binaries attached to the release.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
    /// All remaining API fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A downloadable binary attached to a release.
///
/// Fetched and written to disk; the record itself is not rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseAsset {
    /// Target filename for the download.
    pub name: String,
    /// API download endpoint. Requires an octet-stream accept header to
    /// return raw bytes instead of the asset's metadata.
    pub url: String,
    /// All remaining API fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A release ready for persistence, body rewritten to local asset paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivedRelease {
    /// Forge-assigned identifier.
    pub id: u64,
    /// Git tag the release was cut from.
    pub tag_name: String,
    /// Release notes with embedded remote asset links rewritten.
    pub body: Option<String>,
    /// Downloadable binaries, records unchanged.
    pub assets: Vec<ReleaseAsset>,
    /// All remaining API fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Release {
    /// Creates a release with just the fields the backup logic touches.
    pub fn new(id: u64, tag_name: impl Into<String>, body: Option<String>) -> Self {
        Self {
            id,
            tag_name: tag_name.into(),
            body,
            assets: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Consumes the fetched release into its archived form with the
    /// rewritten body. Asset records are carried over untouched.
    pub fn into_archived(self, body: Option<String>) -> ArchivedRelease {
        ArchivedRelease {
            id: self.id,
            tag_name: self.tag_name,
            body,
            assets: self.assets,
            extra: self.extra,
        }
    }
}
