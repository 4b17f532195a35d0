//! Data types for icon requests.

use serde::{Deserialize, Serialize};

use crate::token::drawable_token;

/// An application identity record selected for an icon request.
///
/// Supplied by the caller (typically from the platform's installed-app
/// list); read-only to the pipeline. Icon pixels are not part of the
/// record; rasterization happens behind the renderer seam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRecord {
    /// User-facing display name, e.g. `"Camera"`.
    pub name: String,
    /// Package identifier, e.g. `"com.cam"`.
    pub pkg: String,
    /// Launcher component identifier, e.g. `"com.cam/.Main"`.
    pub component: String,
}

impl AppRecord {
    /// Creates a record from its three identity strings.
    pub fn new(
        name: impl Into<String>,
        pkg: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pkg: pkg.into(),
            component: component.into(),
        }
    }
}

/// One manifest line item, derived from an [`AppRecord`].
///
/// The `drawable` token is computed once here and reused verbatim by both
/// manifest formats, so the two renderings can never disagree on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub pkg: String,
    #[serde(rename = "componentInfo")]
    pub component_info: String,
    pub drawable: String,
}

impl ManifestEntry {
    /// Derives the manifest entry for a record.
    pub fn from_record(record: &AppRecord) -> Self {
        Self {
            name: record.name.clone(),
            pkg: record.pkg.clone(),
            component_info: record.component.clone(),
            drawable: drawable_token(&record.name),
        }
    }
}
