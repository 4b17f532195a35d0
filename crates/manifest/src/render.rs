//! Manifest rendering for the two icon-pack formats.

use serde::Serialize;

use crate::types::ManifestEntry;

/// Static opening block of the legacy manifest: mask directives plus the
/// scale directive, as icon-pack dashboards expect them.
const LEGACY_HEADER: &str = "<resources>\n    \
    <iconback img1=\"iconback\" />\n    \
    <iconmask img1=\"iconmask\" />\n    \
    <iconupon img1=\"iconupon\" />\n    \
    <scale factor=\"1.0\" />";

const LEGACY_FOOTER: &str = "\n\n</resources>";

/// Renders the legacy `appfilter.xml`-style manifest.
///
/// One commented item per entry, in selection order:
///
/// ```xml
///     <!-- Camera -->
///     <item
///         component="ComponentInfo{com.cam/.Main}"
///         drawable="camera" />
/// ```
pub fn render_legacy(entries: &[ManifestEntry]) -> String {
    let mut out = String::from(LEGACY_HEADER);
    for entry in entries {
        out.push_str("\n\n    <!-- ");
        out.push_str(&entry.name);
        out.push_str(" -->\n");
        out.push_str(&format!(
            "    <item\n        component=\"ComponentInfo{{{}}}\"\n        drawable=\"{}\" />",
            entry.component_info, entry.drawable
        ));
    }
    out.push_str(LEGACY_FOOTER);
    out
}

#[derive(Serialize)]
struct ComponentsDocument<'a> {
    components: &'a [ManifestEntry],
}

/// Renders the JSON manifest: `{ "components": [ ... ] }` with one object
/// per entry (`name`, `pkg`, `componentInfo`, `drawable`), in selection
/// order.
pub fn render_json(entries: &[ManifestEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ComponentsDocument {
        components: entries,
    })
}

/// The manifest text(s) a single send operation works with, selected once
/// from the delivery mode.
///
/// Remote delivery attaches the JSON text to the upload body and never
/// writes it to disk; share delivery writes both formats into the staging
/// set. Both variants are rendered from the same entries, so drawable
/// tokens always agree between formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestPlan {
    /// Legacy text only.
    Legacy(String),
    /// JSON text only, kept in memory for the upload body.
    Json(String),
    /// Both formats, both destined for the staging set.
    Both { legacy: String, json: String },
}

impl ManifestPlan {
    /// Selects and renders the plan for a delivery mode.
    pub fn for_entries(entries: &[ManifestEntry], remote: bool) -> Result<Self, serde_json::Error> {
        if remote {
            Ok(ManifestPlan::Json(render_json(entries)?))
        } else {
            Ok(ManifestPlan::Both {
                legacy: render_legacy(entries),
                json: render_json(entries)?,
            })
        }
    }

    /// The JSON text, if this plan carries one.
    pub fn json(&self) -> Option<&str> {
        match self {
            ManifestPlan::Json(json) | ManifestPlan::Both { json, .. } => Some(json),
            ManifestPlan::Legacy(_) => None,
        }
    }

    /// The legacy text, if this plan carries one.
    pub fn legacy(&self) -> Option<&str> {
        match self {
            ManifestPlan::Legacy(legacy) | ManifestPlan::Both { legacy, .. } => Some(legacy),
            ManifestPlan::Json(_) => None,
        }
    }
}
