//! App records and icon-pack manifest rendering.
//!
//! An icon request maps each selected application to an icon resource
//! token. This crate derives those tokens from display names and renders
//! the two manifest formats understood by icon-pack tooling: the legacy
//! `appfilter.xml` shape and the JSON `components` document.

pub mod render;
pub mod token;
pub mod types;

pub use render::{ManifestPlan, render_json, render_legacy};
pub use token::drawable_token;
pub use types::{AppRecord, ManifestEntry};
