//! Icon request send pipeline.
//!
//! This crate implements the **business logic** for assembling an icon
//! request and delivering it. It is a library crate with no UI or
//! platform dependencies — the host app provides an [`IconRenderer`]
//! implementation that rasterizes app icons and a [`ShareTarget`] that
//! bridges to the platform's share/email chooser.
//!
//! # Pipeline
//!
//! 1. **Validate** — non-empty selection, usable delivery target
//! 2. **Stage** — render icons to PNG files, skip apps with no icon
//! 3. **Manifest** — render the legacy and/or JSON manifest per mode
//! 4. **Archive** — zip the staged files, clean up the staging set
//! 5. **Deliver** — upload to the request manager, or hand off to the
//!    share chooser; exactly one channel per send

pub mod config;
pub mod error;
pub mod send;
pub mod share;

// Re-export primary types for convenience.
pub use config::{DeliveryMode, DeviceInfo, RequestConfig};
pub use error::SendError;
pub use iconreq_manifest::{AppRecord, ManifestEntry, ManifestPlan};
pub use send::{IconRenderer, SendOrchestrator};
pub use share::{IdentityTransform, ShareRequest, ShareTarget, UriTransform, email_body};
