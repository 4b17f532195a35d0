//! Send configuration.

use std::path::PathBuf;

/// Which delivery channel a send uses. Exactly one executes per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Direct HTTP upload to the request manager.
    Remote,
    /// Handoff to the platform share/email chooser.
    Share,
}

/// Device and OS identity strings appended to the share email body.
///
/// Metadata lookup is the host app's job; the pipeline treats these as
/// opaque text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceInfo {
    pub os_release: String,
    pub os_version_name: String,
    pub manufacturer: String,
    pub model: String,
    pub product: String,
}

/// Configuration for one or more send operations.
///
/// A config is usable when at least one of `email_recipient` / `api_key`
/// is non-empty. A non-empty `api_key` selects remote delivery; otherwise
/// the share channel is used. Empty strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub email_recipient: Option<String>,
    pub api_key: Option<String>,
    /// Request-manager endpoint; falls back to the client's default host.
    pub api_host: Option<String>,
    /// Directory holding transient per-request files and the archive.
    pub staging_dir: PathBuf,
    pub include_device_info: bool,
    pub email_header: Option<String>,
    pub email_footer: Option<String>,
    pub email_subject: String,
    pub device_info: Option<DeviceInfo>,
}

impl RequestConfig {
    /// Creates a config with the default subject and device info enabled.
    pub fn new(staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
            include_device_info: true,
            email_subject: "Icon Request".to_string(),
            ..Self::default()
        }
    }

    /// The non-empty API key, if one is configured.
    pub fn api_key(&self) -> Option<&str> {
        non_empty(self.api_key.as_deref())
    }

    /// The non-empty recipient, if one is configured.
    pub fn email_recipient(&self) -> Option<&str> {
        non_empty(self.email_recipient.as_deref())
    }

    /// The delivery channel this config selects, or `None` when the
    /// config has no usable delivery target.
    pub fn delivery_mode(&self) -> Option<DeliveryMode> {
        if self.api_key().is_some() {
            Some(DeliveryMode::Remote)
        } else if self.email_recipient().is_some() {
            Some(DeliveryMode::Share)
        } else {
            None
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
