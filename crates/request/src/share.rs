//! Share channel: chooser seam, locator rewriting, email body rendering.

use iconreq_manifest::AppRecord;

use crate::config::RequestConfig;

/// Everything the platform chooser needs to present one share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    /// Locator of the request archive, possibly rewritten by a
    /// [`UriTransform`].
    pub archive_uri: String,
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
}

/// Abstract share/email chooser.
///
/// Implemented by the host app on top of the platform's share sheet.
/// Fire-and-forget from the pipeline's perspective: a returned error
/// string means the chooser could not be presented at all.
pub trait ShareTarget: Send + Sync {
    fn present(&self, request: ShareRequest) -> Result<(), String>;
}

/// Strategy for rewriting the archive locator before handoff, e.g. into
/// a content-access URI the chooser can read.
pub trait UriTransform: Send + Sync {
    fn transform(&self, locator: &str) -> String;
}

/// Default locator strategy: hands the archive URI through unchanged.
pub struct IdentityTransform;

impl UriTransform for IdentityTransform {
    fn transform(&self, locator: &str) -> String {
        locator.to_string()
    }
}

/// Renders the HTML email body for a share handoff.
///
/// Order: optional header (newlines become `<br/>`), one block per
/// selected app (name, component code, store link), then device info when
/// enabled and supplied, then the optional footer. The footer follows the
/// device block directly when both are present.
pub fn email_body(selection: &[AppRecord], config: &RequestConfig) -> String {
    let mut body = String::new();

    if let Some(header) = non_empty(config.email_header.as_deref()) {
        body.push_str(&header.replace('\n', "<br/>"));
        body.push_str("<br/><br/>");
    }

    for (i, app) in selection.iter().enumerate() {
        if i > 0 {
            body.push_str("<br/><br/>");
        }
        body.push_str(&format!("Name: <b>{}</b><br/>", app.name));
        body.push_str(&format!("Code: <b>{}</b><br/>", app.component));
        body.push_str(&format!(
            "Link: https://play.google.com/store/apps/details?id={}<br/>",
            app.pkg
        ));
    }

    let device = config
        .include_device_info
        .then_some(config.device_info.as_ref())
        .flatten();
    let footer = non_empty(config.email_footer.as_deref());

    if let Some(device) = device {
        body.push_str(&format!(
            "<br/><br/>OS: {} {}<br/>Device: {} {} ({})",
            device.os_release,
            device.os_version_name,
            device.manufacturer,
            device.model,
            device.product
        ));
        if let Some(footer) = footer {
            body.push_str("<br/>");
            body.push_str(&footer.replace('\n', "<br/>"));
        }
    } else if let Some(footer) = footer {
        body.push_str("<br/><br/>");
        body.push_str(&footer.replace('\n', "<br/>"));
    }

    body
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
