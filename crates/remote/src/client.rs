//! Request-manager upload client.

use std::path::Path;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::types::ApiResponse;

/// Default request-manager endpoint, used when no host is configured.
pub const DEFAULT_HOST: &str = "https://requests.iconreq.dev/v1";

/// Fixed product identifier sent as the `User-Agent` header.
const USER_AGENT: &str = "iconreq/request";

/// Errors from the request-manager client.
///
/// [`Error::Rejected`] is the application-level protocol failure
/// (`status == "error"` in the response body); every other variant is
/// transport-level.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Rejected(String),

    #[error("invalid API key")]
    InvalidKey,
}

/// Request-manager API client.
///
/// Holds an immutable `reqwest::Client` with the auth and accept headers
/// installed at construction time; safe to share and reuse across sends.
pub struct Client {
    http: reqwest::Client,
    host: String,
}

impl Client {
    /// Creates a new client authenticating with `api_key` against
    /// [`DEFAULT_HOST`].
    pub fn new(api_key: &str) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "tokenid",
            HeaderValue::from_str(api_key).map_err(|_| Error::InvalidKey)?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            host: DEFAULT_HOST.to_string(),
        })
    }

    /// Overrides the endpoint host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Uploads one request archive with its JSON manifest text.
    ///
    /// The multipart body carries the archive bytes as part `archive`
    /// (filename `icons.zip`, `application/zip`) and the manifest text
    /// verbatim as part `apps`. A single attempt; no retry.
    pub async fn upload(&self, archive: &Path, apps_json: &str) -> Result<(), Error> {
        let bytes = std::fs::read(archive)?;
        debug!(host = %self.host, archive_bytes = bytes.len(), "uploading request archive");

        let form = Form::new()
            .part(
                "archive",
                Part::bytes(bytes)
                    .file_name("icons.zip")
                    .mime_str("application/zip")?,
            )
            .text("apps", apps_json.to_string());

        let resp = self.http.post(&self.host).multipart(form).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        match serde_json::from_slice::<ApiResponse>(&body) {
            Ok(parsed) if parsed.is_error() => Err(Error::Rejected(
                parsed.error.unwrap_or_else(|| "unknown error".to_string()),
            )),
            Ok(_) => Ok(()),
            Err(e) if status.is_success() => Err(Error::Json(e)),
            Err(_) => Err(Error::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            }),
        }
    }
}
