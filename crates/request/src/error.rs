//! Send pipeline error types.

use std::path::PathBuf;

use iconreq_archive::ArchiveError;

/// Errors produced by one send operation. All are terminal for the call;
/// nothing is retried internally.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("no apps were selected to send")]
    EmptySelection,

    #[error("config must provide an email recipient or a request-manager API key")]
    NoDeliveryTarget,

    #[error("unable to create staging directory {}: {source}", path.display())]
    StagingUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to save icon for {pkg}: {source}")]
    IconWrite { pkg: String, source: ArchiveError },

    #[error("failed to write {file_name}: {source}")]
    ManifestWrite {
        file_name: &'static str,
        source: ArchiveError,
    },

    #[error("failed to render manifest JSON: {0}")]
    ManifestRender(#[from] serde_json::Error),

    #[error("there are no files to put into the request archive")]
    NoContent,

    #[error("failed to create the request archive: {0}")]
    Archive(#[source] ArchiveError),

    #[error("upload failed: {0}")]
    RemoteTransport(#[source] iconreq_remote::Error),

    #[error("request manager rejected the request: {0}")]
    RemoteApi(String),

    #[error("share handoff failed: {0}")]
    Handoff(String),
}

impl From<iconreq_remote::Error> for SendError {
    /// Splits the remote error space: a backend `status == "error"`
    /// response is an application-level failure carrying the server's
    /// message; everything else is transport-level.
    fn from(e: iconreq_remote::Error) -> Self {
        match e {
            iconreq_remote::Error::Rejected(message) => SendError::RemoteApi(message),
            other => SendError::RemoteTransport(other),
        }
    }
}
