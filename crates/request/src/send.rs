//! The send orchestrator.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use image::RgbaImage;
use tracing::{debug, info};

use iconreq_archive::{StagingSet, archive_file_name, ensure_staging, zip_files};
use iconreq_manifest::{AppRecord, ManifestEntry, ManifestPlan};

use crate::config::{DeliveryMode, RequestConfig};
use crate::error::SendError;
use crate::share::{IdentityTransform, ShareRequest, ShareTarget, UriTransform, email_body};

/// File name of the legacy manifest written in share mode.
const LEGACY_MANIFEST: &str = "appfilter.xml";
/// File name of the JSON manifest written in share mode.
const JSON_MANIFEST: &str = "appfilter.json";

/// Abstract icon rasterizer.
///
/// Implemented by the host app on top of the platform's icon decoding.
/// `None` means the platform has no icon for the record; the pipeline
/// skips such apps instead of failing.
pub trait IconRenderer: Send + Sync {
    fn render(&self, record: &AppRecord) -> Option<RgbaImage>;
}

/// Drives one send operation end to end.
///
/// Construction wires the external seams and, when the config selects
/// remote delivery, builds the upload client once; the client is
/// immutable and reused across sends. One [`send`](Self::send) call is a
/// single sequential unit of work emitting exactly one outcome; callers
/// wanting cancellation abort the awaited future before delivery starts.
/// Sends sharing a staging directory must be serialized by the caller.
pub struct SendOrchestrator {
    config: RequestConfig,
    renderer: Arc<dyn IconRenderer>,
    share: Arc<dyn ShareTarget>,
    uri_transform: Arc<dyn UriTransform>,
    remote: Option<iconreq_remote::Client>,
}

impl SendOrchestrator {
    /// Creates an orchestrator for the given config and seams.
    pub fn new(
        config: RequestConfig,
        renderer: Arc<dyn IconRenderer>,
        share: Arc<dyn ShareTarget>,
    ) -> Result<Self, SendError> {
        let remote = match config.api_key() {
            Some(key) => {
                let client = iconreq_remote::Client::new(key).map_err(SendError::from)?;
                let client = match config.api_host.as_deref().filter(|h| !h.is_empty()) {
                    Some(host) => client.with_host(host),
                    None => client,
                };
                Some(client)
            }
            None => None,
        };

        Ok(Self {
            config,
            renderer,
            share,
            uri_transform: Arc::new(IdentityTransform),
            remote,
        })
    }

    /// Replaces the locator rewrite strategy (identity by default).
    pub fn with_uri_transform(mut self, transform: Arc<dyn UriTransform>) -> Self {
        self.uri_transform = transform;
        self
    }

    /// Assembles and delivers one icon request.
    ///
    /// Validates the selection and config, stages icons and manifests,
    /// archives them, clears the staged files regardless of outcome, and
    /// dispatches the archive through exactly one delivery channel.
    pub async fn send(&self, selection: &[AppRecord]) -> Result<(), SendError> {
        debug!(apps = selection.len(), "preparing icon request");

        if selection.is_empty() {
            return Err(SendError::EmptySelection);
        }
        let Some(mode) = self.config.delivery_mode() else {
            return Err(SendError::NoDeliveryTarget);
        };

        ensure_staging(&self.config.staging_dir).map_err(|source| {
            SendError::StagingUnavailable {
                path: self.config.staging_dir.clone(),
                source,
            }
        })?;

        // Staged files are transient: clear them whether or not assembly
        // succeeded, before the outcome propagates. The archive survives.
        let mut staging = StagingSet::new(&self.config.staging_dir);
        let assembled = self.assemble(selection, mode, &mut staging);
        staging.clear();
        let (archive, plan) = assembled?;

        match mode {
            DeliveryMode::Remote => {
                // A remote-mode plan always carries the JSON text.
                let apps_json = plan.json().unwrap_or_default();
                self.upload(&archive, apps_json).await
            }
            DeliveryMode::Share => self.handoff(&archive, selection),
        }
    }

    /// Stages icons and manifest files, then zips them.
    fn assemble(
        &self,
        selection: &[AppRecord],
        mode: DeliveryMode,
        staging: &mut StagingSet,
    ) -> Result<(PathBuf, ManifestPlan), SendError> {
        debug!("saving icons");
        let mut entries = Vec::with_capacity(selection.len());
        for app in selection {
            let Some(icon) = self.renderer.render(app) else {
                debug!(component = %app.component, "no icon rendered, skipping");
                continue;
            };
            staging
                .write_png(&app.pkg, &icon)
                .map_err(|source| SendError::IconWrite {
                    pkg: app.pkg.clone(),
                    source,
                })?;
            entries.push(ManifestEntry::from_record(app));
        }

        debug!(entries = entries.len(), "rendering manifests");
        let plan = ManifestPlan::for_entries(&entries, mode == DeliveryMode::Remote)?;
        if let ManifestPlan::Both { legacy, json } = &plan {
            staging
                .write_text(LEGACY_MANIFEST, legacy)
                .map_err(|source| SendError::ManifestWrite {
                    file_name: LEGACY_MANIFEST,
                    source,
                })?;
            staging
                .write_text(JSON_MANIFEST, json)
                .map_err(|source| SendError::ManifestWrite {
                    file_name: JSON_MANIFEST,
                    source,
                })?;
        }

        if staging.is_empty() {
            return Err(SendError::NoContent);
        }

        let archive = self
            .config
            .staging_dir
            .join(archive_file_name(Local::now()));
        let paths: Vec<&Path> = staging.files().iter().map(PathBuf::as_path).collect();
        zip_files(&paths, &archive).map_err(SendError::Archive)?;
        info!(archive = %archive.display(), "request archive created");

        Ok((archive, plan))
    }

    async fn upload(&self, archive: &Path, apps_json: &str) -> Result<(), SendError> {
        let Some(client) = &self.remote else {
            return Err(SendError::NoDeliveryTarget);
        };
        info!("uploading request to the request manager");
        client.upload(archive, apps_json).await?;
        info!("request accepted");
        Ok(())
    }

    fn handoff(&self, archive: &Path, selection: &[AppRecord]) -> Result<(), SendError> {
        let recipient = self
            .config
            .email_recipient()
            .unwrap_or_default()
            .to_string();

        let uri = format!("file://{}", archive.display());
        let transformed = self.uri_transform.transform(&uri);
        if transformed != uri {
            debug!(from = %uri, to = %transformed, "archive locator rewritten");
        }

        let request = ShareRequest {
            archive_uri: transformed,
            recipient,
            subject: self.config.email_subject.clone(),
            html_body: email_body(selection, &self.config),
        };

        info!("launching share handoff");
        self.share.present(request).map_err(SendError::Handoff)
    }
}
