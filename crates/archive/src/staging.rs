//! Staging directory management for one in-flight send operation.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::{debug, warn};

use crate::ArchiveError;

/// Ensures the staging directory exists, creating it recursively.
pub fn ensure_staging(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}

/// The ordered set of transient files written by one send operation.
///
/// Owned exclusively by the pipeline for the duration of one send call.
/// Only files tracked here are ever removed by [`StagingSet::clear`]:
/// never the archive, never pre-existing files in the same directory.
/// Concurrent sends against the same directory are unsupported; callers
/// serialize sends or configure distinct directories.
#[derive(Debug)]
pub struct StagingSet {
    dir: PathBuf,
    files: Vec<PathBuf>,
}

impl StagingSet {
    /// Creates an empty staging set rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            files: Vec::new(),
        }
    }

    /// The staging directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths staged so far, in write order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// True when nothing has been staged.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Encodes an icon image as `<pkg>.png` in the staging directory.
    pub fn write_png(&mut self, pkg: &str, icon: &RgbaImage) -> Result<PathBuf, ArchiveError> {
        let dest = self.dir.join(format!("{pkg}.png"));
        icon.save_with_format(&dest, image::ImageFormat::Png)?;
        debug!(path = %dest.display(), "staged icon");
        self.files.push(dest.clone());
        Ok(dest)
    }

    /// Writes a manifest text file into the staging directory.
    pub fn write_text(&mut self, file_name: &str, text: &str) -> Result<PathBuf, ArchiveError> {
        let dest = self.dir.join(file_name);
        fs::write(&dest, text)?;
        debug!(path = %dest.display(), "staged manifest");
        self.files.push(dest.clone());
        Ok(dest)
    }

    /// Removes every staged file, best-effort.
    ///
    /// Failures are logged and do not propagate, so cleanup can never mask
    /// the outcome of the send that triggered it. Files that were already
    /// removed (or never written) are skipped silently.
    pub fn clear(&mut self) {
        let mut removed = 0u32;
        for path in self.files.drain(..) {
            if !path.exists() {
                continue;
            }
            if let Err(e) = fs::remove_file(&path) {
                warn!(path = %path.display(), error = %e, "failed to remove staged file");
            } else {
                removed += 1;
            }
        }
        if removed > 0 {
            debug!(removed, dir = %self.dir.display(), "cleared staging files");
        }
    }
}
