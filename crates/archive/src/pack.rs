//! Zip assembly and archive naming.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Local};
use tracing::debug;
use zip::{CompressionMethod, write::FileOptions};

use crate::ArchiveError;

/// Returns the archive file name for a send started at `at`.
///
/// The embedded timestamp has one-second resolution, so successive sends
/// get distinct names; it reduces, not guarantees, collision risk.
pub fn archive_file_name(at: DateTime<Local>) -> String {
    format!("IconRequest-{}.zip", at.format("%Y%m%d_%H%M%S"))
}

/// Zips every listed file into `dest`, flattened to file names.
///
/// Fails atomically from the caller's point of view: on any error the
/// partially written destination is removed before the error returns, so
/// no unusable archive is left behind.
pub fn zip_files(paths: &[&Path], dest: &Path) -> Result<(), ArchiveError> {
    match write_zip(paths, dest) {
        Ok(()) => {
            debug!(archive = %dest.display(), files = paths.len(), "archive created");
            Ok(())
        }
        Err(e) => {
            if dest.exists() {
                let _ = fs::remove_file(dest);
            }
            Err(e)
        }
    }
}

fn write_zip(paths: &[&Path], dest: &Path) -> Result<(), ArchiveError> {
    let file = File::create(dest)?;
    let mut zip = zip::ZipWriter::new(file);
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut buffer = [0u8; 8192];
    for path in paths {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ArchiveError::UnnamedPath(path.display().to_string()))?;

        zip.start_file(name, options)?;
        let mut reader = File::open(path)?;
        loop {
            let read = reader.read(&mut buffer)?;
            if read == 0 {
                break;
            }
            zip.write_all(&buffer[..read])?;
        }
    }

    zip.finish()?;
    Ok(())
}
