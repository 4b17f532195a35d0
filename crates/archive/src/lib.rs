//! Staging and zip assembly for icon request payloads.
//!
//! One send operation stages its transient files (per-app PNG icons plus
//! any manifest files) into a caller-provided directory, zips them into a
//! timestamped archive, and clears the staged files afterwards. The
//! archive itself is never touched by cleanup.

pub mod pack;
pub mod staging;

pub use pack::{archive_file_name, zip_files};
pub use staging::{StagingSet, ensure_staging};

/// Errors produced while staging or archiving request files.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("staged path has no file name: {0}")]
    UnnamedPath(String),
}
