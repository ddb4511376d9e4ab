use std::{
    error::Error,
    fmt, fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::{DateTime, Local};

use crate::{owner::OwnerResolver, record::FileRecord};

/// Per-file failure while reading metadata. Never fatal for a scan: the file
/// is skipped and the condition logged.
#[derive(Debug)]
pub enum ExtractError {
    /// The path disappeared between discovery and extraction.
    Vanished(PathBuf),
    PermissionDenied(PathBuf),
    Io { path: PathBuf, source: io::Error },
}

impl ExtractError {
    fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ExtractError::Vanished(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => ExtractError::PermissionDenied(path.to_path_buf()),
            _ => ExtractError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Vanished(p) => write!(f, "{} vanished during scan", p.display()),
            ExtractError::PermissionDenied(p) => {
                write!(f, "permission denied reading metadata of {}", p.display())
            }
            ExtractError::Io { path, source } => {
                write!(f, "cannot read metadata of {}: {source}", path.display())
            }
        }
    }
}

impl Error for ExtractError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExtractError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Builds [`FileRecord`]s from paths. Cheap to clone; clones share the
/// owner-name cache.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    owners: Arc<OwnerResolver>,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_owner_resolver(owners: Arc<OwnerResolver>) -> Self {
        Self { owners }
    }

    /// Read the metadata of `path` without following symlinks.
    pub fn extract(&self, path: &Path) -> Result<FileRecord, ExtractError> {
        let metadata = fs::symlink_metadata(path).map_err(|e| ExtractError::from_io(path, e))?;
        let modified = metadata
            .modified()
            .map_err(|e| ExtractError::from_io(path, e))?;

        let (owner, permissions) = self.ownership(&metadata);

        Ok(FileRecord {
            path: path.to_path_buf(),
            size: metadata.len(),
            owner,
            permissions,
            modified: DateTime::<Local>::from(modified),
        })
    }

    #[cfg(unix)]
    fn ownership(&self, metadata: &fs::Metadata) -> (String, String) {
        use std::os::unix::fs::MetadataExt;

        (
            self.owners.resolve(metadata.uid()),
            crate::permissions::render_mode(metadata.mode()),
        )
    }

    #[cfg(not(unix))]
    fn ownership(&self, metadata: &fs::Metadata) -> (String, String) {
        (
            String::from("-"),
            crate::permissions::render_readonly(metadata.permissions().readonly()),
        )
    }
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
