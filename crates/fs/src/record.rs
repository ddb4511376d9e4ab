use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};

/// Metadata snapshot of one regular file, taken once at scan time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// User name of the owning account, or the numeric uid when it has no name
    pub owner: String,
    /// `ls -l` style rendering, e.g. `-rw-r--r--`
    pub permissions: String,
    /// Last modification time
    pub modified: DateTime<Local>,
}

impl FileRecord {
    /// Substring after the last `.` of the final path segment.
    ///
    /// Unlike `Path::extension`, a leading dot counts: `.bashrc` has the
    /// extension `bashrc`. A name without any dot has an empty extension.
    /// Names that are not valid UTF-8 are split on their raw bytes; only the
    /// extension itself is converted lossily.
    pub fn extension(&self) -> Cow<'_, str> {
        extension_of(&self.path)
    }
}

pub(crate) fn extension_of(path: &Path) -> Cow<'_, str> {
    let Some(name) = path.file_name() else {
        return Cow::Borrowed("");
    };

    let bytes = name.as_encoded_bytes();
    match bytes.iter().rposition(|&b| b == b'.') {
        Some(idx) => String::from_utf8_lossy(&bytes[idx + 1..]),
        None => Cow::Borrowed(""),
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
