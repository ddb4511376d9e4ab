use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use tempfile::NamedTempFile;

/// Write a report file atomically.
///
/// `render` writes into a temp file next to `path`; only when it succeeds is
/// the temp file synced and renamed over `path`. On error the temp file is
/// removed and any previous report at `path` is left untouched.
pub fn write_atomic<F>(path: &Path, render: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let tmp = NamedTempFile::new_in(parent)?;

    {
        let mut writer = BufWriter::new(tmp.as_file());
        render(&mut writer)?;
        writer.flush()?;
    }

    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    #[cfg(unix)]
    {
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
