use std::{
    fs::{self, read_dir},
    io::Result,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
    time::Duration,
};

use crossbeam::channel::{self, RecvTimeoutError, Sender};
use log::{debug, trace, warn};

use crate::{config::BATCH_SIZE, excludes::ExcludeMatcher};

pub struct ScanContext {
    pub excludes: ExcludeMatcher,
}

/// What a directory entry means for the walk.
#[derive(Debug, PartialEq, Eq)]
enum EntryKind {
    File(PathBuf),
    Dir(PathBuf),
    Skip,
}

/// Multi-threaded recursive walk that reports regular files only.
///
/// Worker threads share a queue of directories; every worker reads one
/// directory at a time, pushes subdirectories back onto the queue and sends
/// batches of regular-file paths through `file_tx`. Symlinks and special
/// files are neither reported nor followed. Returns once the whole tree has
/// been visited.
pub fn walk_parallel(
    roots: Vec<PathBuf>,
    file_tx: Sender<Vec<PathBuf>>,
    ctx: Arc<ScanContext>,
    num_threads: usize,
) -> Result<()> {
    let (work_tx, work_rx) = channel::unbounded::<PathBuf>();

    // Track pending work items to know when to terminate
    let pending = Arc::new(AtomicUsize::new(roots.len()));

    if roots.is_empty() {
        return Ok(());
    }

    for root in roots {
        let _ = work_tx.send(root);
    }

    let num_threads = num_threads.max(1);
    debug!("[walk_parallel] starting with {} threads", num_threads);

    thread::scope(|s| {
        for _ in 0..num_threads {
            let work_rx = work_rx.clone();
            let work_tx = work_tx.clone();
            let file_tx = file_tx.clone();
            let ctx = Arc::clone(&ctx);
            let pending = Arc::clone(&pending);

            s.spawn(move || {
                worker_loop(work_rx, work_tx, file_tx, &ctx, &pending);
            });
        }
    });

    Ok(())
}

fn worker_loop(
    work_rx: channel::Receiver<PathBuf>,
    work_tx: channel::Sender<PathBuf>,
    file_tx: Sender<Vec<PathBuf>>,
    ctx: &ScanContext,
    pending: &AtomicUsize,
) {
    let mut batch = Vec::with_capacity(BATCH_SIZE);

    loop {
        // Use timeout to periodically check if all work is done
        match work_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(dir) => {
                scan_dir(&dir, &work_tx, &mut batch, ctx, pending);

                if batch.len() >= BATCH_SIZE {
                    let to_send = std::mem::take(&mut batch);
                    if file_tx.send(to_send).is_err() {
                        // receiver gone; this directory still counts as done
                        pending.fetch_sub(1, Ordering::AcqRel);
                        return;
                    }
                }

                // Decrement only after subdirectories were counted in.
                if pending.fetch_sub(1, Ordering::AcqRel) == 1 {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if pending.load(Ordering::Acquire) == 0 {
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    if !batch.is_empty() {
        let _ = file_tx.send(batch);
    }
}

/// Read one directory. Unreadable directories and entries are logged and
/// skipped; they never abort the walk.
fn scan_dir(
    dir: &Path,
    work_tx: &channel::Sender<PathBuf>,
    batch: &mut Vec<PathBuf>,
    ctx: &ScanContext,
    pending: &AtomicUsize,
) {
    let rd = match read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            warn!("[walk] read_dir({:?}) failed: {e}", dir);
            return;
        }
    };

    for entry_res in rd {
        let entry = match entry_res {
            Ok(e) => e,
            Err(e) => {
                warn!("[walk] error reading entry in {:?}: {e}", dir);
                continue;
            }
        };

        match classify_entry(&entry, ctx) {
            Ok(EntryKind::Dir(path)) => {
                pending.fetch_add(1, Ordering::AcqRel);
                let _ = work_tx.send(path);
            }
            Ok(EntryKind::File(path)) => batch.push(path),
            Ok(EntryKind::Skip) => {}
            Err(e) => {
                warn!("[walk] cannot inspect entry in {:?}: {e}", dir);
            }
        }
    }
}

fn classify_entry(entry: &fs::DirEntry, ctx: &ScanContext) -> Result<EntryKind> {
    // DirEntry::file_type does not follow symlinks.
    let file_type = entry.file_type()?;
    let path = entry.path();

    let is_dir = file_type.is_dir();
    if !is_dir && !file_type.is_file() {
        trace!("[walk] skipping non-regular entry {:?}", path);
        return Ok(EntryKind::Skip);
    }

    if ctx.excludes.is_excluded(&path, is_dir) {
        trace!("[walk] excluded {:?}", path);
        return Ok(EntryKind::Skip);
    }

    Ok(if is_dir {
        EntryKind::Dir(path)
    } else {
        EntryKind::File(path)
    })
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
