use std::{
    error::Error,
    fmt, fs, io,
    path::{Path, PathBuf},
    sync::Arc,
    thread,
};

use crossbeam::channel::{self, Receiver, Sender};
use log::{debug, info, trace, warn};
use sieve_engine::{FilterChain, ReportBody, SummaryStats, group_by_owner, summarize};
use sieve_fs::{ExcludeMatcher, Extractor, FileRecord, ScanContext, walk_parallel};

/// Everything one scan needs.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub root: PathBuf,
    pub filters: FilterChain,
    /// Gitignore-style patterns, anchored at `root`.
    pub excludes: Vec<String>,
    pub threads: usize,
}

impl ScanRequest {
    pub fn new(root: impl Into<PathBuf>, filters: FilterChain) -> Self {
        Self {
            root: root.into(),
            filters,
            excludes: Vec::new(),
            threads: 1,
        }
    }
}

/// Per-file bookkeeping of a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCounters {
    /// Regular files reported by the walk.
    pub seen: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Files skipped because their metadata could not be read.
    pub failed: usize,
}

impl ScanCounters {
    fn merge(&mut self, other: ScanCounters) {
        self.seen += other.seen;
        self.accepted += other.accepted;
        self.rejected += other.rejected;
        self.failed += other.failed;
    }
}

#[derive(Debug)]
pub struct ScanOutcome {
    pub root: PathBuf,
    pub body: ReportBody,
    pub summary: SummaryStats,
    pub counters: ScanCounters,
}

#[derive(Debug)]
pub enum ScanError {
    /// Root is missing or not a directory.
    InvalidRoot { path: PathBuf, reason: String },
    InvalidExclude(String),
    Walk(io::Error),
    WorkerPanicked,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::InvalidRoot { path, reason } => {
                write!(f, "invalid root directory {}: {reason}", path.display())
            }
            ScanError::InvalidExclude(msg) => write!(f, "invalid exclude pattern: {msg}"),
            ScanError::Walk(e) => write!(f, "directory walk failed: {e}"),
            ScanError::WorkerPanicked => write!(f, "scan worker thread panicked"),
        }
    }
}

impl Error for ScanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ScanError::Walk(e) => Some(e),
            _ => None,
        }
    }
}

impl ScanError {
    /// Configuration errors are the caller's fault and detected before any
    /// file is read.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ScanError::InvalidRoot { .. } | ScanError::InvalidExclude(_)
        )
    }
}

/// Records accepted by one worker for one batch of paths.
struct WorkerBatch {
    records: Vec<FileRecord>,
    counters: ScanCounters,
}

pub fn validate_root(root: &Path) -> Result<(), ScanError> {
    let invalid = |reason: String| ScanError::InvalidRoot {
        path: root.to_path_buf(),
        reason,
    };

    let meta = fs::metadata(root).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => invalid("no such directory".to_owned()),
        _ => invalid(e.to_string()),
    })?;

    if !meta.is_dir() {
        return Err(invalid("not a directory".to_owned()));
    }

    Ok(())
}

pub fn create_scan_context(root: &Path, excludes: &[String]) -> Result<Arc<ScanContext>, ScanError> {
    let excludes =
        ExcludeMatcher::new(root, excludes).map_err(|e| ScanError::InvalidExclude(e.to_string()))?;

    Ok(Arc::new(ScanContext { excludes }))
}

/// Walk `req.root`, extract and filter every regular file, then group the
/// accepted records by owner.
///
/// Extraction and filtering run on `req.threads` workers; the calling thread
/// is the only one that holds the accepted set. Grouping starts after every
/// worker has finished.
pub fn run_scan(req: &ScanRequest) -> Result<ScanOutcome, ScanError> {
    validate_root(&req.root)?;
    let ctx = create_scan_context(&req.root, &req.excludes)?;
    let threads = req.threads.max(1);

    debug!(
        "[scan] root={:?} filters={} threads={}",
        req.root,
        req.filters.len(),
        threads
    );

    let (path_tx, path_rx) = channel::unbounded::<Vec<PathBuf>>();
    let (batch_tx, batch_rx) = channel::unbounded::<WorkerBatch>();
    let extractor = Extractor::new();

    let (mut accepted, counters) = thread::scope(|s| {
        let walker = {
            let root = req.root.clone();
            let ctx = Arc::clone(&ctx);
            s.spawn(move || walk_parallel(vec![root], path_tx, ctx, threads))
        };

        let workers: Vec<_> = (0..threads)
            .map(|_| {
                let path_rx = path_rx.clone();
                let batch_tx = batch_tx.clone();
                let extractor = extractor.clone();
                let filters = &req.filters;
                s.spawn(move || evaluate_worker(path_rx, batch_tx, &extractor, filters))
            })
            .collect();

        drop(path_rx);
        drop(batch_tx);

        let mut accepted: Vec<FileRecord> = Vec::new();
        let mut counters = ScanCounters::default();
        for batch in batch_rx.iter() {
            counters.merge(batch.counters);
            accepted.extend(batch.records);
        }

        walker
            .join()
            .map_err(|_| ScanError::WorkerPanicked)?
            .map_err(ScanError::Walk)?;

        for worker in workers {
            worker.join().map_err(|_| ScanError::WorkerPanicked)?;
        }

        Ok::<_, ScanError>((accepted, counters))
    })?;

    // Walk order depends on thread timing; path order makes reports reproducible.
    accepted.sort_by(|a, b| a.path.cmp(&b.path));

    let body = group_by_owner(accepted);
    let summary = summarize(&body);

    info!(
        "[scan] {} files seen, {} accepted, {} rejected, {} unreadable",
        counters.seen, counters.accepted, counters.rejected, counters.failed
    );

    Ok(ScanOutcome {
        root: req.root.clone(),
        body,
        summary,
        counters,
    })
}

/// Extract and evaluate every path it receives until the walk is over.
fn evaluate_worker(
    path_rx: Receiver<Vec<PathBuf>>,
    batch_tx: Sender<WorkerBatch>,
    extractor: &Extractor,
    filters: &FilterChain,
) {
    for paths in path_rx.iter() {
        let mut out = WorkerBatch {
            records: Vec::with_capacity(paths.len()),
            counters: ScanCounters::default(),
        };

        for path in paths {
            out.counters.seen += 1;

            let record = match extractor.extract(&path) {
                Ok(r) => r,
                Err(e) => {
                    warn!("[scan] skipping file: {e}");
                    out.counters.failed += 1;
                    continue;
                }
            };

            match filters.first_rejection(&record) {
                None => {
                    out.counters.accepted += 1;
                    out.records.push(record);
                }
                Some(idx) => {
                    trace!(
                        "[scan] {:?} rejected by filter #{} ({})",
                        record.path,
                        idx + 1,
                        filters.specs()[idx]
                    );
                    out.counters.rejected += 1;
                }
            }
        }

        if batch_tx.send(out).is_err() {
            return;
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
