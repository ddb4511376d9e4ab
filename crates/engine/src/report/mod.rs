use serde::Serialize;
use sieve_fs::FileRecord;

/// Maximal run of records sharing one owner, smallest files first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportGroup {
    pub owner: String,
    pub records: Vec<FileRecord>,
}

impl ReportGroup {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_size(&self) -> u64 {
        sum_sizes(&self.records)
    }
}

/// Owner-grouped report body, groups in ascending owner order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportBody {
    pub groups: Vec<ReportGroup>,
}

impl ReportBody {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Every file entry of the body, in report order.
    pub fn entries(&self) -> impl Iterator<Item = &FileRecord> + '_ {
        self.groups.iter().flat_map(|g| g.records.iter())
    }
}

/// Totals over a finished report body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    pub total_files: usize,
    pub total_size: u64,
}

/// Stable sort by `(owner, size)`, then split into runs of equal owner.
///
/// Records with equal owner and size keep their relative input order.
pub fn group_by_owner(mut records: Vec<FileRecord>) -> ReportBody {
    records.sort_by(|a, b| a.owner.cmp(&b.owner).then(a.size.cmp(&b.size)));

    let mut groups: Vec<ReportGroup> = Vec::new();
    for rec in records {
        match groups.last_mut() {
            Some(group) if group.owner == rec.owner => group.records.push(rec),
            _ => groups.push(ReportGroup {
                owner: rec.owner.clone(),
                records: vec![rec],
            }),
        }
    }

    ReportBody { groups }
}

/// Count and total size of the entries present in `body`.
pub fn summarize(body: &ReportBody) -> SummaryStats {
    body.entries().fold(SummaryStats::default(), |acc, rec| SummaryStats {
        total_files: acc.total_files + 1,
        total_size: acc.total_size.saturating_add(rec.size),
    })
}

fn sum_sizes(records: &[FileRecord]) -> u64 {
    records
        .iter()
        .fold(0u64, |acc, rec| acc.saturating_add(rec.size))
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
