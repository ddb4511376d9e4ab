use std::fmt;

use sieve_fs::FileRecord;
use smallvec::SmallVec;

use crate::filter::{error::FilterError, size::parse_size, time::TimeRange};

/// Extensions accepted by an `ExtensionIn` filter. Usually a handful.
pub type ExtensionSet = SmallVec<[String; 4]>;

/// Tag of a [`FilterSpec`], independent of its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    ExtensionIn,
    SizeGreaterThan,
    SizeLessThan,
    TimeRange,
    PermissionsEqual,
}

impl FilterKind {
    pub const ALL: [FilterKind; 5] = [
        FilterKind::ExtensionIn,
        FilterKind::SizeGreaterThan,
        FilterKind::SizeLessThan,
        FilterKind::TimeRange,
        FilterKind::PermissionsEqual,
    ];

    /// Recognise a filter flag. Each kind has a short (`-e`) and a long
    /// (`ext`, also accepted as `--ext`) spelling.
    pub fn from_flag(flag: &str) -> Option<FilterKind> {
        let name = flag.strip_prefix("--").unwrap_or(flag);
        FilterKind::ALL
            .into_iter()
            .find(|kind| flag == kind.short_flag() || name == kind.long_flag())
    }

    pub fn short_flag(self) -> &'static str {
        match self {
            FilterKind::ExtensionIn => "-e",
            FilterKind::SizeGreaterThan => "-g",
            FilterKind::SizeLessThan => "-l",
            FilterKind::TimeRange => "-t",
            FilterKind::PermissionsEqual => "-p",
        }
    }

    pub fn long_flag(self) -> &'static str {
        match self {
            FilterKind::ExtensionIn => "ext",
            FilterKind::SizeGreaterThan => "size-gt",
            FilterKind::SizeLessThan => "size-lt",
            FilterKind::TimeRange => "time",
            FilterKind::PermissionsEqual => "perm",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_flag())
    }
}

/// One parsed filter condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSpec {
    /// Extension (after the last `.` of the file name) is one of the set.
    /// Case-sensitive.
    ExtensionIn(ExtensionSet),
    /// Strictly larger than the threshold, in bytes.
    SizeGreaterThan(u64),
    /// Strictly smaller than the threshold, in bytes.
    SizeLessThan(u64),
    /// Last modification falls on one of the days of the range.
    TimeRange(TimeRange),
    /// Permission rendering is exactly this string.
    PermissionsEqual(String),
}

impl FilterSpec {
    /// Parse one `FLAG VALUE` pair.
    pub fn parse(flag: &str, value: &str) -> Result<FilterSpec, FilterError> {
        let kind =
            FilterKind::from_flag(flag).ok_or_else(|| FilterError::UnknownFilter(flag.to_owned()))?;

        match kind {
            FilterKind::ExtensionIn => parse_extension_set(value)
                .map(FilterSpec::ExtensionIn)
                .ok_or_else(|| FilterError::invalid(flag, value, "expected a list like txt,log")),
            FilterKind::SizeGreaterThan => parse_size(value)
                .map(FilterSpec::SizeGreaterThan)
                .ok_or_else(|| size_error(flag, value)),
            FilterKind::SizeLessThan => parse_size(value)
                .map(FilterSpec::SizeLessThan)
                .ok_or_else(|| size_error(flag, value)),
            FilterKind::TimeRange => TimeRange::parse(value)
                .map(FilterSpec::TimeRange)
                .map_err(|e| FilterError::invalid(flag, value, e.to_string())),
            FilterKind::PermissionsEqual => {
                if value.is_empty() {
                    Err(FilterError::invalid(
                        flag,
                        value,
                        "expected a permission string like -rw-r--r--",
                    ))
                } else {
                    Ok(FilterSpec::PermissionsEqual(value.to_owned()))
                }
            }
        }
    }

    /// Whether `record` passes this single filter.
    #[inline]
    pub fn matches(&self, record: &FileRecord) -> bool {
        match self {
            FilterSpec::ExtensionIn(set) => {
                let ext = record.extension();
                set.iter().any(|wanted| wanted.as_str() == ext.as_ref())
            }
            FilterSpec::SizeGreaterThan(n) => record.size > *n,
            FilterSpec::SizeLessThan(n) => record.size < *n,
            FilterSpec::TimeRange(range) => range.contains(&record.modified),
            FilterSpec::PermissionsEqual(perm) => record.permissions == *perm,
        }
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterSpec::ExtensionIn(set) => {
                let shown: Vec<&str> = set
                    .iter()
                    .map(|e| if e.is_empty() { "." } else { e.as_str() })
                    .collect();
                write!(f, "ext {}", shown.join(","))
            }
            FilterSpec::SizeGreaterThan(n) => write!(f, "size > {n}"),
            FilterSpec::SizeLessThan(n) => write!(f, "size < {n}"),
            FilterSpec::TimeRange(range) => write!(f, "time {range}"),
            FilterSpec::PermissionsEqual(perm) => write!(f, "perm {perm}"),
        }
    }
}

/// `txt, .log,md` -> [txt, log, md]. Duplicates are dropped, order kept.
///
/// A lone `.` stands for the empty extension (`Makefile`, `notes.`). Blank
/// entries from stray commas are ignored.
fn parse_extension_set(value: &str) -> Option<ExtensionSet> {
    let mut set = ExtensionSet::new();

    for raw in value.split(',') {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let ext = raw.strip_prefix('.').unwrap_or(raw);
        if set.iter().any(|e| e == ext) {
            continue;
        }
        set.push(ext.to_owned());
    }

    if set.is_empty() { None } else { Some(set) }
}

fn size_error(flag: &str, value: &str) -> FilterError {
    FilterError::invalid(
        flag,
        value,
        "expected a byte size such as 100, 10K or 5MB",
    )
}

#[cfg(test)]
#[path = "spec_tests.rs"]
mod tests;
