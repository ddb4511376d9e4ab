use log::debug;
use sieve_fs::FileRecord;

use crate::filter::{error::FilterError, spec::FilterSpec};

/// Logical AND over `filters`, evaluated in order and stopping at the first
/// filter that rejects `record`. An empty list accepts everything.
#[inline]
pub fn evaluate(record: &FileRecord, filters: &[FilterSpec]) -> bool {
    filters.iter().all(|f| f.matches(record))
}

/// Ordered, immutable list of filters as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterChain {
    specs: Vec<FilterSpec>,
}

impl FilterChain {
    /// Parse raw `(flag, value)` pairs in order. The first pair that fails is
    /// the one reported; later pairs are not looked at.
    pub fn from_pairs<I, F, V>(pairs: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (F, V)>,
        F: AsRef<str>,
        V: AsRef<str>,
    {
        let specs = pairs
            .into_iter()
            .map(|(flag, value)| FilterSpec::parse(flag.as_ref(), value.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        for (i, spec) in specs.iter().enumerate() {
            debug!("[filter] #{i}: {spec}");
        }

        Ok(Self { specs })
    }

    #[inline]
    pub fn evaluate(&self, record: &FileRecord) -> bool {
        evaluate(record, &self.specs)
    }

    /// Index of the filter that rejects `record`, if any.
    pub fn first_rejection(&self, record: &FileRecord) -> Option<usize> {
        self.specs.iter().position(|f| !f.matches(record))
    }

    pub fn specs(&self) -> &[FilterSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
#[path = "chain_tests.rs"]
mod tests;
