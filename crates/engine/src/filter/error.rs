use std::{error::Error, fmt};

/// A filter pair that cannot be turned into a [`FilterSpec`](crate::FilterSpec).
///
/// Both variants are configuration errors: they abort the run before any
/// file is scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    UnknownFilter(String),
    InvalidValue {
        flag: String,
        value: String,
        reason: String,
    },
}

impl FilterError {
    pub(crate) fn invalid(flag: &str, value: &str, reason: impl Into<String>) -> Self {
        FilterError::InvalidValue {
            flag: flag.to_owned(),
            value: value.to_owned(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::UnknownFilter(flag) => write!(f, "unknown filter `{flag}`"),
            FilterError::InvalidValue {
                flag,
                value,
                reason,
            } => write!(f, "invalid value `{value}` for filter `{flag}`: {reason}"),
        }
    }
}

impl Error for FilterError {}
