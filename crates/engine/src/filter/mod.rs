mod chain;
mod error;
mod size;
mod spec;
mod time;

pub use chain::{FilterChain, evaluate};
pub use error::FilterError;
pub use size::parse_size;
pub use spec::{ExtensionSet, FilterKind, FilterSpec};
pub use time::{RangeParseError, TimeRange};
