mod filter;
mod report;

pub use filter::*;
pub use report::*;
