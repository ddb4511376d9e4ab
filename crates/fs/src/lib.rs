mod config;
mod excludes;
mod extract;
mod owner;
mod permissions;
mod record;
mod walker;

pub use config::BATCH_SIZE;
pub use excludes::ExcludeMatcher;
pub use extract::{ExtractError, Extractor};
pub use owner::OwnerResolver;
pub use permissions::render_mode;
pub use record::FileRecord;
pub use walker::{ScanContext, walk_parallel};
