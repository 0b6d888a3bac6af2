mod aggregator;
mod decode;
mod error;
mod fetcher;
mod types;

pub use aggregator::collect;
pub use decode::{decode_snapshot, repair_json};
pub use error::FetchError;
pub use fetcher::{HttpSource, SnapshotSource};
pub use types::{Point, Snapshot, SnapshotSet, HOURS_PER_DAY};
