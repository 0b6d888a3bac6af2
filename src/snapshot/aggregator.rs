use futures::future::join_all;

use super::fetcher::SnapshotSource;
use super::types::{SnapshotSet, HOURS_PER_DAY};

/// Fetch every hour of the day concurrently and wait for all of them.
///
/// Results keep their hour index regardless of completion order. Failed hours are
/// already absent by the time they get here, so this never fails.
pub async fn collect<S: SnapshotSource>(source: &S) -> SnapshotSet {
    let fetches = (0..HOURS_PER_DAY).map(|hour| source.fetch_hour(hour));
    let hours = join_all(fetches).await;

    let snapshots = SnapshotSet::from_hours(hours);
    log::info!(
        "Collected {}/{} hourly snapshots",
        snapshots.available_hours(),
        HOURS_PER_DAY
    );
    snapshots
}
