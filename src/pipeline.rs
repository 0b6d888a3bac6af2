use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::snapshot::{self, SnapshotSet, SnapshotSource, HOURS_PER_DAY};
use crate::trajectory::{reconstruct, TrajectorySet};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("reconstruction task panicked: {0}")]
    Panicked(String),
    /// Only seen when the runtime shuts down mid-run; the handle is never aborted.
    #[error("reconstruction task was cancelled")]
    Cancelled,
}

/// Output of one fetch-and-reconstruct run.
#[derive(Debug, Clone)]
pub struct Reconstruction {
    pub trajectories: TrajectorySet,
    /// Hours for which a snapshot was actually obtained.
    pub hours_collected: usize,
    pub computed_at: DateTime<Utc>,
}

impl Reconstruction {
    pub fn from_snapshots(snapshots: &SnapshotSet) -> Self {
        Reconstruction {
            trajectories: reconstruct(snapshots),
            hours_collected: snapshots.available_hours(),
            computed_at: Utc::now(),
        }
    }
}

pub async fn run<S: SnapshotSource>(source: &S) -> Reconstruction {
    let snapshots = snapshot::collect(source).await;
    let reconstruction = Reconstruction::from_snapshots(&snapshots);
    log::info!(
        "Reconstructed {} trajectories from {}/{} hours",
        reconstruction.trajectories.len(),
        reconstruction.hours_collected,
        HOURS_PER_DAY
    );
    reconstruction
}

/// Like [`run`], but on its own task so a panic surfaces as an error instead of
/// taking the caller down with it.
pub async fn run_isolated<S>(source: Arc<S>) -> Result<Reconstruction, PipelineError>
where
    S: SnapshotSource + 'static,
{
    let handle = tokio::spawn(async move { run(source.as_ref()).await });
    handle.await.map_err(|e| {
        if e.is_panic() {
            PipelineError::Panicked(panic_message(e.into_panic()))
        } else {
            PipelineError::Cancelled
        }
    })
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
