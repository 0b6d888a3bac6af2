use crate::snapshot::{Point, SnapshotSet};

use super::types::{Trajectory, TrajectorySet};

/// Gate on the planar (lat, lon) distance between consecutive points of a trajectory.
/// Raw degrees, not a geodesic distance.
pub const MAX_MATCH_DISTANCE: f64 = 50.0;
pub const MIN_TRAJECTORY_POINTS: usize = 2;

#[derive(Default)]
struct Builder {
    trajectories: Vec<Trajectory>,
    next_id: usize,
}

impl Builder {
    fn seed(&mut self, point: Point, hour: usize) {
        let id = format!("balloon_{}", self.next_id);
        self.next_id += 1;
        self.trajectories.push(Trajectory::new(id, point, hour));
    }
}

/// Stitch hourly snapshots into trajectories by greedy nearest-neighbour matching.
///
/// The first available hour seeds one trajectory per point. Every later available
/// hour lets each trajectory, oldest first, claim the nearest unclaimed point within
/// [`MAX_MATCH_DISTANCE`] of its last position; unclaimed points seed new
/// trajectories. Absent hours are skipped. Trajectories shorter than
/// [`MIN_TRAJECTORY_POINTS`] are dropped.
pub fn reconstruct(snapshots: &SnapshotSet) -> TrajectorySet {
    let mut available = snapshots.available();
    let Some(first) = available.next() else {
        return TrajectorySet::default();
    };

    let mut builder = Builder::default();
    for point in &first.points {
        builder.seed(*point, first.hour);
    }

    for snapshot in available {
        let mut pool = snapshot.points.clone();

        for trajectory in builder.trajectories.iter_mut() {
            let Some(last) = trajectory.last_point() else {
                continue;
            };
            if let Some(index) = nearest_within(&pool, last, MAX_MATCH_DISTANCE) {
                let claimed = pool.remove(index);
                trajectory.push(claimed, snapshot.hour);
            }
        }

        for point in pool {
            builder.seed(point, snapshot.hour);
        }
    }

    let seeded = builder.trajectories.len();
    let kept: Vec<Trajectory> = builder
        .trajectories
        .into_iter()
        .filter(|t| t.len() >= MIN_TRAJECTORY_POINTS)
        .collect();
    log::debug!(
        "Reconstructed {} trajectories ({} seeded, {} pruned)",
        kept.len(),
        seeded,
        seeded - kept.len()
    );

    TrajectorySet::new(kept)
}

/// Index of the closest pool point strictly below `limit`; the earliest wins ties.
fn nearest_within(pool: &[Point], from: &Point, limit: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in pool.iter().enumerate() {
        let distance = from.planar_distance(candidate);
        if distance >= limit {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}
