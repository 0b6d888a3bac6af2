mod reconstruct;
mod types;

pub use reconstruct::{reconstruct, MAX_MATCH_DISTANCE, MIN_TRAJECTORY_POINTS};
pub use types::{Trajectory, TrajectoryPoint, TrajectorySet};
