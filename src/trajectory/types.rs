use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::snapshot::Point;

/// A position tagged with the hour it was observed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub point: Point,
    pub hour: usize,
}

// Wire form is `[lat, lon, altitude, hour]`.
impl Serialize for TrajectoryPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (
            self.point.latitude,
            self.point.longitude,
            self.point.altitude,
            self.hour,
        )
            .serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub id: String,
    pub points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    pub fn new(id: String, point: Point, hour: usize) -> Self {
        Trajectory {
            id,
            points: vec![TrajectoryPoint { point, hour }],
        }
    }

    pub fn push(&mut self, point: Point, hour: usize) {
        self.points.push(TrajectoryPoint { point, hour });
    }

    /// Most recent position, whichever hour it came from.
    pub fn last_point(&self) -> Option<&Point> {
        self.points.last().map(|p| &p.point)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Trajectories in creation order. Serialises as an `id -> points` object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrajectorySet {
    trajectories: Vec<Trajectory>,
}

impl TrajectorySet {
    pub fn new(trajectories: Vec<Trajectory>) -> Self {
        TrajectorySet { trajectories }
    }

    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trajectory> {
        self.trajectories.iter()
    }
}

impl Serialize for TrajectorySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.trajectories.len()))?;
        for trajectory in &self.trajectories {
            map.serialize_entry(&trajectory.id, &trajectory.points)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::point;

    #[test]
    fn test_serializes_as_object_of_tuples() {
        let mut first = Trajectory::new("balloon_0".into(), point(1.0, 2.0, 3.0), 0);
        first.push(point(1.5, 2.5, 4.0), 2);
        let set = TrajectorySet::new(vec![first]);

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "balloon_0": [[1.0, 2.0, 3.0, 0], [1.5, 2.5, 4.0, 2]]
            })
        );
    }
}
