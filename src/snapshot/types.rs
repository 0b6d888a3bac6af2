pub const HOURS_PER_DAY: usize = 24;

/// A single balloon position as reported by the upstream source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Point {
    /// Returns `None` when latitude or longitude fall outside their ranges or altitude
    /// is not finite.
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Option<Self> {
        if !altitude.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(Point {
            latitude,
            longitude,
            altitude,
        })
    }

    /// Planar distance in raw degree space.
    pub fn planar_distance(&self, other: &Point) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlon = self.longitude - other.longitude;
        (dlat * dlat + dlon * dlon).sqrt()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub hour: usize,
    pub points: Vec<Point>,
}

/// The 24 hourly slots of one ingestion cycle, indexed by hour.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotSet {
    slots: Vec<Option<Snapshot>>,
}

impl SnapshotSet {
    /// Builds a set from per-hour point lists. Missing trailing hours are treated as
    /// absent and anything past the 24th hour is ignored.
    pub fn from_hours<I>(hours: I) -> Self
    where
        I: IntoIterator<Item = Option<Vec<Point>>>,
    {
        let mut slots: Vec<Option<Snapshot>> = hours
            .into_iter()
            .take(HOURS_PER_DAY)
            .enumerate()
            .map(|(hour, points)| points.map(|points| Snapshot { hour, points }))
            .collect();
        slots.resize(HOURS_PER_DAY, None);
        SnapshotSet { slots }
    }

    pub fn empty() -> Self {
        Self::from_hours(std::iter::empty())
    }

    pub fn get(&self, hour: usize) -> Option<&Snapshot> {
        self.slots.get(hour).and_then(Option::as_ref)
    }

    /// Non-absent snapshots in hour order.
    pub fn available(&self) -> impl Iterator<Item = &Snapshot> {
        self.slots.iter().flatten()
    }

    pub fn available_hours(&self) -> usize {
        self.available().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_rejects_out_of_range() {
        assert!(Point::new(90.0, 180.0, 0.0).is_some());
        assert!(Point::new(-90.0, -180.0, -12.0).is_some());
        assert!(Point::new(90.5, 0.0, 0.0).is_none());
        assert!(Point::new(0.0, -180.1, 0.0).is_none());
        assert!(Point::new(f64::NAN, 0.0, 0.0).is_none());
        assert!(Point::new(0.0, 0.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_planar_distance() {
        let a = Point::new(0.0, 0.0, 1.0).unwrap();
        let b = Point::new(3.0, 4.0, 100.0).unwrap();
        assert!((a.planar_distance(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_snapshot_set_pads_to_full_day() {
        let p = Point::new(1.0, 2.0, 3.0).unwrap();
        let set = SnapshotSet::from_hours(vec![None, Some(vec![p])]);

        assert_eq!(set.available_hours(), 1);
        assert!(set.get(0).is_none());
        assert_eq!(set.get(1).map(|s| s.hour), Some(1));
        assert!(set.get(23).is_none());
        assert!(set.get(24).is_none());
    }
}
