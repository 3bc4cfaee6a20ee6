//! Snapping dragged times to minor strip boundaries.

use crate::scene::Scene;
use crate::time::Time;

/// Default snap tolerance in pixels.
pub const SNAP_REGION: f64 = 10.0;

impl Scene {
    /// Snaps `time` to a nearby minor strip boundary using [`SNAP_REGION`].
    pub fn snap(&self, time: Time) -> Time {
        self.snap_within(time, SNAP_REGION)
    }

    /// Snaps `time` to the left or right boundary of its minor strip when that
    /// boundary is closer than `region` pixels. The left boundary wins ties.
    pub fn snap_within(&self, time: Time, region: f64) -> Time {
        let Some(strip) = self.minor_strip() else {
            return time;
        };
        let left = strip.start(time);
        let right = strip.increment(left);
        if self.distance_between_times(left, time) < region {
            left
        } else if self.distance_between_times(right, time) < region {
            right
        } else {
            time
        }
    }

    /// Snaps both ends of a selection.
    pub fn snap_selection(&self, (start, end): (Time, Time)) -> (Time, Time) {
        (self.snap(start), self.snap(end))
    }
}

#[cfg(test)]
mod tests {
    use crate::appearance::Appearance;
    use crate::db::MemoryDb;
    use crate::period::TimePeriod;
    use crate::scene::{Scene, approximate_text_size};
    use crate::time::Time;
    use crate::time_type::TimeType;
    use crate::view::ViewProperties;

    /// Ticks 0..100 on 1000 pixels: minor strips every 10 ticks, 10 pixels per tick.
    fn scene() -> Scene {
        let period =
            TimePeriod::new(TimeType::Numeric, Time::from_ticks(0), Time::from_ticks(100)).unwrap();
        let db = MemoryDb::new(TimeType::Numeric);
        Scene::create(
            (1000, 400),
            &db,
            &ViewProperties::new(period),
            &approximate_text_size,
            &Appearance::default(),
        )
    }

    #[test]
    fn test_boundary_is_unchanged() {
        assert_eq!(scene().snap(Time::from_ticks(30)), Time::from_ticks(30));
    }

    #[test]
    fn test_snaps_to_nearby_boundaries() {
        let scene = scene();
        assert_eq!(scene.snap_within(Time::from_ticks(31), 15.0), Time::from_ticks(30));
        assert_eq!(scene.snap_within(Time::from_ticks(39), 15.0), Time::from_ticks(40));
        assert_eq!(scene.snap_within(Time::from_ticks(35), 15.0), Time::from_ticks(35));
    }

    #[test]
    fn test_default_region_leaves_distant_times() {
        assert_eq!(scene().snap(Time::from_ticks(32)), Time::from_ticks(32));
        assert_eq!(scene().snap(Time::from_ticks(68)), Time::from_ticks(68));
    }

    #[test]
    fn test_left_wins_ties() {
        assert_eq!(scene().snap_within(Time::from_ticks(35), 60.0), Time::from_ticks(30));
    }

    #[test]
    fn test_snap_selection() {
        let snapped = scene().snap_selection((Time::from_ticks(23), Time::from_ticks(47)));
        assert_eq!(snapped, (Time::from_ticks(23), Time::from_ticks(47)));
        let snapped = scene().snap_selection((Time::from_ticks(30), Time::from_ticks(50)));
        assert_eq!(snapped, (Time::from_ticks(30), Time::from_ticks(50)));
    }
}
