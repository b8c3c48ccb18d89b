mod beat;

pub use self::beat::*;

use crate::prelude::*;

/// A position snapped to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapResult {
    pub position: vec2<Coord>,
    /// The time associated with the position, if it was requested.
    pub time: Option<Time>,
}

impl SnapResult {
    pub fn new(position: vec2<Coord>, time: Option<Time>) -> Self {
        Self { position, time }
    }
}

/// Converts arbitrary playfield positions into valid placement positions.
///
/// All operations are pure: the same input on the same grid state
/// produces the same result.
pub trait SnapProvider {
    /// Find the snapped position and the time associated with it.
    fn find_snapped_position_and_time(&self, point: vec2<Coord>) -> SnapResult;

    /// Find the position closest to `point` that is valid for placement.
    fn find_snapped_position(&self, point: vec2<Coord>) -> SnapResult {
        SnapResult {
            time: None,
            ..self.find_snapped_position_and_time(point)
        }
    }

    /// Convert a playfield distance into a duration.
    /// Saturates at the largest finite duration instead of overflowing.
    fn distance_to_duration(&self, distance: Coord) -> Time;

    /// Convert a duration into a playfield distance.
    /// Saturates at the largest finite distance instead of overflowing.
    fn duration_to_distance(&self, duration: Time) -> Coord;
}

/// Does not snap at all: positions are returned as is,
/// times are derived from the distance to the anchor.
#[derive(Debug, Clone)]
pub struct FreeSnapProvider {
    pub anchor: Anchor,
    pub snap: BeatSnapProvider,
}

impl FreeSnapProvider {
    pub fn new(anchor: Anchor, snap: BeatSnapProvider) -> Self {
        Self { anchor, snap }
    }
}

impl SnapProvider for FreeSnapProvider {
    fn find_snapped_position_and_time(&self, point: vec2<Coord>) -> SnapResult {
        let distance = distance_between(self.anchor.position, point);
        let duration = self.distance_to_duration(distance);
        let time = saturating_r32(self.anchor.time.as_f32() + duration.as_f32());
        SnapResult::new(point, Some(time))
    }

    fn distance_to_duration(&self, distance: Coord) -> Time {
        self.snap.distance_to_duration(self.anchor.time, distance)
    }

    fn duration_to_distance(&self, duration: Time) -> Coord {
        self.snap.duration_to_distance(self.anchor.time, duration)
    }
}

/// Euclidean distance between two points.
pub fn distance_between(a: vec2<Coord>, b: vec2<Coord>) -> Coord {
    let delta = b - a;
    r32(delta.x.as_f32().hypot(delta.y.as_f32()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_snap() {
        let anchor = Anchor::new(vec2(r32(100.0), r32(100.0)), r32(1000.0));
        let snap = BeatSnapProvider::new(Timing::constant(r32(100.0)), r32(100.0));
        let provider = FreeSnapProvider::new(anchor, snap);

        let point = vec2(r32(130.0), r32(140.0));
        assert_eq!(
            provider.find_snapped_position(point),
            SnapResult::new(point, None)
        );

        // Distance 50 is half a beat
        let result = provider.find_snapped_position_and_time(point);
        assert_eq!(result.position, point);
        assert_eq!(result.time, Some(r32(1050.0)));

        // Far enough for the duration to overflow
        let snap = BeatSnapProvider::new(Timing::constant(r32(100.0)), r32(1.0));
        let provider = FreeSnapProvider::new(anchor, snap);
        let result = provider.find_snapped_position_and_time(vec2(r32(3e38), r32(0.0)));
        assert_eq!(result.time, Some(r32(f32::MAX)));
    }
}
