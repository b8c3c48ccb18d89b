use super::*;

/// Places rings of increasing radius around the anchor.
/// Snapping keeps the direction from the anchor and rounds the distance to a ring.
#[derive(Debug, Clone)]
pub struct CircularSnapGrid {
    base: GridBase,
    ticks: Vec<Tick>,
}

impl CircularSnapGrid {
    pub fn new_with(config: GridConfig, snap: BeatSnapProvider) -> Self {
        let mut grid = Self {
            base: GridBase::new_with(config, snap),
            ticks: Vec::new(),
        };
        grid.create_content();
        grid
    }

    pub fn snap_mut(&mut self) -> &mut BeatSnapProvider {
        self.base.snap_mut()
    }

    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.base.set_anchor(anchor);
        self.create_content();
    }

    pub fn set_draw_size(&mut self, draw_size: vec2<Coord>) {
        self.base.set_draw_size(draw_size);
        self.create_content();
    }

    pub fn set_bound(&mut self, bound: Option<GridBound>) {
        self.base.set_bound(bound);
        self.create_content();
    }

    /// Number of visible rings.
    pub fn ring_count(&self) -> usize {
        self.ticks.len()
    }

    fn create_content(&mut self) {
        let config = self.base.config();
        let (anchor, size) = (config.anchor.position, config.draw_size);

        // Distance to the furthest corner of the draw area
        let dx = anchor.x.as_f32().max(size.x.as_f32() - anchor.x.as_f32());
        let dy = anchor.y.as_f32().max(size.y.as_f32() - anchor.y.as_f32());
        let max_distance = dx.max(0.0).hypot(dy.max(0.0));

        let count = self.base.tick_count(max_distance);
        // Rings are represented by their rightmost point
        let unit = vec2(r32(1.0), r32(0.0));
        self.ticks = (0..count)
            .map(|index| self.base.make_tick(unit, index))
            .collect();
        log::debug!("Generated {} rings", count);
    }
}

impl SnapProvider for CircularSnapGrid {
    fn find_snapped_position_and_time(&self, point: vec2<Coord>) -> SnapResult {
        let anchor = self.base.anchor();
        let rings = self.ring_count();
        if rings == 0 {
            return SnapResult::new(anchor.position, Some(anchor.time));
        }

        // Differences of two finite `f32` values always fit into `f64`
        let mut dx = point.x.as_f32() as f64 - anchor.position.x.as_f32() as f64;
        let mut dy = point.y.as_f32() as f64 - anchor.position.y.as_f32() as f64;
        if dx == 0.0 && dy == 0.0 {
            // Arbitrary direction for the anchor itself
            (dx, dy) = (0.001, 0.001);
        }
        let distance = dx.hypot(dy);
        let spacing = self.base.spacing().as_f32();

        let index = ((distance / spacing as f64).round() as usize).clamp(1, rings);
        let radius = saturating_r32(spacing * index as f32);
        let direction = vec2(r32((dx / distance) as f32), r32((dy / distance) as f32));
        let position = self.base.position_at(direction, radius);
        SnapResult::new(position, Some(self.base.time_at_index(index)))
    }

    fn distance_to_duration(&self, distance: Coord) -> Time {
        self.base.distance_to_duration(distance)
    }

    fn duration_to_distance(&self, duration: Time) -> Coord {
        self.base.duration_to_distance(duration)
    }
}

impl SnapGrid for CircularSnapGrid {
    fn base(&self) -> &GridBase {
        &self.base
    }

    fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    fn update(&mut self) -> bool {
        if !self.base.refresh() {
            return false;
        }
        self.create_content();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::grid::tests::quarter_snap;

    fn grid(bound: Option<GridBound>) -> CircularSnapGrid {
        let config = GridConfig {
            bound,
            ..GridConfig::default()
        };
        CircularSnapGrid::new_with(config, quarter_snap())
    }

    fn assert_close(a: vec2<Coord>, b: vec2<Coord>) {
        let delta = a - b;
        assert!(
            delta.x.as_f32().abs() < 1e-3 && delta.y.as_f32().abs() < 1e-3,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_ring_count() {
        let grid = grid(None);
        // Furthest corner is sqrt(512^2 + 384^2) = 640 away
        assert_eq!(grid.ring_count(), 25);

        let grid = self::grid(Some(GridBound::Distance(r32(100.0))));
        assert_eq!(grid.ring_count(), 4);
        let radii: Vec<f32> = grid
            .ticks()
            .iter()
            .map(|tick| tick.distance.as_f32())
            .collect();
        assert_eq!(radii, [25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn test_huge_area() {
        let config = GridConfig {
            draw_size: vec2(r32(3e38), r32(3e38)),
            ..GridConfig::default()
        };
        let grid = CircularSnapGrid::new_with(config, quarter_snap());
        assert_eq!(grid.ring_count(), MAX_TICKS_PER_DIRECTION);

        let result = grid.find_snapped_position_and_time(vec2(r32(1e30), r32(384.0)));
        let last = grid.ticks().last().expect("at least one ring");
        assert_close(result.position, last.position);
        assert_eq!(result.time, Some(last.time));
    }

    #[test]
    fn test_snap_across_whole_range() {
        let config = GridConfig {
            anchor: Anchor::new(vec2(r32(-3e38), r32(0.0)), Time::ZERO),
            ..GridConfig::default()
        };
        let grid = CircularSnapGrid::new_with(config, quarter_snap());
        let result = grid.find_snapped_position_and_time(vec2(r32(3e38), r32(3e38)));
        let last = grid.ticks().last().expect("at least one ring");
        assert_eq!(result.time, Some(last.time));
        assert!(result.position.y.as_f32() > 0.0);
    }

    #[test]
    fn test_snap_keeps_direction() {
        let grid = grid(None);
        // 3-4-5 triangle, distance 55 rounds to the second ring
        let result =
            grid.find_snapped_position_and_time(vec2(r32(512.0 + 33.0), r32(384.0 + 44.0)));
        assert_close(result.position, vec2(r32(512.0 + 30.0), r32(384.0 + 40.0)));
        assert_eq!(result.time, Some(r32(50.0)));
    }

    #[test]
    fn test_snap_clamps_to_rings() {
        let grid = grid(Some(GridBound::Distance(r32(50.0))));
        // Closer than half a ring still snaps onto the first ring
        let result = grid.find_snapped_position(vec2(r32(514.0), r32(384.0)));
        assert_close(result.position, vec2(r32(537.0), r32(384.0)));

        // At the anchor, the direction is diagonal
        let result = grid.find_snapped_position(vec2(r32(512.0), r32(384.0)));
        let offset = 25.0 / 2.0f32.sqrt();
        assert_close(result.position, vec2(r32(512.0 + offset), r32(384.0 + offset)));

        // Further than the bound clamps to the last ring
        let result = grid.find_snapped_position_and_time(vec2(r32(512.0), r32(0.0)));
        assert_close(result.position, vec2(r32(512.0), r32(334.0)));
        assert_eq!(result.time, Some(r32(50.0)));
    }

    #[test]
    fn test_zero_bound() {
        let grid = grid(Some(GridBound::Time(r32(0.0))));
        assert_eq!(grid.ring_count(), 0);
        let result = grid.find_snapped_position_and_time(vec2(r32(600.0), r32(600.0)));
        assert_eq!(result.position, vec2(r32(512.0), r32(384.0)));
        assert_eq!(result.time, Some(r32(0.0)));
    }

    #[test]
    fn test_snap_idempotent() {
        let grid = grid(None);
        let points = [
            vec2(r32(0.0), r32(0.0)),
            vec2(r32(700.0), r32(123.0)),
            vec2(r32(511.0), r32(390.0)),
        ];
        for point in points {
            let once = grid.find_snapped_position(point).position;
            let twice = grid.find_snapped_position(once).position;
            assert_close(once, twice);
        }
    }
}
