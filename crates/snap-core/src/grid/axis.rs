use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisDirection {
    Right,
    Left,
    Down,
    Up,
}

impl AxisDirection {
    pub const ALL: [Self; 4] = [Self::Right, Self::Left, Self::Down, Self::Up];

    /// Unit vector in screen space (y points down).
    pub fn unit(self) -> vec2<Coord> {
        let (x, y) = match self {
            Self::Right => (1.0, 0.0),
            Self::Left => (-1.0, 0.0),
            Self::Down => (0.0, 1.0),
            Self::Up => (0.0, -1.0),
        };
        vec2(r32(x), r32(y))
    }

    /// Distance from `from` to the edge of the area in this direction.
    fn span(self, from: vec2<Coord>, size: vec2<Coord>) -> f32 {
        match self {
            Self::Right => size.x.as_f32() - from.x.as_f32(),
            Self::Left => from.x.as_f32(),
            Self::Down => size.y.as_f32() - from.y.as_f32(),
            Self::Up => from.y.as_f32(),
        }
    }

    /// Signed distance of `delta` along this direction.
    fn project(self, delta: vec2<f32>) -> f32 {
        match self {
            Self::Right => delta.x,
            Self::Left => -delta.x,
            Self::Down => delta.y,
            Self::Up => -delta.y,
        }
    }
}

/// Places ticks along the four axis directions from the anchor,
/// as far as the draw area and the bound allow.
#[derive(Debug, Clone)]
pub struct AxisSnapGrid {
    base: GridBase,
    /// Number of ticks in each of [`AxisDirection::ALL`].
    counts: [usize; 4],
    ticks: Vec<Tick>,
}

impl AxisSnapGrid {
    pub fn new_with(config: GridConfig, snap: BeatSnapProvider) -> Self {
        let mut grid = Self {
            base: GridBase::new_with(config, snap),
            counts: [0; 4],
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

    /// Number of ticks generated in the given direction.
    pub fn tick_count(&self, direction: AxisDirection) -> usize {
        self.counts[direction as usize]
    }

    /// Ticks in the given direction, closest first.
    pub fn ticks_in(&self, direction: AxisDirection) -> &[Tick] {
        let start: usize = self.counts[..direction as usize].iter().sum();
        &self.ticks[start..start + self.counts[direction as usize]]
    }

    fn create_content(&mut self) {
        let config = self.base.config();
        let (anchor, size) = (config.anchor.position, config.draw_size);

        self.ticks.clear();
        for (i, direction) in AxisDirection::ALL.into_iter().enumerate() {
            let count = self.base.tick_count(direction.span(anchor, size));
            self.counts[i] = count;
            let unit = direction.unit();
            self.ticks
                .extend((0..count).map(|index| self.base.make_tick(unit, index)));
        }
        log::debug!(
            "Generated {} axis ticks (right {}, left {}, down {}, up {})",
            self.ticks.len(),
            self.counts[0],
            self.counts[1],
            self.counts[2],
            self.counts[3],
        );
    }

    /// Find the closest tick and its index counting from the anchor.
    fn closest(&self, point: vec2<Coord>) -> (vec2<Coord>, usize) {
        let anchor = self.base.anchor().position;
        let spacing = self.base.spacing();
        let point = point.map(|x| x.as_f32());
        let delta = point - anchor.map(|x| x.as_f32());

        let candidates = AxisDirection::ALL
            .into_iter()
            .zip(self.counts)
            .filter(|&(_, count)| count > 0)
            .map(|(direction, count)| {
                let along = (direction.project(delta) / spacing.as_f32()).round();
                let index = (along.max(1.0) as usize).min(count);
                let distance = saturating_r32(spacing.as_f32() * index as f32);
                let position = self.base.position_at(direction.unit(), distance);
                (position, index)
            });

        // The first of equally close candidates wins, so the anchor wins ties
        std::iter::once((anchor, 0))
            .chain(candidates)
            .map(|(position, index)| {
                let delta = point - position.map(|x| x.as_f32());
                (delta.x * delta.x + delta.y * delta.y, position, index)
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map_or((anchor, 0), |(_, position, index)| (position, index))
    }
}

impl SnapProvider for AxisSnapGrid {
    fn find_snapped_position_and_time(&self, point: vec2<Coord>) -> SnapResult {
        let (position, index) = self.closest(point);
        SnapResult::new(position, Some(self.base.time_at_index(index)))
    }

    fn distance_to_duration(&self, distance: Coord) -> Time {
        self.base.distance_to_duration(distance)
    }

    fn duration_to_distance(&self, duration: Time) -> Coord {
        self.base.duration_to_distance(duration)
    }
}

impl SnapGrid for AxisSnapGrid {
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
