mod axis;
mod circular;
#[cfg(test)]
mod properties;

pub use self::{axis::*, circular::*};

use crate::prelude::*;

/// Limits how far from the anchor the grid extends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GridBound {
    /// No ticks past the given end time.
    Time(Time),
    /// No ticks further than the given distance from the anchor.
    Distance(Coord),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub anchor: Anchor,
    /// The area the grid is drawn in, starting at the origin.
    pub draw_size: vec2<Coord>,
    pub bound: Option<GridBound>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            anchor: Anchor::default(),
            draw_size: vec2(r32(1024.0), r32(768.0)),
            bound: None,
        }
    }
}

/// Which grid layout to build.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum GridKind {
    /// Ticks along the four axis directions.
    #[default]
    Axis,
    /// Concentric rings around the anchor.
    Circular,
}

impl GridKind {
    pub fn build(self, config: GridConfig, snap: BeatSnapProvider) -> Box<dyn SnapGrid> {
        match self {
            GridKind::Axis => Box::new(AxisSnapGrid::new_with(config, snap)),
            GridKind::Circular => Box::new(CircularSnapGrid::new_with(config, snap)),
        }
    }
}

/// A single snap-eligible position of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub position: vec2<Coord>,
    /// Unit direction from the anchor towards the tick.
    pub direction: vec2<Coord>,
    /// Distance from the anchor.
    pub distance: Coord,
    /// Index counting from the anchor: 0 is the closest tick.
    pub index_from_placement: usize,
    /// The time an object placed on this tick would start at.
    pub time: Time,
    pub color: Color,
}

/// A [`SnapProvider`] that also generates the ticks to display.
pub trait SnapGrid: SnapProvider {
    fn base(&self) -> &GridBase;

    /// Currently generated ticks (the anchor itself is not included).
    fn ticks(&self) -> &[Tick];

    /// Recompute the ticks if anything they depend on changed.
    /// Returns whether the ticks were recomputed.
    fn update(&mut self) -> bool;
}

/// State shared by all grid layouts.
#[derive(Debug, Clone)]
pub struct GridBase {
    config: GridConfig,
    snap: BeatSnapProvider,
    subscription: BeatSnapSubscription,
    /// Distance between neighbouring ticks.
    spacing: Coord,
    /// Duration between neighbouring ticks.
    tick_duration: Time,
    /// Maximum number of ticks in a single direction allowed by the bound.
    max_intervals: usize,
}

impl GridBase {
    pub fn new_with(config: GridConfig, snap: BeatSnapProvider) -> Self {
        let mut base = Self {
            config: GridConfig {
                bound: config.bound.map(normalize_bound),
                ..config
            },
            snap,
            subscription: BeatSnapSubscription::stale(),
            spacing: r32(MIN_TICK_SPACING),
            tick_duration: Time::ZERO,
            max_intervals: 0,
        };
        base.refresh();
        base
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn anchor(&self) -> Anchor {
        self.config.anchor
    }

    pub fn snap(&self) -> &BeatSnapProvider {
        &self.snap
    }

    /// Changes made through the provider take effect on the next update.
    pub fn snap_mut(&mut self) -> &mut BeatSnapProvider {
        &mut self.snap
    }

    pub fn spacing(&self) -> Coord {
        self.spacing
    }

    pub fn tick_duration(&self) -> Time {
        self.tick_duration
    }

    pub fn max_intervals(&self) -> usize {
        self.max_intervals
    }

    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.config.anchor = anchor;
        self.recalculate();
    }

    pub fn set_draw_size(&mut self, draw_size: vec2<Coord>) {
        self.config.draw_size = draw_size;
    }

    pub fn set_bound(&mut self, bound: Option<GridBound>) {
        self.config.bound = bound.map(normalize_bound);
        self.recalculate();
    }

    /// Recalculate the spacing if the snap settings changed.
    /// Returns whether anything changed.
    pub fn refresh(&mut self) -> bool {
        if !self.subscription.poll(&self.snap) {
            return false;
        }
        self.recalculate();
        true
    }

    fn recalculate(&mut self) {
        let time = self.config.anchor.time;
        self.spacing = self.snap.beat_snap_distance_at(time);
        self.tick_duration = self.snap.distance_to_duration(time, self.spacing);
        self.max_intervals = match self.config.bound {
            None => usize::MAX,
            Some(GridBound::Time(end_time)) => {
                ticks_in_span(end_time.as_f32() - time.as_f32(), self.tick_duration.as_f32())
            }
            Some(GridBound::Distance(distance)) => {
                ticks_in_span(distance.as_f32(), self.spacing.as_f32())
            }
        };
        log::debug!(
            "Grid spacing {:.2} ({:.2}ms per tick), max intervals: {}",
            self.spacing.as_f32(),
            self.tick_duration.as_f32(),
            self.max_intervals
        );
    }

    /// Number of ticks that fit into the span, capped by the bound
    /// and by [`MAX_TICKS_PER_DIRECTION`].
    pub fn tick_count(&self, span: f32) -> usize {
        let count = ticks_in_span(span, self.spacing.as_f32()).min(self.max_intervals);
        if count > MAX_TICKS_PER_DIRECTION {
            log::debug!(
                "{} ticks do not fit, only {} are generated",
                count,
                MAX_TICKS_PER_DIRECTION
            );
        }
        count.min(MAX_TICKS_PER_DIRECTION)
    }

    /// The time of the tick with the given index counting from the anchor (anchor is 0).
    pub fn time_at_index(&self, index: usize) -> Time {
        self.config.anchor.time + self.tick_duration * r32(index as f32)
    }

    pub fn distance_to_duration(&self, distance: Coord) -> Time {
        self.snap
            .distance_to_duration(self.config.anchor.time, distance)
    }

    pub fn duration_to_distance(&self, duration: Time) -> Coord {
        self.snap
            .duration_to_distance(self.config.anchor.time, duration)
    }

    /// The colour of a tick depends on the beat it lands on,
    /// and fades out with every whole beat away from the anchor.
    pub fn color_for_index_from_placement(&self, placement_index: usize) -> Color {
        let anchor_time = self.config.anchor.time;
        let timing = self.snap.timing().get_timing(anchor_time);
        let divisor = self.snap.divisor();
        let snap_length = self.snap.snap_beat_length_at(anchor_time);
        let beat_index = ((anchor_time - timing.time) / snap_length)
            .round()
            .as_f32() as i64;

        let tick_divisor = divisor.divisor_for_beat_index(beat_index + placement_index as i64 + 1);
        let mut color = BeatDivisor::color_for(tick_divisor);

        let repeat_index = placement_index / divisor.get() as usize;
        color.a *= 0.5 / (repeat_index + 1) as f32;
        color
    }

    /// Construct the tick lying `index_from_placement + 1` intervals
    /// away from the anchor in the given direction.
    pub fn make_tick(&self, direction: vec2<Coord>, index_from_placement: usize) -> Tick {
        let index = index_from_placement + 1;
        let distance = saturating_r32(self.spacing.as_f32() * index as f32);
        Tick {
            position: self.position_at(direction, distance),
            direction,
            distance,
            index_from_placement,
            time: self.time_at_index(index),
            color: self.color_for_index_from_placement(index_from_placement),
        }
    }

    /// The point at the given distance from the anchor in the given direction.
    pub fn position_at(&self, direction: vec2<Coord>, distance: Coord) -> vec2<Coord> {
        let anchor = self.config.anchor.position;
        let offset = direction.map(|x| x.as_f32() * distance.as_f32());
        vec2(
            saturating_r32(anchor.x.as_f32() + offset.x),
            saturating_r32(anchor.y.as_f32() + offset.y),
        )
    }
}

fn normalize_bound(bound: GridBound) -> GridBound {
    match bound {
        GridBound::Time(time) => GridBound::Time(time),
        GridBound::Distance(distance) if distance < Coord::ZERO => {
            log::debug!("Negative grid bound {:.2}, using 0", distance.as_f32());
            GridBound::Distance(Coord::ZERO)
        }
        GridBound::Distance(distance) => GridBound::Distance(distance),
    }
}
