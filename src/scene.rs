use std::{io::Write, path::Path};

use serde::{Deserialize, Serialize};
use snap_core::prelude::*;

#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    #[error("Failed to read the scene file")]
    Io(#[from] std::io::Error),
    #[error("Invalid scene description: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Description of a grid scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub kind: GridKind,
    pub grid: GridConfig,
    pub timing: Timing,
    pub divisor: BeatDivisor,
    /// Playfield distance travelled during a single beat.
    pub distance_per_beat: Coord,
    pub spacing_multiplier: R32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            kind: GridKind::Axis,
            grid: GridConfig::default(),
            timing: Timing::constant(r32(100.0)),
            divisor: BeatDivisor::WHOLE,
            distance_per_beat: r32(100.0),
            spacing_multiplier: r32(1.0),
        }
    }
}

impl SceneConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron(&source)
    }

    pub fn from_ron(source: &str) -> Result<Self, SceneError> {
        Ok(ron::from_str(source)?)
    }
}

/// A grid built from a [`SceneConfig`].
pub struct Scene {
    pub kind: GridKind,
    pub grid: Box<dyn SnapGrid>,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        let snap = BeatSnapProvider::new(config.timing, config.distance_per_beat)
            .with_divisor(config.divisor)
            .with_spacing_multiplier(config.spacing_multiplier);
        let grid = config.kind.build(config.grid, snap);
        tracing::info!(
            "Built {:?} grid with {} ticks",
            config.kind,
            grid.ticks().len()
        );
        Self {
            kind: config.kind,
            grid,
        }
    }

    /// Write the ticks of the grid and the snapped positions of the given points.
    pub fn report(&self, points: &[vec2<Coord>], out: &mut impl Write) -> std::io::Result<()> {
        let base = self.grid.base();
        let anchor = base.anchor();
        writeln!(
            out,
            "{:?} grid at ({:.2}, {:.2}), t={:.2}ms, divisor {}",
            self.kind,
            anchor.position.x.as_f32(),
            anchor.position.y.as_f32(),
            anchor.time.as_f32(),
            base.snap().divisor()
        )?;
        let max_intervals = match base.max_intervals() {
            usize::MAX => "unbounded".to_owned(),
            intervals => intervals.to_string(),
        };
        writeln!(
            out,
            "spacing {:.2} ({:.2}ms per tick), max intervals: {}",
            base.spacing().as_f32(),
            base.tick_duration().as_f32(),
            max_intervals
        )?;

        for tick in self.grid.ticks() {
            writeln!(
                out,
                "tick {:>3} at ({:>8.2}, {:>8.2}) t={:>8.2}ms color ({:.2}, {:.2}, {:.2}, {:.2})",
                tick.index_from_placement,
                tick.position.x.as_f32(),
                tick.position.y.as_f32(),
                tick.time.as_f32(),
                tick.color.r,
                tick.color.g,
                tick.color.b,
                tick.color.a,
            )?;
        }

        for &point in points {
            let result = self.grid.find_snapped_position_and_time(point);
            write!(
                out,
                "snap ({:.2}, {:.2}) -> ({:.2}, {:.2})",
                point.x.as_f32(),
                point.y.as_f32(),
                result.position.x.as_f32(),
                result.position.y.as_f32(),
            )?;
            match result.time {
                Some(time) => writeln!(out, " t={:.2}ms", time.as_f32())?,
                None => writeln!(out)?,
            }
        }

        Ok(())
    }
}
