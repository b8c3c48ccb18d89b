mod scene;
mod setup;

use self::scene::{Scene, SceneConfig};

use std::path::PathBuf;

use color_eyre::{eyre::WrapErr, Result};
use snap_core::prelude::*;

#[derive(clap::Parser)]
struct Opts {
    /// Scene description in RON format.
    scene: Option<PathBuf>,
    /// Beat divisor, the closest supported one is used.
    #[clap(long)]
    divisor: Option<u32>,
    /// Do not place ticks after the given time (in ms).
    #[clap(long, conflicts_with = "bound_distance", value_parser = parse_finite)]
    bound_time: Option<R32>,
    /// Do not place ticks further than the given distance.
    #[clap(long, value_parser = parse_finite)]
    bound_distance: Option<R32>,
    /// Use concentric rings instead of axis ticks.
    #[clap(long)]
    circular: bool,
    /// Positions to snap, formatted as `x,y`.
    #[clap(long = "snap", value_parser = parse_point)]
    points: Vec<vec2<Coord>>,
}

fn parse_finite(value: &str) -> Result<R32, String> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .map(r32)
        .ok_or_else(|| format!("expected a finite number, got `{}`", value))
}

fn parse_point(value: &str) -> Result<vec2<Coord>, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{}`", value))?;
    Ok(vec2(parse_finite(x)?, parse_finite(y)?))
}

fn main() -> Result<()> {
    let opts: Opts = clap::Parser::parse();

    setup::setup()?;

    let mut config = match &opts.scene {
        Some(path) => {
            tracing::info!("Loading scene {:?}", path);
            SceneConfig::load(path).wrap_err_with(|| format!("when loading {:?}", path))?
        }
        None => {
            tracing::info!("No scene given, using the default one");
            SceneConfig::default()
        }
    };

    if let Some(divisor) = opts.divisor {
        config.divisor = BeatDivisor::new(divisor);
    }
    if let Some(time) = opts.bound_time {
        config.grid.bound = Some(GridBound::Time(time));
    }
    if let Some(distance) = opts.bound_distance {
        config.grid.bound = Some(GridBound::Distance(distance));
    }
    if opts.circular {
        config.kind = GridKind::Circular;
    }

    let scene = Scene::new(config);

    let mut stdout = std::io::stdout().lock();
    scene
        .report(&opts.points, &mut stdout)
        .wrap_err("when writing the report")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("512,384"), Ok(vec2(r32(512.0), r32(384.0))));
        assert_eq!(parse_point(" 1.5 , -2 "), Ok(vec2(r32(1.5), r32(-2.0))));
        assert!(parse_point("512").is_err());
        assert!(parse_point("a,1").is_err());
        assert!(parse_point("inf,1").is_err());
    }

    #[test]
    fn test_bounds_must_be_finite() {
        assert_eq!(parse_finite("100"), Ok(r32(100.0)));
        assert!(parse_finite("NaN").is_err());
        assert!(parse_finite("-inf").is_err());

        let opts = <Opts as clap::Parser>::try_parse_from(["snap-grid", "--bound-time", "NaN"]);
        assert!(opts.is_err());
        let opts =
            <Opts as clap::Parser>::try_parse_from(["snap-grid", "--bound-distance", "150"])
                .expect("valid options");
        assert_eq!(opts.bound_distance, Some(r32(150.0)));
    }
}
