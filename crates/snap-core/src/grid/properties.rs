use super::*;

use proptest::prelude::*;

fn snap(distance_per_beat: f32, divisor: u32) -> BeatSnapProvider {
    BeatSnapProvider::new(Timing::constant(r32(100.0)), r32(distance_per_beat))
        .with_divisor(BeatDivisor::new(divisor))
}

/// A grid on an area large enough that only the bound limits the ticks.
fn wide_config(bound: Option<GridBound>) -> GridConfig {
    GridConfig {
        anchor: Anchor::new(vec2(r32(50_000.0), r32(50_000.0)), Time::ZERO),
        draw_size: vec2(r32(100_000.0), r32(100_000.0)),
        bound,
    }
}

fn divisors() -> impl Strategy<Value = u32> {
    prop::sample::select(BeatDivisor::VALID.to_vec())
}

proptest! {
    #[test]
    fn bound_limits_tick_count(
        distance_per_beat in 10.0f32..200.0,
        divisor in divisors(),
        whole in 0usize..20,
        fraction in 0.05f32..0.95,
    ) {
        let spacing = snap(distance_per_beat, divisor)
            .beat_snap_distance_at(Time::ZERO)
            .as_f32();
        let bound = spacing * (whole as f32 + fraction);
        let grid = AxisSnapGrid::new_with(
            wide_config(Some(GridBound::Distance(r32(bound)))),
            snap(distance_per_beat, divisor),
        );
        for direction in AxisDirection::ALL {
            prop_assert_eq!(grid.tick_count(direction), whole);
        }
    }

    #[test]
    fn span_limits_tick_count(
        distance_per_beat in 10.0f32..200.0,
        divisor in divisors(),
        x in 0.0f32..1024.0,
    ) {
        let config = GridConfig {
            anchor: Anchor::new(vec2(r32(x), r32(384.0)), Time::ZERO),
            ..GridConfig::default()
        };
        let grid = AxisSnapGrid::new_with(config, snap(distance_per_beat, divisor));
        let spacing = grid.base().spacing().as_f32();
        prop_assert_eq!(
            grid.tick_count(AxisDirection::Right),
            ticks_in_span(1024.0 - x, spacing)
        );
        prop_assert_eq!(grid.tick_count(AxisDirection::Left), ticks_in_span(x, spacing));
        for tick in grid.ticks_in(AxisDirection::Right) {
            prop_assert!(tick.position.x.as_f32() <= 1024.0 + spacing * 1e-3);
        }
    }

    #[test]
    fn conversions_are_inverse(
        distance_per_beat in 1.0f32..400.0,
        divisor in divisors(),
        multiplier in 0.1f32..6.0,
        distance in 0.0f32..10_000.0,
    ) {
        let snap = snap(distance_per_beat, divisor).with_spacing_multiplier(r32(multiplier));
        let grid = CircularSnapGrid::new_with(GridConfig::default(), snap);
        let back = grid.duration_to_distance(grid.distance_to_duration(r32(distance)));
        let tolerance = 1e-4 * distance.max(1.0);
        prop_assert!((back.as_f32() - distance).abs() <= tolerance);
    }

    #[test]
    fn axis_snap_is_idempotent(
        divisor in divisors(),
        x in 0.0f32..1024.0,
        y in 0.0f32..768.0,
        bound in prop::option::of(0.0f32..400.0),
    ) {
        let config = GridConfig {
            bound: bound.map(|bound| GridBound::Time(r32(bound))),
            ..GridConfig::default()
        };
        let grid = AxisSnapGrid::new_with(config, snap(100.0, divisor));
        let once = grid.find_snapped_position_and_time(vec2(r32(x), r32(y)));
        let twice = grid.find_snapped_position_and_time(once.position);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn axis_snap_on_tick(divisor in divisors(), pick in any::<prop::sample::Index>()) {
        let grid = AxisSnapGrid::new_with(GridConfig::default(), snap(100.0, divisor));
        let tick = pick.get(grid.ticks());
        let result = grid.find_snapped_position_and_time(tick.position);
        prop_assert_eq!(result.position, tick.position);
        prop_assert_eq!(result.time, Some(tick.time));
    }

    #[test]
    fn snap_accepts_any_finite_point(
        divisor in divisors(),
        x in proptest::num::f32::NORMAL | proptest::num::f32::ZERO,
        y in proptest::num::f32::NORMAL | proptest::num::f32::ZERO,
    ) {
        let point = vec2(r32(x), r32(y));
        let axis = AxisSnapGrid::new_with(GridConfig::default(), snap(100.0, divisor));
        let result = axis.find_snapped_position_and_time(point);
        prop_assert!(result.time.is_some());
        let circular = CircularSnapGrid::new_with(GridConfig::default(), snap(100.0, divisor));
        let result = circular.find_snapped_position_and_time(point);
        prop_assert!(result.time.is_some());
        let duration = circular.distance_to_duration(r32(x.abs()));
        prop_assert!(duration.as_f32() >= 0.0);
    }

    #[test]
    fn circular_snap_is_idempotent(
        divisor in divisors(),
        x in 0.0f32..1024.0,
        y in 0.0f32..768.0,
    ) {
        let grid = CircularSnapGrid::new_with(GridConfig::default(), snap(100.0, divisor));
        let once = grid.find_snapped_position_and_time(vec2(r32(x), r32(y)));
        let twice = grid.find_snapped_position_and_time(once.position);
        let delta = once.position - twice.position;
        prop_assert!(delta.x.as_f32().abs() < 1e-2 && delta.y.as_f32().abs() < 1e-2);
        prop_assert_eq!(once.time, twice.time);
    }
}
