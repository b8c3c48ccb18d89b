use batbox_num::*;

/// Time in milliseconds.
pub type Time = R32;
/// Playfield (on-screen) distance.
pub type Coord = R32;

/// Smallest distance allowed between two neighbouring ticks.
pub const MIN_TICK_SPACING: f32 = 0.1;

/// Tolerance used when counting how many whole ticks fit into a span,
/// so that a span of exactly `n` ticks is not lost to rounding.
pub const TICK_COUNT_EPSILON: f32 = 1e-4;

/// Most ticks generated in a single direction (or rings of a circular grid),
/// no matter how large the draw area is.
pub const MAX_TICKS_PER_DIRECTION: usize = 65_536;

/// Converts to [`R32`], saturating at the largest finite values.
pub fn saturating_r32(value: f32) -> R32 {
    if value.is_nan() {
        return R32::ZERO;
    }
    r32(value.clamp(f32::MIN, f32::MAX))
}

/// Number of whole ticks of size `spacing` that fit into `span`.
/// Non-positive spans and spacings produce no ticks.
pub fn ticks_in_span(span: f32, spacing: f32) -> usize {
    if !(spacing > 0.0) || !(span > 0.0) {
        return 0;
    }
    let count = (span / spacing + TICK_COUNT_EPSILON).floor();
    if count.is_finite() {
        count as usize
    } else {
        usize::MAX
    }
}
