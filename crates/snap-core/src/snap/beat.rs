use super::*;

/// Smallest allowed distance spacing multiplier.
pub const MIN_SPACING_MULTIPLIER: f32 = 0.1;
/// Largest allowed distance spacing multiplier.
pub const MAX_SPACING_MULTIPLIER: f32 = 6.0;

/// Converts between playfield distances and durations
/// using the beatmap timing and the selected beat divisor.
#[derive(Debug, Clone)]
pub struct BeatSnapProvider {
    timing: Observable<Timing>,
    divisor: Observable<BeatDivisor>,
    /// Scales the distance between ticks without changing their timing.
    spacing_multiplier: Observable<R32>,
    /// Playfield distance travelled during a single beat.
    distance_per_beat: Observable<Coord>,
}

/// Tracks changes to everything a [`BeatSnapProvider`] depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeatSnapSubscription {
    timing: Subscription,
    divisor: Subscription,
    spacing_multiplier: Subscription,
    distance_per_beat: Subscription,
}

impl BeatSnapSubscription {
    /// Subscription that reports a change on the first poll.
    pub fn stale() -> Self {
        Self {
            timing: Subscription::stale(),
            divisor: Subscription::stale(),
            spacing_multiplier: Subscription::stale(),
            distance_per_beat: Subscription::stale(),
        }
    }

    /// Returns whether anything changed since the last poll.
    pub fn poll(&mut self, snap: &BeatSnapProvider) -> bool {
        // Poll everything so that all changes are marked as seen
        let timing = self.timing.poll(&snap.timing);
        let divisor = self.divisor.poll(&snap.divisor);
        let multiplier = self.spacing_multiplier.poll(&snap.spacing_multiplier);
        let distance = self.distance_per_beat.poll(&snap.distance_per_beat);
        timing || divisor || multiplier || distance
    }
}

impl BeatSnapProvider {
    pub fn new(timing: Timing, distance_per_beat: Coord) -> Self {
        Self {
            timing: Observable::new(timing),
            divisor: Observable::new(BeatDivisor::default()),
            spacing_multiplier: Observable::new(r32(1.0)),
            distance_per_beat: Observable::new(clamp_distance(distance_per_beat)),
        }
    }

    pub fn with_divisor(mut self, divisor: BeatDivisor) -> Self {
        self.set_divisor(divisor);
        self
    }

    pub fn with_spacing_multiplier(mut self, multiplier: R32) -> Self {
        self.set_spacing_multiplier(multiplier);
        self
    }

    pub fn subscribe(&self) -> BeatSnapSubscription {
        BeatSnapSubscription {
            timing: self.timing.subscribe(),
            divisor: self.divisor.subscribe(),
            spacing_multiplier: self.spacing_multiplier.subscribe(),
            distance_per_beat: self.distance_per_beat.subscribe(),
        }
    }

    pub fn timing(&self) -> &Timing {
        self.timing.get()
    }

    pub fn set_timing(&mut self, timing: Timing) {
        self.timing.set(timing);
    }

    pub fn add_timing_point(&mut self, point: TimingPoint) {
        self.timing.modify(|timing| timing.add(point));
    }

    pub fn divisor(&self) -> BeatDivisor {
        *self.divisor.get()
    }

    pub fn set_divisor(&mut self, divisor: BeatDivisor) {
        if self.divisor.set(divisor) {
            log::debug!("Beat divisor changed to {}", divisor);
        }
    }

    pub fn spacing_multiplier(&self) -> R32 {
        *self.spacing_multiplier.get()
    }

    /// Set the distance spacing multiplier, clamped to the supported range.
    pub fn set_spacing_multiplier(&mut self, multiplier: R32) {
        let clamped = r32(
            multiplier
                .as_f32()
                .clamp(MIN_SPACING_MULTIPLIER, MAX_SPACING_MULTIPLIER),
        );
        if clamped != multiplier {
            log::debug!(
                "Spacing multiplier {:.2} is out of range, clamped to {:.2}",
                multiplier.as_f32(),
                clamped.as_f32()
            );
        }
        self.spacing_multiplier.set(clamped);
    }

    pub fn distance_per_beat(&self) -> Coord {
        *self.distance_per_beat.get()
    }

    pub fn set_distance_per_beat(&mut self, distance: Coord) {
        self.distance_per_beat.set(clamp_distance(distance));
    }

    /// Duration of a single `1 / divisor` of a beat at the given time.
    pub fn snap_beat_length_at(&self, time: Time) -> Time {
        self.timing().get_timing(time).beat_length / self.divisor().as_r32()
    }

    /// Distance between two ticks of the grid anchored at the given time.
    /// Always positive.
    pub fn beat_snap_distance_at(&self, _time: Time) -> Coord {
        let distance = self.distance_per_beat().as_f32() / self.divisor().get() as f32
            * self.spacing_multiplier().as_f32();
        saturating_r32(distance.max(MIN_TICK_SPACING))
    }

    /// Saturates at the largest finite distance.
    pub fn duration_to_distance(&self, reference_time: Time, duration: Time) -> Coord {
        let units = duration.as_f32() / self.snap_beat_length_at(reference_time).as_f32();
        saturating_r32(units * self.beat_snap_distance_at(reference_time).as_f32())
    }

    /// Saturates at the largest finite duration.
    pub fn distance_to_duration(&self, reference_time: Time, distance: Coord) -> Time {
        let units = distance.as_f32() / self.beat_snap_distance_at(reference_time).as_f32();
        saturating_r32(units * self.snap_beat_length_at(reference_time).as_f32())
    }

    /// Snap the time to the beat grid of the timing in effect at `reference_time`.
    pub fn snap_time(&self, time: Time, reference_time: Time) -> Time {
        self.timing()
            .snap_to_beat(time, reference_time, self.divisor())
    }

    /// Converts the distance into a duration snapped to the beat grid.
    pub fn snapped_duration_from_distance(&self, reference_time: Time, distance: Coord) -> Time {
        let duration = self.distance_to_duration(reference_time, distance);
        let snapped_end = self.snap_time(add_time(reference_time, duration), reference_time);
        saturating_r32(snapped_end.as_f32() - reference_time.as_f32())
    }

    /// Converts the distance into the closest distance that lands on the beat grid,
    /// without going further than the original distance.
    pub fn snapped_distance_from_distance(&self, reference_time: Time, distance: Coord) -> Coord {
        let duration = self.distance_to_duration(reference_time, distance);
        let actual_end = add_time(reference_time, duration);
        let mut snapped_end = self.snap_time(actual_end, reference_time);
        // Rounding to the nearest division may have snapped forward
        if snapped_end > add_time(actual_end, r32(1.0)) {
            let snap_length = self.snap_beat_length_at(reference_time);
            snapped_end = saturating_r32(snapped_end.as_f32() - snap_length.as_f32());
        }
        let duration = saturating_r32(snapped_end.as_f32() - reference_time.as_f32());
        self.duration_to_distance(reference_time, duration)
    }
}

fn add_time(time: Time, duration: Time) -> Time {
    saturating_r32(time.as_f32() + duration.as_f32())
}

fn clamp_distance(distance: Coord) -> Coord {
    r32(distance.as_f32().max(MIN_TICK_SPACING))
}
