use super::*;

/// Beat length used when the beatmap has no timing points (150 BPM).
pub const DEFAULT_BEAT_LENGTH: f32 = 60_000.0 / 150.0;
/// Shortest beat length (in ms) a timing point may have.
pub const MIN_BEAT_LENGTH: f32 = 6.0;
/// Longest beat length (in ms) a timing point may have.
pub const MAX_BEAT_LENGTH: f32 = 60_000.0;

#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "Vec<TimingPoint>", into = "Vec<TimingPoint>")]
pub struct Timing {
    /// Points are kept sorted by time.
    points: Vec<TimingPoint>,
}

/// A timing point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimingPoint {
    /// The time from which this timing applies.
    pub time: Time,
    /// Duration of a single beat (in ms).
    pub beat_length: Time,
}

impl TimingPoint {
    pub fn new(time: Time, beat_length: Time) -> Self {
        Self {
            time,
            beat_length: clamp_beat_length(beat_length),
        }
    }

    /// Beats per minute of this timing point.
    pub fn bpm(&self) -> R32 {
        r32(60_000.0) / self.beat_length
    }
}

impl Default for TimingPoint {
    fn default() -> Self {
        Self {
            time: Time::ZERO,
            beat_length: r32(DEFAULT_BEAT_LENGTH),
        }
    }
}

impl From<Vec<TimingPoint>> for Timing {
    fn from(points: Vec<TimingPoint>) -> Self {
        Self::new(points)
    }
}

impl From<Timing> for Vec<TimingPoint> {
    fn from(timing: Timing) -> Self {
        timing.points
    }
}

fn clamp_beat_length(beat_length: Time) -> Time {
    let clamped = r32(beat_length.as_f32().clamp(MIN_BEAT_LENGTH, MAX_BEAT_LENGTH));
    if clamped != beat_length {
        log::debug!(
            "Beat length {:.2}ms is out of range, clamped to {:.2}ms",
            beat_length.as_f32(),
            clamped.as_f32()
        );
    }
    clamped
}

impl Timing {
    pub fn new(points: impl IntoIterator<Item = TimingPoint>) -> Self {
        let mut timing = Self::default();
        for point in points {
            timing.add(point);
        }
        timing
    }

    /// Timing with a single point at time zero.
    pub fn constant(beat_length: Time) -> Self {
        Self::new([TimingPoint::new(Time::ZERO, beat_length)])
    }

    pub fn points(&self) -> &[TimingPoint] {
        &self.points
    }

    /// Add a timing point, replacing the one at the same time if there is any.
    pub fn add(&mut self, point: TimingPoint) {
        let point = TimingPoint::new(point.time, point.beat_length);
        match self
            .points
            .binary_search_by_key(&point.time, |timing| timing.time)
        {
            Ok(i) => self.points[i] = point,
            Err(i) => self.points.insert(i, point),
        }
    }

    /// Returns the timing point in effect at the given time.
    /// Before the first point, the first point applies.
    pub fn get_timing(&self, time: Time) -> TimingPoint {
        let i = match self
            .points
            .binary_search_by_key(&time, |timing| timing.time)
        {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        self.points.get(i).copied().unwrap_or_default()
    }

    /// Snap the time to the closest `1 / divisor` of a beat,
    /// using the timing in effect at `reference`.
    pub fn snap_to_beat(&self, time: Time, reference: Time, divisor: BeatDivisor) -> Time {
        let timing = self.get_timing(reference);
        let snap_time = (timing.beat_length / divisor.as_r32()).as_f32();
        let delta = ((time.as_f32() - timing.time.as_f32()) / snap_time).round() * snap_time;
        saturating_r32(timing.time.as_f32() + delta)
    }
}
