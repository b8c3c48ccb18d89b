use super::*;

/// Divides a single beat into equal placement units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(from = "u32", into = "u32")]
pub struct BeatDivisor(u32);

impl BeatDivisor {
    /// All divisors the editor supports, in increasing order.
    pub const VALID: [u32; 8] = [1, 2, 3, 4, 6, 8, 12, 16];

    pub const WHOLE: Self = Self(1);
    pub const HALF: Self = Self(2);
    pub const QUARTER: Self = Self(4);

    /// Returns the closest valid divisor, preferring the smaller one on ties.
    pub fn new(divisor: u32) -> Self {
        let closest = Self::VALID
            .into_iter()
            .min_by_key(|valid| valid.abs_diff(divisor))
            .unwrap_or(1);
        if closest != divisor {
            log::debug!(
                "Beat divisor {} is not supported, using {} instead",
                divisor,
                closest
            );
        }
        Self(closest)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn as_r32(&self) -> R32 {
        r32(self.0 as f32)
    }

    /// Returns the smallest valid divisor on which the beat with the given index lies.
    /// E.g. with divisor 4, index 2 lies on a half beat.
    pub fn divisor_for_beat_index(&self, index: i64) -> u32 {
        let divisor = i64::from(self.0);
        let beat = index.rem_euclid(divisor);
        Self::VALID
            .into_iter()
            .find(|&valid| (beat * i64::from(valid)) % divisor == 0)
            .unwrap_or(0)
    }

    /// The colour associated with beats lying on the given divisor.
    pub fn color_for(divisor: u32) -> Color {
        match divisor {
            1 => Rgba::new(1.0, 1.0, 1.0, 1.0),
            2 => Rgba::new(0.93, 0.2, 0.29, 1.0),
            4 => Rgba::new(0.4, 0.8, 1.0, 1.0),
            8 => Rgba::new(1.0, 0.8, 0.13, 1.0),
            16 => Rgba::new(0.46, 0.17, 0.53, 1.0),
            3 => Rgba::new(0.73, 0.53, 0.93, 1.0),
            6 => Rgba::new(0.8, 0.6, 0.13, 1.0),
            12 => Rgba::new(0.53, 0.4, 0.07, 1.0),
            _ => Rgba::new(1.0, 0.0, 0.0, 1.0),
        }
    }
}

impl Default for BeatDivisor {
    fn default() -> Self {
        Self::WHOLE
    }
}

impl From<u32> for BeatDivisor {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<BeatDivisor> for u32 {
    fn from(value: BeatDivisor) -> Self {
        value.0
    }
}

impl std::fmt::Display for BeatDivisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "1/{}", self.0)
    }
}
