use super::*;

/// The placed object the distance snap grid radiates from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Anchor {
    /// Position of the object on the playfield.
    pub position: vec2<Coord>,
    /// The time at which the object starts.
    pub time: Time,
}

impl Anchor {
    pub fn new(position: vec2<Coord>, time: Time) -> Self {
        Self { position, time }
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self {
            position: vec2(r32(512.0), r32(384.0)),
            time: Time::ZERO,
        }
    }
}
