pub mod grid;
pub mod model;
pub mod observe;
pub mod snap;
pub mod types;

pub mod prelude {
    pub use crate::{grid::*, model::*, observe::*, snap::*, types::*};

    pub use batbox_color::Rgba;
    pub use batbox_la::*;
    pub use batbox_num::*;
    pub use serde::{Deserialize, Serialize};

    pub type Color = Rgba<f32>;
}
