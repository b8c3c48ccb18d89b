mod anchor;
mod divisor;
mod timing;

pub use self::{anchor::*, divisor::*, timing::*};

use crate::prelude::*;
