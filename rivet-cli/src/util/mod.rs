mod error;
mod fmt;

pub use self::{error::*, fmt::*};
