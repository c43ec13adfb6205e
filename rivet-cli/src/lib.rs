#![warn(clippy::use_self)]

pub mod check;
pub mod config;
pub mod shell;

mod util;

pub use self::{shell::shell, util::is_error_silent};

#[cfg(feature = "cli")]
mod cli;

#[cfg(feature = "cli")]
pub use cli::run;
