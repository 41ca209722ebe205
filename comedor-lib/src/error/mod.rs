//! Error types

mod config;
mod dataset;
mod grid;
mod path;
mod session;

pub use config::*;
pub use dataset::*;
pub use grid::*;
pub use path::*;
pub use session::*;
