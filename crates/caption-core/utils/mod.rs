//! Shared utilities: error type and color parsing

mod color;
mod errors;

pub use color::Rgba;
pub use errors::{CoreError, Result};
