//! Utility types and helper functions

mod errors;
mod math;

pub use errors::RenderError;
pub use math::{interpolate, lerp, WordTransform};
