//! Common utilities and types used across the typesetter.

pub mod geometry;
pub mod error;

pub use geometry::{Point, Size, Rect, Transform};
pub use error::{FormulaError, FormulaResult};
