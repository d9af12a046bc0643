//! Rendering for laid-out formulas.
//!
//! This crate handles:
//! - Drawing command generation from the positioned tree
//! - Command sinks (in-memory lists, JSON)
//! - SVG output

pub mod commands;
pub mod painter;
pub mod svg;

pub use commands::{CommandList, CommandSink, DrawCommand, DrawLineCommand, DrawTextCommand};
pub use painter::Painter;
pub use svg::{SvgDocument, SvgOptions, SvgWriter};
