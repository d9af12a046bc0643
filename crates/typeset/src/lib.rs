//! Typeset - lays out mathematical notation and emits drawing commands.
//!
//! This crate ties the workspace together:
//! - Notation parsing
//! - Layout (scale, size and position passes)
//! - Rendering to drawing commands
//! - SVG and JSON output

pub mod config;
pub mod pipeline;

pub use config::{OutputFormat, TypesetConfig};
pub use pipeline::{PipelineResult, PipelineStage, RenderPipeline};

pub use common::{FormulaError, FormulaResult};
pub use layout::{Expr, LayoutEngine};
pub use render::{CommandList, DrawCommand};

use common::geometry::Point;
use render::Painter;

/// Typeset version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lay out `expr` with its top-left corner at `(origin_x, origin_y)` and
/// return the drawing commands in emission order.
pub fn layout(
    expr: Expr,
    root_scale: f32,
    origin_x: f32,
    origin_y: f32,
) -> FormulaResult<CommandList> {
    let engine = LayoutEngine::new(root_scale, Point::new(origin_x, origin_y));
    let tree = engine.layout(expr)?;

    Painter::new().paint_to_list(&tree)
}

/// Parse `input` and lay it out with `config`.
pub fn typeset(input: &str, config: &TypesetConfig) -> FormulaResult<CommandList> {
    let expr = notation::parse(input)?;
    layout(expr, config.root_scale, config.origin.x, config.origin.y)
}
