//! Expression layout engine.
//!
//! A parsed [`Expr`] goes through three geometric passes, each producing a
//! tree of the next stage type:
//!
//! - [`propagate_scale`]: `Expr` to [`ScaledTree`], top-down
//! - [`synthesize_sizes`]: [`ScaledTree`] to [`SizedTree`], bottom-up
//! - [`propagate_position`]: [`SizedTree`] to [`PositionedTree`], top-down
//!
//! [`LayoutEngine`] runs all three in order.

pub mod node;
pub mod box_model;
pub mod metrics;
pub mod scale;
pub mod size;
pub mod position;
pub mod engine;

pub use node::{Expr, LayoutNode, NodeKind, Unscaled, MAX_DEPTH};
pub use box_model::{BoxMetrics, PlacedBox, PositionedTree, Scaled, ScaledTree, SizedTree};
pub use scale::propagate_scale;
pub use size::synthesize_sizes;
pub use position::propagate_position;
pub use engine::LayoutEngine;
