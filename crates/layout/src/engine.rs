//! Main layout engine.

use crate::box_model::{PositionedTree, SizedTree};
use crate::node::{Expr, MAX_DEPTH};
use crate::position::propagate_position;
use crate::scale::propagate_scale;
use crate::size::synthesize_sizes;
use common::error::{FormulaError, FormulaResult};
use common::geometry::Point;
use tracing::{debug, debug_span};

/// The layout engine.
///
/// Runs the scale, size and position passes in order over a whole tree. Each
/// pass finishes before the next begins.
#[derive(Clone, Copy, Debug)]
pub struct LayoutEngine {
    /// Scale given to the root node.
    pub root_scale: f32,
    /// Where the root's top-left corner is anchored.
    pub origin: Point,
}

impl LayoutEngine {
    pub fn new(root_scale: f32, origin: Point) -> Self {
        Self { root_scale, origin }
    }

    /// Set the root scale.
    pub fn with_scale(mut self, root_scale: f32) -> Self {
        self.root_scale = root_scale;
        self
    }

    /// Set the origin.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Reject parameters that would produce degenerate geometry.
    pub fn validate(&self) -> FormulaResult<()> {
        if !self.root_scale.is_finite() || self.root_scale <= 0.0 {
            return Err(FormulaError::InvalidScale(self.root_scale));
        }
        if !self.origin.is_finite() {
            return Err(FormulaError::InvalidOrigin {
                x: self.origin.x,
                y: self.origin.y,
            });
        }
        Ok(())
    }

    /// Lay out a parsed expression.
    ///
    /// Fails before any pass runs if the parameters are invalid or the tree is
    /// deeper than [`MAX_DEPTH`], and after the size or position pass if the
    /// geometry overflowed or collapsed.
    pub fn layout(&self, expr: Expr) -> FormulaResult<PositionedTree> {
        self.validate()?;
        let depth = expr.depth();
        if depth > MAX_DEPTH {
            return Err(FormulaError::TooDeep {
                depth,
                limit: MAX_DEPTH,
            });
        }

        let nodes = expr.node_count();
        let scaled = {
            let _span = debug_span!("propagate_scale", root_scale = self.root_scale).entered();
            propagate_scale(expr, self.root_scale)
        };
        let sized = {
            let _span = debug_span!("synthesize_sizes").entered();
            synthesize_sizes(scaled)
        };
        check_sizes(&sized)?;
        let positioned = {
            let _span =
                debug_span!("propagate_position", x = self.origin.x, y = self.origin.y).entered();
            propagate_position(sized, self.origin)
        };
        let bounds = positioned.bounds();
        if !bounds.right().is_finite() || !bounds.bottom().is_finite() {
            return Err(FormulaError::degenerate(format!(
                "box from ({}, {}) to ({}, {})",
                bounds.x,
                bounds.y,
                bounds.right(),
                bounds.bottom()
            )));
        }

        debug!(
            nodes,
            width = positioned.width(),
            height = positioned.height(),
            divisions = positioned.divisions_included(),
            "layout complete"
        );
        Ok(positioned)
    }
}

/// The root box must have a finite, non-empty size and a finite divider.
/// Descendant extents are bounded by the root's, so a finite root means
/// finite descendants.
fn check_sizes(tree: &SizedTree) -> FormulaResult<()> {
    let size = tree.size();
    let divider = tree.divider_offset();
    let finite = size.width.is_finite() && size.height.is_finite() && divider.is_finite();
    if !finite || size.width <= 0.0 || size.height <= 0.0 {
        return Err(FormulaError::degenerate(format!(
            "root box {}x{} with divider {} at scale {}",
            size.width,
            size.height,
            divider,
            tree.scale()
        )));
    }
    Ok(())
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(1.0, Point::ZERO)
    }
}
