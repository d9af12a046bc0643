//! Scale pass: top-down assignment of each node's font-size unit.

use crate::box_model::{Scaled, ScaledTree};
use crate::metrics::SCRIPT_SCALE;
use crate::node::{Expr, LayoutNode, NodeKind};

/// Give every node its scale, starting from `scale` at the root.
///
/// Scripts get [`SCRIPT_SCALE`] times their parent's scale; every other child
/// inherits it unchanged. Also counts the fractions in every subtree.
pub fn propagate_scale(expr: Expr, scale: f32) -> ScaledTree {
    let (kind, _) = expr.into_parts();

    let kind = match kind {
        NodeKind::Character(c) => NodeKind::Character(c),
        NodeKind::Concatenation { left, right } => NodeKind::Concatenation {
            left: Box::new(propagate_scale(*left, scale)),
            right: Box::new(propagate_scale(*right, scale)),
        },
        NodeKind::Fraction {
            numerator,
            denominator,
        } => NodeKind::Fraction {
            numerator: Box::new(propagate_scale(*numerator, scale)),
            denominator: Box::new(propagate_scale(*denominator, scale)),
        },
        NodeKind::SuperSubscript {
            base,
            superscript,
            subscript,
        } => {
            let script_scale = scale * SCRIPT_SCALE;
            NodeKind::SuperSubscript {
                base: Box::new(propagate_scale(*base, scale)),
                superscript: superscript.map(|s| Box::new(propagate_scale(*s, script_scale))),
                subscript: subscript.map(|s| Box::new(propagate_scale(*s, script_scale))),
            }
        }
        NodeKind::Parenthesized(child) => {
            NodeKind::Parenthesized(Box::new(propagate_scale(*child, scale)))
        }
    };

    let divisions_included = divisions_of(&kind);
    LayoutNode::from_parts(
        kind,
        Scaled {
            scale,
            divisions_included,
        },
    )
}

fn divisions_of(kind: &NodeKind<Scaled>) -> usize {
    match kind {
        NodeKind::Character(_) => 0,
        NodeKind::Concatenation { left, right } => {
            left.divisions_included() + right.divisions_included()
        }
        NodeKind::Fraction {
            numerator,
            denominator,
        } => 1 + numerator.divisions_included() + denominator.divisions_included(),
        NodeKind::SuperSubscript {
            base,
            superscript,
            subscript,
        } => {
            base.divisions_included()
                + superscript.as_ref().map_or(0, |s| s.divisions_included())
                + subscript.as_ref().map_or(0, |s| s.divisions_included())
        }
        NodeKind::Parenthesized(child) => child.divisions_included(),
    }
}
