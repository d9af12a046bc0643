//! Size pass: bottom-up synthesis of box sizes and alignment lines.

use crate::box_model::{BoxMetrics, Scaled, ScaledTree, SizedTree};
use crate::metrics::{
    fraction_gap, paren_padding, ScriptPlacement, GLYPH_ALIGNMENT, GLYPH_WIDTH,
};
use crate::node::{LayoutNode, NodeKind};
use common::geometry::Size;

/// Compute every node's width, height and divider offset from its children
/// and its own scale.
pub fn synthesize_sizes(tree: ScaledTree) -> SizedTree {
    let (kind, Scaled {
        scale,
        divisions_included,
    }) = tree.into_parts();

    let kind = match kind {
        NodeKind::Character(c) => NodeKind::Character(c),
        NodeKind::Concatenation { left, right } => NodeKind::Concatenation {
            left: Box::new(synthesize_sizes(*left)),
            right: Box::new(synthesize_sizes(*right)),
        },
        NodeKind::Fraction {
            numerator,
            denominator,
        } => NodeKind::Fraction {
            numerator: Box::new(synthesize_sizes(*numerator)),
            denominator: Box::new(synthesize_sizes(*denominator)),
        },
        NodeKind::SuperSubscript {
            base,
            superscript,
            subscript,
        } => NodeKind::SuperSubscript {
            base: Box::new(synthesize_sizes(*base)),
            superscript: superscript.map(|s| Box::new(synthesize_sizes(*s))),
            subscript: subscript.map(|s| Box::new(synthesize_sizes(*s))),
        },
        NodeKind::Parenthesized(child) => {
            NodeKind::Parenthesized(Box::new(synthesize_sizes(*child)))
        }
    };

    let (size, divider_offset) = measure(&kind, scale);
    LayoutNode::from_parts(
        kind,
        BoxMetrics {
            scale,
            divisions_included,
            size,
            divider_offset,
        },
    )
}

/// Size and divider offset of a node whose children are already sized.
fn measure(kind: &NodeKind<BoxMetrics>, scale: f32) -> (Size, f32) {
    match kind {
        NodeKind::Character(_) => (
            Size::new(scale * GLYPH_WIDTH, scale),
            scale * GLYPH_ALIGNMENT,
        ),
        NodeKind::Concatenation { left, right } => (
            Size::new(
                left.width() + right.width(),
                left.height().max(right.height()),
            ),
            left.divider_offset().max(right.divider_offset()),
        ),
        NodeKind::Fraction {
            numerator,
            denominator,
        } => {
            let gap = fraction_gap(scale);
            (
                Size::new(
                    numerator.width().max(denominator.width()),
                    numerator.height() + denominator.height() + gap,
                ),
                numerator.height() + gap / 2.0,
            )
        }
        NodeKind::SuperSubscript {
            base,
            superscript,
            subscript,
        } => {
            let placement = ScriptPlacement::new(
                base.size(),
                superscript.as_ref().map(|s| s.size()),
                subscript.as_ref().map(|s| s.size()),
            );
            let script_width = superscript
                .as_ref()
                .map_or(0.0, |s| s.width())
                .max(subscript.as_ref().map_or(0.0, |s| s.width()));
            (
                Size::new(base.width() + script_width, placement.height),
                base.divider_offset() + placement.base_top,
            )
        }
        NodeKind::Parenthesized(child) => (
            Size::new(child.width() + 2.0 * paren_padding(scale), child.height()),
            child.divider_offset(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::PAREN_PADDING;
    use crate::node::Expr;
    use crate::scale::propagate_scale;

    fn ch(c: char) -> Expr {
        Expr::character(c)
    }

    fn sized(expr: Expr, scale: f32) -> SizedTree {
        synthesize_sizes(propagate_scale(expr, scale))
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_character_box() {
        let tree = sized(ch('A'), 1.0);
        assert!(close(tree.width(), 0.6));
        assert_eq!(tree.height(), 1.0);

        let tree = sized(ch('A'), 10.0);
        assert!(close(tree.width(), 6.0));
        assert_eq!(tree.height(), 10.0);
    }

    #[test]
    fn test_concatenation_box() {
        let left = Expr::fraction(ch('a'), ch('b'));
        let tree = sized(Expr::concat(left, ch('c')), 1.0);
        let children = tree.children();
        assert!(close(tree.width(), children[0].width() + children[1].width()));
        assert!(close(
            tree.height(),
            children[0].height().max(children[1].height())
        ));
        assert!(close(tree.divider_offset(), children[0].divider_offset()));
    }

    #[test]
    fn test_fraction_box() {
        let tree = sized(Expr::fraction(Expr::text("ab").unwrap(), ch('c')), 1.0);
        let children = tree.children();
        let gap = fraction_gap(1.0);
        assert!(gap > 0.0);
        assert!(close(tree.width(), 1.2));
        assert!(close(
            tree.height(),
            children[0].height() + children[1].height() + gap
        ));
        assert!(close(tree.divider_offset(), children[0].height() + gap / 2.0));
        assert_eq!(tree.divisions_included(), 1);
    }

    #[test]
    fn test_super_subscript_box() {
        let tree = sized(Expr::scripts(ch('A'), Some(ch('B')), Some(ch('C'))), 1.0);
        assert!(close(tree.width(), 0.6 + 0.42));
        // superscript lifts the base by 0.3, subscript hangs 0.7 below it
        assert!(close(tree.height(), 0.3 + 0.7 + 0.7));
        assert!(close(tree.divider_offset(), 0.3 + 0.72));
    }

    #[test]
    fn test_missing_scripts_contribute_nothing() {
        let sup = sized(Expr::superscript(ch('A'), ch('B')), 1.0);
        assert!(close(sup.width(), 1.02));
        assert!(close(sup.height(), 1.3));

        let sub = sized(Expr::subscript(ch('A'), ch('C')), 1.0);
        assert!(close(sub.width(), 1.02));
        assert!(close(sub.height(), 1.4));
        assert!(close(sub.divider_offset(), 0.72));
    }

    #[test]
    fn test_parenthesized_box() {
        let tree = sized(Expr::parenthesized(Expr::fraction(ch('A'), ch('B'))), 1.0);
        let child = tree.children()[0];
        assert!(close(tree.width(), child.width() + 2.0 * PAREN_PADDING));
        assert_eq!(tree.height(), child.height());
        assert_eq!(tree.divisions_included(), 1);
    }
}
