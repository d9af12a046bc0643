//! Position pass: top-down assignment of absolute anchors.

use crate::box_model::{BoxMetrics, PlacedBox, PositionedTree, SizedTree};
use crate::metrics::{fraction_gap, paren_padding, ScriptPlacement};
use crate::node::{LayoutNode, NodeKind};
use common::geometry::Point;

/// Anchor the tree's top-left corner at `origin` and place every descendant
/// relative to its parent.
pub fn propagate_position(tree: SizedTree, origin: Point) -> PositionedTree {
    let (kind, metrics) = tree.into_parts();
    let Point { x, y } = origin;

    let kind = match kind {
        NodeKind::Character(c) => NodeKind::Character(c),
        NodeKind::Concatenation { left, right } => {
            // Shift each side down so both alignment lines meet the parent's.
            let left_y = y + metrics.divider_offset - left.divider_offset();
            let right_y = y + metrics.divider_offset - right.divider_offset();
            let right_x = x + left.width();
            NodeKind::Concatenation {
                left: Box::new(propagate_position(*left, Point::new(x, left_y))),
                right: Box::new(propagate_position(*right, Point::new(right_x, right_y))),
            }
        }
        NodeKind::Fraction {
            numerator,
            denominator,
        } => {
            let width = metrics.size.width;
            let gap = fraction_gap(metrics.scale);
            let numerator_origin = Point::new(x + (width - numerator.width()) / 2.0, y);
            let denominator_origin = Point::new(
                x + (width - denominator.width()) / 2.0,
                y + metrics.divider_offset + gap / 2.0,
            );
            NodeKind::Fraction {
                numerator: Box::new(propagate_position(*numerator, numerator_origin)),
                denominator: Box::new(propagate_position(*denominator, denominator_origin)),
            }
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
            let base_y = y + placement.base_top;
            let script_x = x + base.width();
            NodeKind::SuperSubscript {
                base: Box::new(propagate_position(*base, Point::new(x, base_y))),
                superscript: superscript.map(|s| {
                    let origin = Point::new(script_x, base_y - placement.super_offset);
                    Box::new(propagate_position(*s, origin))
                }),
                subscript: subscript.map(|s| {
                    let origin = Point::new(script_x, base_y + placement.sub_offset);
                    Box::new(propagate_position(*s, origin))
                }),
            }
        }
        NodeKind::Parenthesized(child) => {
            let child_origin = Point::new(x + paren_padding(metrics.scale), y);
            NodeKind::Parenthesized(Box::new(propagate_position(*child, child_origin)))
        }
    };

    LayoutNode::from_parts(kind, place(metrics, origin))
}

fn place(metrics: BoxMetrics, origin: Point) -> PlacedBox {
    PlacedBox { metrics, origin }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Expr;
    use crate::scale::propagate_scale;
    use crate::size::synthesize_sizes;

    fn ch(c: char) -> Expr {
        Expr::character(c)
    }

    fn positioned(expr: Expr) -> PositionedTree {
        propagate_position(synthesize_sizes(propagate_scale(expr, 1.0)), Point::ZERO)
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_leaf_anchor() {
        let tree = propagate_position(
            synthesize_sizes(propagate_scale(ch('A'), 1.0)),
            Point::new(3.0, 4.0),
        );
        assert_eq!(tree.origin(), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_concatenation_left_to_right() {
        let tree = positioned(Expr::concat(ch('a'), ch('b')));
        let children = tree.children();
        assert_eq!(children[0].origin(), Point::ZERO);
        assert!(close(children[1].origin().x, 0.6));
        assert_eq!(children[1].origin().y, 0.0);
    }

    #[test]
    fn test_concatenation_aligns_rules() {
        let tree = positioned(Expr::concat(
            Expr::fraction(ch('a'), ch('b')),
            Expr::fraction(Expr::fraction(ch('c'), ch('d')), ch('e')),
        ));
        let children = tree.children();
        let left_rule = children[0].data().divider_y();
        let right_rule = children[1].data().divider_y();
        assert!(close(left_rule, right_rule));
        assert!(close(left_rule, tree.data().divider_y()));
    }

    #[test]
    fn test_character_aligns_with_fraction() {
        let tree = positioned(Expr::concat(ch('x'), Expr::fraction(ch('a'), ch('b'))));
        let children = tree.children();
        // glyph drops so its alignment line meets the rule
        assert!(close(children[0].origin().y, 1.15 - 0.72));
        assert_eq!(children[1].origin().y, 0.0);
    }

    #[test]
    fn test_fraction_centers_children() {
        let tree = positioned(Expr::fraction(Expr::text("ab").unwrap(), ch('c')));
        let children = tree.children();
        assert_eq!(children[0].origin(), Point::ZERO);
        assert!(close(children[1].origin().x, 0.3));
        assert!(close(children[1].origin().y, 1.3));

        let numerator_bottom = children[0].bounds().bottom();
        let denominator_top = children[1].origin().y;
        let rule_y = tree.data().divider_y();
        assert!(numerator_bottom < rule_y && rule_y < denominator_top);
    }

    #[test]
    fn test_scripts_right_of_base() {
        let tree = positioned(Expr::scripts(ch('A'), Some(ch('B')), Some(ch('C'))));
        let children = tree.children();
        let (base, sup, sub) = (children[0], children[1], children[2]);

        assert!(close(base.origin().y, 0.3));
        assert_eq!(base.origin().x, 0.0);
        assert!(close(sup.origin().x, 0.6));
        assert!(close(sub.origin().x, 0.6));

        let midline = base.bounds().center().y;
        assert!(sup.bounds().bottom() < midline);
        assert!(sub.origin().y > midline);
        assert!(!sup.bounds().intersects(&sub.bounds()));
        assert!(!sup.bounds().intersects(&base.bounds()));
        assert!(!sub.bounds().intersects(&base.bounds()));
    }

    #[test]
    fn test_scripts_stay_inside_box() {
        let tree = positioned(Expr::scripts(
            ch('A'),
            Some(Expr::fraction(ch('x'), ch('y'))),
            Some(ch('i')),
        ));
        let bounds = tree.bounds();
        for child in tree.children() {
            let b = child.bounds();
            assert!(b.y >= bounds.y - 1e-5);
            assert!(b.bottom() <= bounds.bottom() + 1e-5);
            assert!(b.right() <= bounds.right() + 1e-5);
        }
    }

    #[test]
    fn test_parenthesized_child_is_padded() {
        let tree = positioned(Expr::parenthesized(ch('x')));
        let child = tree.children()[0];
        assert!(close(child.origin().x, 0.6));
        assert_eq!(child.origin().y, 0.0);
    }
}
