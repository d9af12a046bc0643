//! Per-stage box data.

use crate::node::LayoutNode;
use common::geometry::{Point, Rect, Size};

/// Output of the scale pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scaled {
    /// Local font-size unit.
    pub scale: f32,
    /// Number of `Fraction` nodes in the subtree.
    pub divisions_included: usize,
}

/// Output of the size pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxMetrics {
    pub scale: f32,
    pub divisions_included: usize,
    pub size: Size,
    /// Distance from the top of the box to the alignment line: the rule of a
    /// fraction, or the equivalent datum carried up through other operators.
    pub divider_offset: f32,
}

/// Output of the position pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedBox {
    pub metrics: BoxMetrics,
    /// Absolute top-left anchor.
    pub origin: Point,
}

impl PlacedBox {
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.metrics.size)
    }

    /// Absolute y of the alignment line.
    pub fn divider_y(&self) -> f32 {
        self.origin.y + self.metrics.divider_offset
    }
}

pub type ScaledTree = LayoutNode<Scaled>;
pub type SizedTree = LayoutNode<BoxMetrics>;
pub type PositionedTree = LayoutNode<PlacedBox>;

impl LayoutNode<Scaled> {
    pub fn scale(&self) -> f32 {
        self.data().scale
    }

    pub fn divisions_included(&self) -> usize {
        self.data().divisions_included
    }
}

impl LayoutNode<BoxMetrics> {
    pub fn scale(&self) -> f32 {
        self.data().scale
    }

    pub fn divisions_included(&self) -> usize {
        self.data().divisions_included
    }

    pub fn size(&self) -> Size {
        self.data().size
    }

    pub fn width(&self) -> f32 {
        self.data().size.width
    }

    pub fn height(&self) -> f32 {
        self.data().size.height
    }

    pub fn divider_offset(&self) -> f32 {
        self.data().divider_offset
    }
}

impl LayoutNode<PlacedBox> {
    pub fn scale(&self) -> f32 {
        self.data().metrics.scale
    }

    pub fn divisions_included(&self) -> usize {
        self.data().metrics.divisions_included
    }

    pub fn size(&self) -> Size {
        self.data().metrics.size
    }

    pub fn width(&self) -> f32 {
        self.data().metrics.size.width
    }

    pub fn height(&self) -> f32 {
        self.data().metrics.size.height
    }

    pub fn divider_offset(&self) -> f32 {
        self.data().metrics.divider_offset
    }

    pub fn origin(&self) -> Point {
        self.data().origin
    }

    pub fn bounds(&self) -> Rect {
        self.data().bounds()
    }

    /// Indented outline of the subtree with its boxes, one node per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, indent: usize) {
        let b = self.bounds();
        out.push_str(&format!(
            "{:indent$}{} {:?} scale={} at=({}, {}) size={}x{} divider={}\n",
            "",
            self.kind_name(),
            self.value(),
            self.scale(),
            b.x,
            b.y,
            b.width,
            b.height,
            self.divider_offset(),
            indent = indent * 2,
        ));
        for child in self.children() {
            child.dump_into(out, indent + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placed_box_bounds() {
        let placed = PlacedBox {
            metrics: BoxMetrics {
                scale: 1.0,
                divisions_included: 0,
                size: Size::new(0.6, 1.0),
                divider_offset: 0.72,
            },
            origin: Point::new(2.0, 3.0),
        };
        assert_eq!(placed.bounds(), Rect::new(2.0, 3.0, 0.6, 1.0));
        assert!((placed.divider_y() - 3.72).abs() < 1e-6);
    }
}
