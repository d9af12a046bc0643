//! Layout constants and the formulas shared by the size and position passes.
//!
//! All constants are ratios of the node's own scale (or, for script offsets,
//! of the base's height).

use common::geometry::Size;

/// Glyph box width per unit of scale. Glyph height equals the scale.
pub const GLYPH_WIDTH: f32 = 0.6;

/// Alignment line of a lone glyph, measured from its top.
pub const GLYPH_ALIGNMENT: f32 = 0.72;

/// Scale of superscripts and subscripts relative to their base.
pub const SCRIPT_SCALE: f32 = 0.7;

/// Vertical gap between numerator and denominator. The rule sits in the
/// middle of it.
pub const FRACTION_GAP: f32 = 0.3;

/// Stroke width of a fraction rule.
pub const RULE_THICKNESS: f32 = 0.06;

/// Horizontal space reserved for each parenthesis glyph.
pub const PAREN_PADDING: f32 = 0.6;

/// Vertical stretch added to a parenthesis per enclosed fraction.
pub const STRETCH_PER_DIVISION: f32 = 2.2;

/// Where the superscript's bottom edge sits, as a fraction of the base height
/// below the base's top. Must stay below one half.
pub const SUPERSCRIPT_DROP: f32 = 0.4;

/// Where the subscript's top edge sits, as a fraction of the base height below
/// the base's top. Must stay above one half.
pub const SUBSCRIPT_RISE: f32 = 0.7;

pub fn fraction_gap(scale: f32) -> f32 {
    scale * FRACTION_GAP
}

pub fn rule_thickness(scale: f32) -> f32 {
    scale * RULE_THICKNESS
}

pub fn paren_padding(scale: f32) -> f32 {
    scale * PAREN_PADDING
}

/// Vertical stretch of the parentheses around a subtree holding
/// `divisions_included` fractions.
pub fn stretch_factor(divisions_included: usize) -> f32 {
    if divisions_included == 0 {
        1.0
    } else {
        divisions_included as f32 * STRETCH_PER_DIVISION
    }
}

/// Vertical arrangement of a base and its scripts, relative to the top of
/// the enclosing box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScriptPlacement {
    /// Top of the base.
    pub base_top: f32,
    /// Distance the superscript's top sits above the base's top. Negative
    /// when a short superscript starts below it.
    pub super_offset: f32,
    /// Distance the subscript's top sits below the base's top.
    pub sub_offset: f32,
    /// Total height of the arrangement.
    pub height: f32,
}

impl ScriptPlacement {
    /// Arrange `base` and its optional scripts so that the superscript ends
    /// above the base's midline, the subscript starts below it, and the whole
    /// arrangement starts at zero.
    pub fn new(base: Size, superscript: Option<Size>, subscript: Option<Size>) -> Self {
        let super_offset = superscript
            .map(|sup| sup.height - base.height * SUPERSCRIPT_DROP)
            .unwrap_or(0.0);
        let base_top = if superscript.is_some() {
            super_offset.max(0.0)
        } else {
            0.0
        };
        let sub_offset = base.height * SUBSCRIPT_RISE;

        let base_bottom = base_top + base.height;
        let bottom = subscript
            .map(|sub| base_bottom.max(base_top + sub_offset + sub.height))
            .unwrap_or(base_bottom);

        Self {
            base_top,
            super_offset,
            sub_offset,
            height: bottom,
        }
    }

    pub fn superscript_top(&self) -> f32 {
        self.base_top - self.super_offset
    }

    pub fn subscript_top(&self) -> f32 {
        self.base_top + self.sub_offset
    }
}
