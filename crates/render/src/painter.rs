//! Painter - emits drawing commands from a positioned tree.

use crate::commands::{CommandList, CommandSink, DrawCommand};
use common::error::{FormulaError, FormulaResult};
use common::geometry::Point;
use layout::metrics::{paren_padding, rule_thickness, stretch_factor};
use layout::{NodeKind, PositionedTree};

/// Walks a positioned tree in reading order.
///
/// Every variant emits in a fixed order: a fraction gives numerator, rule,
/// denominator; scripts give base, superscript, subscript; parentheses give
/// the left glyph, the child, the right glyph.
#[derive(Debug, Default)]
pub struct Painter {
    /// Commands emitted so far.
    emitted: usize,
}

impl Painter {
    pub fn new() -> Self {
        Self { emitted: 0 }
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Paint into an in-memory list.
    pub fn paint_to_list(&mut self, tree: &PositionedTree) -> FormulaResult<CommandList> {
        let mut list = CommandList::new();
        self.paint(tree, &mut list)?;
        Ok(list)
    }

    /// Paint the tree into `sink`. Sink errors are returned unchanged.
    ///
    /// A command with a non-finite coordinate fails with
    /// [`FormulaError::DegenerateGeometry`] before it reaches the sink.
    pub fn paint<S: CommandSink>(&mut self, tree: &PositionedTree, sink: &mut S) -> FormulaResult<()> {
        let origin = tree.origin();
        let scale = tree.scale();

        match tree.kind() {
            NodeKind::Character(c) => {
                self.emit(sink, DrawCommand::text(origin, scale, c.to_string()))?;
            }
            NodeKind::Concatenation { left, right } => {
                self.paint(left, sink)?;
                self.paint(right, sink)?;
            }
            NodeKind::Fraction {
                numerator,
                denominator,
            } => {
                self.paint(numerator, sink)?;
                let rule_y = tree.data().divider_y();
                let rule_width = numerator.width().max(denominator.width());
                self.emit(
                    sink,
                    DrawCommand::line(
                        Point::new(origin.x, rule_y),
                        Point::new(origin.x + rule_width, rule_y),
                        rule_thickness(scale),
                    ),
                )?;
                self.paint(denominator, sink)?;
            }
            NodeKind::SuperSubscript {
                base,
                superscript,
                subscript,
            } => {
                self.paint(base, sink)?;
                if let Some(sup) = superscript {
                    self.paint(sup, sink)?;
                }
                if let Some(sub) = subscript {
                    self.paint(sub, sink)?;
                }
            }
            NodeKind::Parenthesized(child) => {
                let stretch = stretch_factor(tree.divisions_included());
                // Centre the stretched glyph on the box.
                let glyph_y = origin.y + (tree.height() - scale * stretch) / 2.0;
                let right_x = origin.x + child.width() + paren_padding(scale);

                self.emit(
                    sink,
                    DrawCommand::stretched_text(Point::new(origin.x, glyph_y), scale, "(", stretch),
                )?;
                self.paint(child, sink)?;
                self.emit(
                    sink,
                    DrawCommand::stretched_text(Point::new(right_x, glyph_y), scale, ")", stretch),
                )?;
            }
        }
        Ok(())
    }

    fn emit<S: CommandSink>(&mut self, sink: &mut S, command: DrawCommand) -> FormulaResult<()> {
        if !command.is_finite() {
            tracing::warn!(?command, "refusing non-finite drawing command");
            return Err(FormulaError::degenerate(format!("{command:?}")));
        }
        sink.emit(command)?;
        self.emitted += 1;
        Ok(())
    }
}
