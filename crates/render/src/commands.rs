//! Drawing commands produced by the render pass.

use common::error::FormulaResult;
use common::geometry::Point;
use serde::Serialize;

/// A single drawing primitive with absolute coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Draw text.
    Text(DrawTextCommand),
    /// Draw a line.
    Line(DrawLineCommand),
}

/// Draw text command.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DrawTextCommand {
    /// Top-left corner of the glyph box.
    pub position: Point,
    pub font_size: f32,
    pub content: String,
    /// Vertical scale applied to the glyph; 1 for ordinary text.
    pub stretch: f32,
}

/// Draw line command.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DrawLineCommand {
    pub start: Point,
    pub end: Point,
    pub stroke_width: f32,
}

impl DrawLineCommand {
    pub fn length(&self) -> f32 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl DrawCommand {
    pub fn text(position: Point, font_size: f32, content: impl Into<String>) -> Self {
        Self::stretched_text(position, font_size, content, 1.0)
    }

    pub fn stretched_text(
        position: Point,
        font_size: f32,
        content: impl Into<String>,
        stretch: f32,
    ) -> Self {
        DrawCommand::Text(DrawTextCommand {
            position,
            font_size,
            content: content.into(),
            stretch,
        })
    }

    pub fn line(start: Point, end: Point, stroke_width: f32) -> Self {
        DrawCommand::Line(DrawLineCommand {
            start,
            end,
            stroke_width,
        })
    }

    /// Whether every coordinate and size in the command is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            DrawCommand::Text(text) => {
                text.position.is_finite() && text.font_size.is_finite() && text.stretch.is_finite()
            }
            DrawCommand::Line(line) => {
                line.start.is_finite() && line.end.is_finite() && line.stroke_width.is_finite()
            }
        }
    }

    pub fn as_text(&self) -> Option<&DrawTextCommand> {
        match self {
            DrawCommand::Text(text) => Some(text),
            DrawCommand::Line(_) => None,
        }
    }

    pub fn as_line(&self) -> Option<&DrawLineCommand> {
        match self {
            DrawCommand::Line(line) => Some(line),
            DrawCommand::Text(_) => None,
        }
    }
}

/// Receiver of drawing commands, in emission order.
pub trait CommandSink {
    fn emit(&mut self, command: DrawCommand) -> FormulaResult<()>;
}

/// In-memory command sequence.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }

    pub fn texts(&self) -> impl Iterator<Item = &DrawTextCommand> {
        self.commands.iter().filter_map(DrawCommand::as_text)
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawLineCommand> {
        self.commands.iter().filter_map(DrawCommand::as_line)
    }

    /// Replay every command into another sink.
    pub fn replay<S: CommandSink>(&self, sink: &mut S) -> FormulaResult<()> {
        for command in &self.commands {
            sink.emit(command.clone())?;
        }
        Ok(())
    }

    /// Serialize the sequence as pretty-printed JSON.
    pub fn to_json(&self) -> FormulaResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| common::FormulaError::serialize(e.to_string()))
    }
}

impl CommandSink for CommandList {
    fn emit(&mut self, command: DrawCommand) -> FormulaResult<()> {
        self.push(command);
        Ok(())
    }
}

impl IntoIterator for CommandList {
    type Item = DrawCommand;
    type IntoIter = std::vec::IntoIter<DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

impl<'a> IntoIterator for &'a CommandList {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_list() {
        let mut list = CommandList::new();
        assert!(list.is_empty());

        list.emit(DrawCommand::text(Point::ZERO, 1.0, "A")).unwrap();
        list.emit(DrawCommand::line(Point::new(0.0, 1.15), Point::new(0.6, 1.15), 0.06))
            .unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.texts().count(), 1);
        assert_eq!(list.lines().count(), 1);
    }

    #[test]
    fn test_line_length() {
        let line = DrawLineCommand {
            start: Point::new(1.0, 2.0),
            end: Point::new(4.0, 6.0),
            stroke_width: 0.2,
        };
        assert_eq!(line.length(), 5.0);
    }

    #[test]
    fn test_finite_commands() {
        assert!(DrawCommand::text(Point::new(1.0, 2.0), 1.0, "A").is_finite());
        assert!(!DrawCommand::text(Point::new(f32::INFINITY, 0.0), 1.0, "A").is_finite());
        assert!(!DrawCommand::stretched_text(Point::ZERO, 1.0, "(", f32::NAN).is_finite());
        assert!(!DrawCommand::line(Point::ZERO, Point::new(1.0, f32::NEG_INFINITY), 0.1).is_finite());
    }

    #[test]
    fn test_json_shape() {
        let mut list = CommandList::new();
        list.push(DrawCommand::text(Point::ZERO, 1.0, "A"));
        let json = list.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["kind"], "text");
        assert_eq!(value[0]["content"], "A");
        assert_eq!(value[0]["font_size"], 1.0);
    }

    #[test]
    fn test_replay() {
        let mut source = CommandList::new();
        source.push(DrawCommand::text(Point::ZERO, 1.0, "x"));
        let mut target = CommandList::new();
        source.replay(&mut target).unwrap();
        assert_eq!(source, target);
    }
}
