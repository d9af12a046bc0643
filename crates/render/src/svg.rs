//! SVG output.
//!
//! [`SvgWriter`] is a [`CommandSink`] that streams each command as an SVG
//! element, wrapped in a document header and footer.

use crate::commands::{CommandList, CommandSink, DrawCommand, DrawLineCommand, DrawTextCommand};
use common::error::{FormulaError, FormulaResult};
use common::geometry::{Point, Transform};
use std::io::Write;

/// Document-level settings.
#[derive(Clone, Debug)]
pub struct SvgOptions {
    /// Font family for every glyph.
    pub font_family: String,
    /// Uniform scale from layout units to SVG user units.
    pub scale: f32,
    /// Translation applied before scaling, in layout units.
    pub offset: Point,
    /// Draw axes and a unit grid out to this many units.
    pub grid: Option<u32>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            font_family: "Courier".to_string(),
            scale: 40.0,
            offset: Point::new(10.0, 10.0),
            grid: None,
        }
    }
}

impl SvgOptions {
    pub fn with_font(mut self, font_family: &str) -> Self {
        self.font_family = font_family.to_string();
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_grid(mut self, extent: u32) -> Self {
        self.grid = Some(extent);
        self
    }
}

/// Streams drawing commands as SVG elements.
pub struct SvgWriter<W: Write> {
    out: W,
    options: SvgOptions,
    elements: usize,
}

impl<W: Write> SvgWriter<W> {
    pub fn new(out: W, options: SvgOptions) -> Self {
        Self {
            out,
            options,
            elements: 0,
        }
    }

    /// Number of drawing elements written so far (grid lines excluded).
    pub fn elements(&self) -> usize {
        self.elements
    }

    /// Write the XML declaration, the root element and the transform group.
    pub fn begin(&mut self) -> FormulaResult<()> {
        let SvgOptions {
            font_family,
            scale,
            offset,
            grid,
        } = &self.options;

        writeln!(self.out, r#"<?xml version="1.0"?>"#)?;
        writeln!(
            self.out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1">"#
        )?;
        writeln!(
            self.out,
            r#"<g transform="scale({}) translate({},{})" font-family="{}">"#,
            scale,
            offset.x,
            offset.y,
            escape_attribute(font_family)
        )?;

        if let Some(extent) = *grid {
            self.write_grid(extent)?;
        }
        Ok(())
    }

    fn write_grid(&mut self, extent: u32) -> FormulaResult<()> {
        let e = extent as i64;
        writeln!(
            self.out,
            r#"<line x1="{}" y1="0" x2="{}" y2="0" stroke-width="0.02" stroke="black"/>"#,
            -e, e
        )?;
        writeln!(
            self.out,
            r#"<line x1="0" y1="{}" x2="0" y2="{}" stroke-width="0.02" stroke="black"/>"#,
            -e, e
        )?;
        for i in 1..=e {
            writeln!(
                self.out,
                r#"<line x1="{i}" y1="{}" x2="{i}" y2="{}" stroke-width="0.01" stroke="black"/>"#,
                -e, e
            )?;
            writeln!(
                self.out,
                r#"<line x1="{}" y1="{i}" x2="{}" y2="{i}" stroke-width="0.01" stroke="black"/>"#,
                -e, e
            )?;
        }
        Ok(())
    }

    fn write_text(&mut self, text: &DrawTextCommand) -> FormulaResult<()> {
        let baseline = text.position.y + text.font_size * text.stretch;
        let content = escape_text(&text.content);

        if (text.stretch - 1.0).abs() < f32::EPSILON {
            writeln!(
                self.out,
                r#"<text x="{}" y="{}" font-size="{}">{}</text>"#,
                text.position.x, baseline, text.font_size, content
            )?;
        } else {
            let t = Transform::scale(1.0, text.stretch)
                .then(&Transform::translation(text.position.x, baseline));
            writeln!(
                self.out,
                r#"<text x="0" y="0" font-size="{}" transform="matrix({},{},{},{},{},{})">{}</text>"#,
                text.font_size, t.m11, t.m12, t.m21, t.m22, t.m31, t.m32, content
            )?;
        }
        Ok(())
    }

    fn write_line(&mut self, line: &DrawLineCommand) -> FormulaResult<()> {
        writeln!(
            self.out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{}" stroke="black"/>"#,
            line.start.x, line.start.y, line.end.x, line.end.y, line.stroke_width
        )?;
        Ok(())
    }

    /// Close the group and the document, flush, and hand back the writer.
    pub fn finish(mut self) -> FormulaResult<W> {
        writeln!(self.out, "</g>")?;
        writeln!(self.out, "</svg>")?;
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> CommandSink for SvgWriter<W> {
    fn emit(&mut self, command: DrawCommand) -> FormulaResult<()> {
        match &command {
            DrawCommand::Text(text) => self.write_text(text)?,
            DrawCommand::Line(line) => self.write_line(line)?,
        }
        self.elements += 1;
        Ok(())
    }
}

/// A complete SVG document around a command sequence.
#[derive(Clone, Debug, Default)]
pub struct SvgDocument {
    options: SvgOptions,
}

impl SvgDocument {
    pub fn new(options: SvgOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SvgOptions {
        &self.options
    }

    /// Write the document for `commands` to `out` and return `out`.
    pub fn write_to<W: Write>(&self, commands: &CommandList, out: W) -> FormulaResult<W> {
        let mut writer = SvgWriter::new(out, self.options.clone());
        writer.begin()?;
        commands.replay(&mut writer)?;
        writer.finish()
    }

    /// Render the document as a string.
    pub fn render(&self, commands: &CommandList) -> FormulaResult<String> {
        let bytes = self.write_to(commands, Vec::new())?;
        String::from_utf8(bytes).map_err(|e| FormulaError::internal(e.to_string()))
    }
}

/// Escape text content.
pub fn escape_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape an attribute value.
pub fn escape_attribute(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(commands: &CommandList, options: SvgOptions) -> String {
        SvgDocument::new(options).render(commands).unwrap()
    }

    #[test]
    fn test_header_and_footer() {
        let svg = document(&CommandList::new(), SvgOptions::default());
        assert!(svg.starts_with("<?xml version=\"1.0\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains(r#"<g transform="scale(40) translate(10,10)" font-family="Courier">"#));
        assert!(svg.ends_with("</g>\n</svg>\n"));
    }

    #[test]
    fn test_text_baseline() {
        let mut list = CommandList::new();
        list.push(DrawCommand::text(Point::new(1.0, 2.0), 1.0, "A"));
        let svg = document(&list, SvgOptions::default());
        assert!(svg.contains(r#"<text x="1" y="3" font-size="1">A</text>"#));
    }

    #[test]
    fn test_stretched_text_uses_matrix() {
        let mut list = CommandList::new();
        list.push(DrawCommand::stretched_text(Point::new(0.0, 0.0), 1.0, "(", 2.0));
        let svg = document(&list, SvgOptions::default());
        assert!(svg.contains(r#"transform="matrix(1,0,0,2,0,2)">(</text>"#));
    }

    #[test]
    fn test_line_element() {
        let mut list = CommandList::new();
        list.push(DrawCommand::line(Point::new(0.0, 1.5), Point::new(2.0, 1.5), 0.5));
        let svg = document(&list, SvgOptions::default());
        assert!(svg.contains(
            r#"<line x1="0" y1="1.5" x2="2" y2="1.5" stroke-width="0.5" stroke="black"/>"#
        ));
    }

    #[test]
    fn test_content_is_escaped() {
        let mut list = CommandList::new();
        list.push(DrawCommand::text(Point::ZERO, 1.0, "<"));
        let svg = document(&list, SvgOptions::default().with_font("A&B"));
        assert!(svg.contains(">&lt;</text>"));
        assert!(svg.contains(r#"font-family="A&amp;B""#));
    }

    #[test]
    fn test_grid() {
        let svg = document(&CommandList::new(), SvgOptions::default().with_grid(2));
        // two axes plus two lines per unit
        assert_eq!(svg.matches("<line").count(), 2 + 2 * 2);
        assert!(svg.contains(r#"<line x1="-2" y1="0" x2="2" y2="0""#));
    }

    #[test]
    fn test_element_count() {
        let mut list = CommandList::new();
        list.push(DrawCommand::text(Point::ZERO, 1.0, "a"));
        list.push(DrawCommand::text(Point::ZERO, 1.0, "b"));
        let mut writer = SvgWriter::new(Vec::new(), SvgOptions::default().with_grid(1));
        writer.begin().unwrap();
        list.replay(&mut writer).unwrap();
        assert_eq!(writer.elements(), 2);
    }
}
