//! Typesetting configuration.

use common::geometry::Point;
use render::SvgOptions;

/// Output document format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Standalone SVG document.
    #[default]
    Svg,
    /// The drawing command sequence as JSON.
    Json,
}

/// Typesetting configuration.
#[derive(Clone, Debug)]
pub struct TypesetConfig {
    /// Scale of the root node; glyphs are this tall in layout units.
    pub root_scale: f32,
    /// Top-left corner of the formula in layout units.
    pub origin: Point,
    /// Layout units to SVG user units.
    pub document_scale: f32,
    /// Translation applied inside the document, in layout units.
    pub document_offset: Point,
    /// Font family for glyphs.
    pub font_family: String,
    /// Whether to draw axes and a unit grid.
    pub show_grid: bool,
    /// How far the grid extends from the origin.
    pub grid_extent: u32,
    /// Output format.
    pub format: OutputFormat,
}

impl TypesetConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for inspecting layouts: grid on, debug-friendly.
    pub fn debug() -> Self {
        Self {
            show_grid: true,
            ..Self::default()
        }
    }

    /// Set the root scale.
    pub fn with_scale(mut self, root_scale: f32) -> Self {
        self.root_scale = root_scale;
        self
    }

    /// Set the formula origin.
    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin = Point::new(x, y);
        self
    }

    /// Set the font family.
    pub fn with_font(mut self, font_family: &str) -> Self {
        self.font_family = font_family.to_string();
        self
    }

    /// Turn the grid on or off.
    pub fn with_grid(mut self, enabled: bool) -> Self {
        self.show_grid = enabled;
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// SVG document settings derived from this configuration.
    pub fn svg_options(&self) -> SvgOptions {
        SvgOptions {
            font_family: self.font_family.clone(),
            scale: self.document_scale,
            offset: self.document_offset,
            grid: self.show_grid.then_some(self.grid_extent),
        }
    }
}

impl Default for TypesetConfig {
    fn default() -> Self {
        Self {
            root_scale: 1.0,
            origin: Point::ZERO,
            document_scale: 40.0,
            document_offset: Point::new(10.0, 10.0),
            font_family: "Courier".to_string(),
            show_grid: false,
            grid_extent: 100,
            format: OutputFormat::Svg,
        }
    }
}
