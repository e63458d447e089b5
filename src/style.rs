//! Paint style carried by every shape

use crate::defaults;
use crate::types::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub stroke: Color,
    pub fill: Color,
    /// Whether the outline is filled after stroking
    pub filled: bool,
    pub line_width: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke: defaults::STROKE,
            fill: defaults::FILL,
            filled: false,
            line_width: defaults::LINE_WIDTH,
        }
    }
}

impl ShapeStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    pub fn filled(mut self, filled: bool) -> Self {
        self.filled = filled;
        self
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }
}
