//! The rendering boundary.
//!
//! Shapes never paint pixels themselves; they describe paths and paint
//! requests through [`Surface`], a canvas-style immediate-mode API. The
//! transform and line width are shared state: anything that changes them
//! must bracket the change with [`Surface::save`] / [`Surface::restore`].
//!
//! [`Canvas`] is the in-crate implementation backed by `kurbo` paths and a
//! `tiny-skia` pixmap.

mod canvas;
mod geometry;

pub use canvas::Canvas;

use std::f64::consts::TAU;

use crate::transform::Transform;
use crate::types::{Color, Point};

/// Canvas-style drawing capability required by the shapes.
///
/// Path coordinates are in user space and are mapped through the current
/// transform as they are added. `is_point_in_path` takes a device-space
/// point.
pub trait Surface {
    /// Discard the current path
    fn begin_path(&mut self);

    fn move_to(&mut self, p: Point);

    fn line_to(&mut self, p: Point);

    /// Circular arc; angles in radians, measured clockwise on screen from +x
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64, anticlockwise: bool);

    /// Line toward `p1`, then an arc of `radius` tangent to `p1 -> p2`
    fn arc_to(&mut self, p1: Point, p2: Point, radius: f64);

    fn bezier_curve_to(&mut self, c1: Point, c2: Point, end: Point);

    /// Closed rectangle subpath
    fn rect(&mut self, origin: Point, width: f64, height: f64);

    fn close_path(&mut self);

    /// Stroke the current path with `color`
    fn stroke(&mut self, color: Color);

    /// Fill the current path with `color` (nonzero winding)
    fn fill(&mut self, color: Color);

    fn set_line_width(&mut self, width: f64);

    /// Compose `t` onto the current transform
    fn transform(&mut self, t: &Transform);

    fn current_transform(&self) -> Transform;

    /// Nonzero-winding containment test against the current path
    fn is_point_in_path(&self, p: Point) -> bool;

    /// Push transform and paint state
    fn save(&mut self);

    /// Pop transform and paint state; ignored when nothing was saved
    fn restore(&mut self);
}

/// One call made against a [`Canvas`], in order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    },
    ArcTo {
        p1: Point,
        p2: Point,
        radius: f64,
    },
    BezierCurveTo {
        c1: Point,
        c2: Point,
        end: Point,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
    },
    ClosePath,
    Stroke(Color),
    Fill(Color),
    SetLineWidth(f64),
    Transform(Transform),
    Save,
    Restore,
}

impl DrawCommand {
    pub fn name(&self) -> &'static str {
        match self {
            DrawCommand::BeginPath => "begin_path",
            DrawCommand::MoveTo(_) => "move_to",
            DrawCommand::LineTo(_) => "line_to",
            DrawCommand::Arc { .. } => "arc",
            DrawCommand::ArcTo { .. } => "arc_to",
            DrawCommand::BezierCurveTo { .. } => "bezier_curve_to",
            DrawCommand::Rect { .. } => "rect",
            DrawCommand::ClosePath => "close_path",
            DrawCommand::Stroke(_) => "stroke",
            DrawCommand::Fill(_) => "fill",
            DrawCommand::SetLineWidth(_) => "set_line_width",
            DrawCommand::Transform(_) => "transform",
            DrawCommand::Save => "save",
            DrawCommand::Restore => "restore",
        }
    }
}

/// Filled dot, used by debug overlays
pub fn draw_point(surface: &mut dyn Surface, center: Point, radius: f64, color: Color) {
    surface.begin_path();
    surface.arc(center, radius, 0.0, TAU, false);
    surface.fill(color);
}
