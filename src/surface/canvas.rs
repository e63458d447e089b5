//! Raster canvas: `kurbo` paths painted into a `tiny-skia` pixmap

use std::f64::consts::TAU;
use std::path::Path;

use kurbo::{Affine, BezPath, PathEl, Shape as _, Vec2};
use tiny_skia::{FillRule, Paint, Pixmap, Stroke};

use super::geometry::{arc_sweep, corner_arc};
use super::{DrawCommand, Surface};
use crate::defaults;
use crate::errors::SurfaceError;
use crate::log::{debug, warn};
use crate::transform::Transform;
use crate::types::{Color, Point};

/// State pushed by `save` and popped by `restore`
#[derive(Debug, Clone, Copy)]
struct CanvasState {
    transform: Transform,
    line_width: f64,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            line_width: defaults::LINE_WIDTH,
        }
    }
}

/// An in-memory raster surface.
///
/// The current path is kept in device space: every segment is mapped
/// through the transform in effect when it is added, so hit-tests see the
/// same geometry that was painted. With [`Canvas::with_command_log`] every
/// call is also appended to a [`DrawCommand`] log.
pub struct Canvas {
    pixmap: Pixmap,
    state: CanvasState,
    stack: Vec<CanvasState>,
    path: BezPath,
    /// Device-space current point
    current: Option<kurbo::Point>,
    /// Device-space start of the open subpath
    subpath_start: Option<kurbo::Point>,
    commands: Vec<DrawCommand>,
    recording: bool,
}

impl Canvas {
    /// A transparent canvas of `width` x `height` pixels
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap = Pixmap::new(width, height).ok_or(SurfaceError::InvalidSize { width, height })?;
        Ok(Self {
            pixmap,
            state: CanvasState::default(),
            stack: Vec::new(),
            path: BezPath::new(),
            current: None,
            subpath_start: None,
            commands: Vec::new(),
            recording: false,
        })
    }

    /// Keep a log of every call, readable through [`Canvas::commands`]
    pub fn with_command_log(mut self) -> Self {
        self.recording = true;
        self
    }

    pub fn set_recording(&mut self, recording: bool) {
        self.recording = recording;
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Every call recorded so far, oldest first
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Number of `save` calls not yet matched by `restore`
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    /// Fill every pixel with `color`
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
    }

    /// Read back a pixel (straight alpha)
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let px = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(px.red(), px.green(), px.blue(), px.alpha()))
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        self.pixmap.encode_png().map_err(|e| SurfaceError::Encode {
            message: e.to_string(),
        })
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), SurfaceError> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn record(&mut self, command: DrawCommand) {
        if self.recording {
            self.commands.push(command);
        }
    }

    fn affine(&self) -> Affine {
        let t = self.state.transform;
        Affine::new([t.a, t.b, t.c, t.d, t.e, t.f])
    }

    fn to_device(&self, p: Point) -> kurbo::Point {
        self.affine() * kurbo::Point::new(p.x, p.y)
    }

    fn start_subpath(&mut self, device: kurbo::Point) {
        self.path.move_to(device);
        self.current = Some(device);
        self.subpath_start = Some(device);
    }

    fn extend_to(&mut self, device: kurbo::Point) {
        match self.current {
            Some(_) => {
                self.path.line_to(device);
                self.current = Some(device);
            }
            None => self.start_subpath(device),
        }
    }

    /// Append a user-space circular arc, joined to the current point by a line
    fn push_arc(&mut self, center: kurbo::Point, radius: f64, start_angle: f64, sweep: f64) {
        let affine = self.affine();
        if radius <= 0.0 || sweep == 0.0 {
            let start = center + Vec2::new(radius * start_angle.cos(), radius * start_angle.sin());
            self.extend_to(affine * start);
            return;
        }
        let arc = kurbo::Arc {
            center,
            radii: Vec2::new(radius, radius),
            start_angle,
            sweep_angle: sweep,
            x_rotation: 0.0,
        };
        let mut elements: Vec<PathEl> = arc
            .path_elements(defaults::FLATTEN_TOLERANCE)
            .map(|el| transform_el(affine, el))
            .collect();
        let Some(start) = elements.first().and_then(PathEl::end_point) else {
            return;
        };
        // A full turn ends exactly where it began
        if sweep.abs() >= TAU {
            if let Some(PathEl::CurveTo(_, _, end)) = elements.last_mut() {
                *end = start;
            }
        }
        self.extend_to(start);
        for el in &elements[1..] {
            self.path.push(*el);
        }
        if let Some(end) = elements.last().and_then(PathEl::end_point) {
            self.current = Some(end);
        }
    }

    fn skia_paint(color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = true;
        paint
    }
}

impl Surface for Canvas {
    fn begin_path(&mut self) {
        self.record(DrawCommand::BeginPath);
        self.path = BezPath::new();
        self.current = None;
        self.subpath_start = None;
    }

    fn move_to(&mut self, p: Point) {
        self.record(DrawCommand::MoveTo(p));
        let device = self.to_device(p);
        self.start_subpath(device);
    }

    fn line_to(&mut self, p: Point) {
        self.record(DrawCommand::LineTo(p));
        let device = self.to_device(p);
        self.extend_to(device);
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64, anticlockwise: bool) {
        self.record(DrawCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            anticlockwise,
        });
        let sweep = arc_sweep(start_angle, end_angle, anticlockwise);
        self.push_arc(kurbo::Point::new(center.x, center.y), radius.max(0.0), start_angle, sweep);
    }

    fn arc_to(&mut self, p1: Point, p2: Point, radius: f64) {
        self.record(DrawCommand::ArcTo { p1, p2, radius });
        let Some(current) = self.current else {
            let device = self.to_device(p1);
            self.start_subpath(device);
            return;
        };
        let p0 = self.affine().inverse() * current;
        match corner_arc(
            glam::dvec2(p0.x, p0.y),
            p1.to_vec(),
            p2.to_vec(),
            radius.max(0.0),
        ) {
            Some(corner) => {
                self.push_arc(
                    kurbo::Point::new(corner.center.x, corner.center.y),
                    radius,
                    corner.start_angle,
                    corner.sweep,
                );
            }
            None => {
                let device = self.to_device(p1);
                self.extend_to(device);
            }
        }
    }

    fn bezier_curve_to(&mut self, c1: Point, c2: Point, end: Point) {
        self.record(DrawCommand::BezierCurveTo { c1, c2, end });
        if self.current.is_none() {
            let device = self.to_device(c1);
            self.start_subpath(device);
        }
        let (c1, c2, end) = (self.to_device(c1), self.to_device(c2), self.to_device(end));
        self.path.curve_to(c1, c2, end);
        self.current = Some(end);
    }

    fn rect(&mut self, origin: Point, width: f64, height: f64) {
        self.record(DrawCommand::Rect { origin, width, height });
        let corners = [
            Point::new(origin.x + width, origin.y),
            Point::new(origin.x + width, origin.y + height),
            Point::new(origin.x, origin.y + height),
        ];
        let start = self.to_device(origin);
        self.start_subpath(start);
        for corner in corners {
            let device = self.to_device(corner);
            self.path.line_to(device);
        }
        self.path.close_path();
        self.current = Some(start);
    }

    fn close_path(&mut self) {
        self.record(DrawCommand::ClosePath);
        if self.current.is_some() {
            self.path.close_path();
            self.current = self.subpath_start;
        }
    }

    fn stroke(&mut self, color: Color) {
        self.record(DrawCommand::Stroke(color));
        if color.is_transparent() {
            return;
        }
        let Some(path) = to_skia_path(&self.path) else {
            return;
        };
        let stroke = Stroke {
            width: self.state.line_width as f32,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &Self::skia_paint(color),
            &stroke,
            tiny_skia::Transform::identity(),
            None,
        );
    }

    fn fill(&mut self, color: Color) {
        self.record(DrawCommand::Fill(color));
        if color.is_transparent() {
            return;
        }
        let Some(path) = to_skia_path(&self.path) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &Self::skia_paint(color),
            FillRule::Winding,
            tiny_skia::Transform::identity(),
            None,
        );
    }

    fn set_line_width(&mut self, width: f64) {
        self.record(DrawCommand::SetLineWidth(width));
        // Non-positive and non-finite widths are ignored, as on an HTML canvas
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    fn transform(&mut self, t: &Transform) {
        self.record(DrawCommand::Transform(*t));
        self.state.transform = self.state.transform.then(t);
    }

    fn current_transform(&self) -> Transform {
        self.state.transform
    }

    fn is_point_in_path(&self, p: Point) -> bool {
        flattened(&close_subpaths(&self.path)).contains(kurbo::Point::new(p.x, p.y))
    }

    fn save(&mut self) {
        self.record(DrawCommand::Save);
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        self.record(DrawCommand::Restore);
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => {
                warn!("restore without matching save");
            }
        }
        debug!(depth = self.stack.len(), "canvas restore");
    }
}

fn transform_el(affine: Affine, el: PathEl) -> PathEl {
    match el {
        PathEl::MoveTo(p) => PathEl::MoveTo(affine * p),
        PathEl::LineTo(p) => PathEl::LineTo(affine * p),
        PathEl::QuadTo(p1, p2) => PathEl::QuadTo(affine * p1, affine * p2),
        PathEl::CurveTo(p1, p2, p3) => PathEl::CurveTo(affine * p1, affine * p2, affine * p3),
        PathEl::ClosePath => PathEl::ClosePath,
    }
}

/// Copy of `path` with every open subpath closed, matching fill semantics
fn close_subpaths(path: &BezPath) -> BezPath {
    let mut closed = BezPath::new();
    let mut open = false;
    for el in path.elements() {
        match el {
            PathEl::MoveTo(_) => {
                if open {
                    closed.close_path();
                }
                open = false;
            }
            PathEl::ClosePath => open = false,
            _ => open = true,
        }
        closed.push(*el);
    }
    if open {
        closed.close_path();
    }
    closed
}

/// Polyline copy of `path`.
///
/// Winding over straight segments is exact at shared vertices, where the
/// curve root solver can drop a crossing that lands on a segment endpoint.
fn flattened(path: &BezPath) -> BezPath {
    let mut lines = BezPath::new();
    kurbo::flatten(path, defaults::FLATTEN_TOLERANCE, |el| lines.push(el));
    lines
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32),
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}
