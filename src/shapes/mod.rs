//! Editable shapes
//!
//! Every shape is its own type that knows how to:
//! - Describe its painted outline and its hit region
//! - Recompute its derived center after a mutation
//! - Draw itself rotated about its own center
//!
//! The shared editing protocol (drag offsets, control-point picking,
//! bounding boxes, the control-point overlay) lives in [`ShapeCore`] and the
//! provided methods of [`Shape`].

mod bezier;
mod circle;
mod line;
mod polygon;
mod round_rect;

pub use bezier::BezierCurve;
pub use circle::Circle;
pub use line::Line;
pub use polygon::Polygon;
pub use round_rect::{ArcControl, RoundRect, RoundRectControls};

use std::f64::consts::TAU;

use enum_dispatch::enum_dispatch;

use crate::defaults;
use crate::log::{debug, warn};
use crate::style::ShapeStyle;
use crate::surface::Surface;
use crate::transform::{Transform, apply_transform};
use crate::types::{BBox, Offset, Point, RectInfo};

/// Which variant a shape is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Line,
    Circle,
    Polygon,
    RoundRect,
    BezierCurve,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Circle => "circle",
            ShapeKind::Polygon => "polygon",
            ShapeKind::RoundRect => "round_rect",
            ShapeKind::BezierCurve => "bezier_curve",
        }
    }
}

/// Where a shape is in a pointer gesture.
///
/// Rotation is not a state: `Shape::rotate` starts and finishes within one
/// call.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Whole-shape drag; one offset per anchor captured at pointer-down
    Moving { offsets: Vec<Offset> },
    /// Single control-point drag
    Editing { index: usize },
}

/// State and operations shared by every shape
#[derive(Debug, Clone)]
pub struct ShapeCore {
    pub(crate) style: ShapeStyle,
    /// Last rotation angle, radians
    pub(crate) angle: f64,
    pub(crate) points: Vec<Point>,
    pub(crate) pick_radius: f64,
    pub(crate) editing: bool,
    pub(crate) debug_overlay: bool,
    pub(crate) center: Point,
    pub(crate) radius: f64,
    pub(crate) gesture: Gesture,
    pub(crate) rotated: bool,
    /// Shape-local transform captured by the last `rotate`
    pub(crate) transform: Option<Transform>,
}

impl ShapeCore {
    pub(crate) fn new(points: Vec<Point>) -> Self {
        Self {
            style: ShapeStyle::default(),
            angle: 0.0,
            points,
            pick_radius: defaults::PICK_RADIUS,
            editing: false,
            debug_overlay: false,
            center: Point::ORIGIN,
            radius: 0.0,
            gesture: Gesture::Idle,
            rotated: false,
            transform: None,
        }
    }

    /// Remember where every point sits relative to the pointer
    pub(crate) fn capture_offsets(&mut self, loc: Point) {
        let offsets = self.points.iter().map(|p| loc - *p).collect();
        self.gesture = Gesture::Moving { offsets };
    }

    /// Move every point so it keeps its captured offset from `loc`.
    /// Returns false (and changes nothing) outside a whole-shape drag.
    pub(crate) fn translate_to(&mut self, loc: Point) -> bool {
        let Gesture::Moving { offsets } = &self.gesture else {
            contract_fault("apply_move");
            return false;
        };
        for (point, offset) in self.points.iter_mut().zip(offsets) {
            point.set_position(loc - *offset);
        }
        true
    }

    /// Move the dragged point to `loc`.
    /// Returns false (and changes nothing) outside a point drag.
    pub(crate) fn move_dragged(&mut self, loc: Point) -> bool {
        let Gesture::Editing { index } = self.gesture else {
            contract_fault("apply_point_edit");
            return false;
        };
        match self.points.get_mut(index) {
            Some(point) => {
                point.set_position(loc);
                true
            }
            None => {
                contract_fault("apply_point_edit");
                false
            }
        }
    }

    pub(crate) fn bounding_box(&self) -> RectInfo {
        BBox::from_points(&self.points).rect_info()
    }

    /// Trace the control-point box grown by the pick radius
    pub(crate) fn trace_pick_box(&self, surface: &mut dyn Surface) {
        let region = BBox::from_points(&self.points).inflate(self.pick_radius);
        surface.begin_path();
        surface.rect(region.min, region.width(), region.height());
    }

    /// First control point whose handle contains `loc`, in point order
    pub(crate) fn pick(&mut self, surface: &mut dyn Surface, loc: Point) -> Option<usize> {
        let radius = self.pick_radius;
        let hit = self.points.iter().position(|p| {
            surface.begin_path();
            surface.arc(*p, radius, 0.0, TAU, false);
            surface.is_point_in_path(loc)
        });
        self.gesture = match hit {
            Some(index) => Gesture::Editing { index },
            None => Gesture::Idle,
        };
        debug!(?hit, x = loc.x, y = loc.y, "pick control point");
        hit
    }

    pub(crate) fn draw_control_points(&self, surface: &mut dyn Surface) {
        for point in &self.points {
            surface.begin_path();
            surface.arc(*point, self.pick_radius, 0.0, TAU, false);
            self.paint(surface, true);
        }
    }

    /// Stroke, then optionally fill, the current path in this shape's style
    pub(crate) fn paint(&self, surface: &mut dyn Surface, filled: bool) {
        surface.save();
        surface.set_line_width(self.style.line_width);
        surface.stroke(self.style.stroke);
        if filled {
            surface.fill(self.style.fill);
        }
        surface.restore();
    }

    /// Rewrite every point through the captured rotation about `pivot`.
    /// Consumes the captured transform; returns false when there is none.
    pub(crate) fn bake_rotation(&mut self, pivot: Point, translation: Option<Point>) -> bool {
        let Some(transform) = self.transform.take() else {
            return false;
        };
        let to_local = pivot - Point::ORIGIN;
        let (tx, ty) = match translation {
            Some(t) => (Some(t.x), Some(t.y)),
            None => (None, None),
        };
        for point in self.points.iter_mut() {
            *point = transform.map_local_to_screen(*point - to_local, tx, ty);
        }
        true
    }
}

/// A gesture operation was called out of order: a bug in the caller.
pub(crate) fn contract_fault(op: &'static str) {
    if cfg!(debug_assertions) {
        panic!("{op} called outside an active gesture");
    }
    warn!(op, "called outside an active gesture; ignored");
}

/// Common behavior for all shapes.
///
/// The required methods are each variant's capabilities; a variant that
/// has nothing to do for one of them says so explicitly in its impl.
#[enum_dispatch]
pub trait Shape {
    fn core(&self) -> &ShapeCore;

    fn core_mut(&mut self) -> &mut ShapeCore;

    fn kind(&self) -> ShapeKind;

    /// Build the hit region used by [`Shape::contains`] on a fresh path
    fn create_path(&self, surface: &mut dyn Surface);

    /// Build the painted outline on a fresh path
    fn trace_outline(&self, surface: &mut dyn Surface);

    /// Recompute the derived center (and radius) after a mutation.
    /// `loc` is the pointer location when the mutation came from a drag.
    fn set_center(&mut self, loc: Option<Point>);

    /// Draw the shape rotated by `angle` radians about its rotation center
    fn rotate(&mut self, surface: &mut dyn Surface, angle: f64);

    /// Commit the last rotation into the stored geometry.
    /// `translation` replaces the rotation center captured with it.
    fn update_point_after_rotated(&mut self, translation: Option<Point>);

    /// Whether the outline gets filled when the style asks for it
    fn paints_fill(&self) -> bool {
        self.core().style.filled
    }

    /// Start a whole-shape drag at `loc`
    fn capture_offsets(&mut self, loc: Point) {
        self.core_mut().capture_offsets(loc);
    }

    /// Continue a whole-shape drag: translate rigidly with the pointer
    fn apply_move(&mut self, loc: Point) {
        if self.core_mut().translate_to(loc) {
            self.set_center(Some(loc));
        }
    }

    /// Start a point drag if `loc` is on a control point
    fn pick_control_point(&mut self, surface: &mut dyn Surface, loc: Point) -> Option<usize> {
        self.core_mut().pick(surface, loc)
    }

    /// Continue a point drag: move the picked point to `loc`
    fn apply_point_edit(&mut self, loc: Point) {
        if self.core_mut().move_dragged(loc) {
            self.set_center(Some(loc));
        }
    }

    /// Pointer released
    fn end_gesture(&mut self) {
        self.core_mut().gesture = Gesture::Idle;
    }

    fn bounding_box(&self) -> RectInfo {
        self.core().bounding_box()
    }

    fn draw(&self, surface: &mut dyn Surface) {
        draw_shape(self, surface);
    }

    /// Whether `loc` falls inside this shape's hit region
    fn contains(&self, surface: &mut dyn Surface, loc: Point) -> bool {
        self.create_path(surface);
        surface.is_point_in_path(loc)
    }

    fn points(&self) -> &[Point] {
        &self.core().points
    }

    fn center(&self) -> Point {
        self.core().center
    }

    fn radius(&self) -> f64 {
        self.core().radius
    }

    /// Angle of the last rotation, radians
    fn angle(&self) -> f64 {
        self.core().angle
    }

    fn is_rotated(&self) -> bool {
        self.core().rotated
    }

    fn gesture(&self) -> &Gesture {
        &self.core().gesture
    }

    /// Index of the point being dragged
    fn dragging_point(&self) -> Option<usize> {
        match self.core().gesture {
            Gesture::Editing { index } => Some(index),
            _ => None,
        }
    }

    /// Offsets captured for the current whole-shape drag
    fn offsets(&self) -> &[Offset] {
        match &self.core().gesture {
            Gesture::Moving { offsets } => offsets,
            _ => &[],
        }
    }

    fn style(&self) -> &ShapeStyle {
        &self.core().style
    }

    fn set_style(&mut self, style: ShapeStyle) {
        self.core_mut().style = style;
    }

    fn is_editing(&self) -> bool {
        self.core().editing
    }

    /// Show or hide the control-point overlay
    fn set_editing(&mut self, editing: bool) {
        self.core_mut().editing = editing;
    }

    fn pick_radius(&self) -> f64 {
        self.core().pick_radius
    }

    fn set_pick_radius(&mut self, radius: f64) {
        self.core_mut().pick_radius = radius;
    }
}

/// Control-point overlay (when editing), then the outline, stroked and
/// optionally filled.
pub(crate) fn draw_shape<S: Shape + ?Sized>(shape: &S, surface: &mut dyn Surface) {
    let core = shape.core();
    if core.editing {
        core.draw_control_points(surface);
    }
    shape.trace_outline(surface);
    core.paint(surface, shape.paints_fill());
}

/// Draw `shape` with its points re-expressed relative to `pivot` under a
/// rotation about `pivot`, then put the stored geometry back.
pub(crate) fn rotate_about<S: Shape + ?Sized>(shape: &mut S, surface: &mut dyn Surface, angle: f64, pivot: Point) {
    let saved_points = shape.core().points.clone();
    let saved_center = shape.core().center;

    surface.save();
    let transform = apply_transform(surface, &Transform::rotate_translate(angle, pivot.x, pivot.y));
    {
        let core = shape.core_mut();
        core.angle = angle;
        core.transform = Some(transform);
        let to_local = pivot - Point::ORIGIN;
        for point in core.points.iter_mut() {
            *point = *point - to_local;
        }
        core.center = core.center - to_local;
    }
    shape.draw(surface);
    surface.restore();

    let core = shape.core_mut();
    core.points = saved_points;
    core.center = saved_center;
    debug!(kind = shape.kind().name(), angle, "rotated");
}

/// A shape of any kind
#[enum_dispatch(Shape)]
#[derive(Debug, Clone)]
pub enum ShapeEnum {
    Line(Line),
    Circle(Circle),
    Polygon(Polygon),
    RoundRect(RoundRect),
    BezierCurve(BezierCurve),
}
