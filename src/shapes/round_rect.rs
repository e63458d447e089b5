use crate::defaults;
use crate::style::ShapeStyle;
use crate::surface::{Surface, draw_point};
use crate::transform::{Transform, apply_transform};
use crate::types::Point;

use super::{Gesture, Shape, ShapeCore, ShapeKind, contract_fault, draw_shape};

/// The two `arc_to` points that round one corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcControl {
    pub c1: Point,
    pub c2: Point,
}

/// Path recipe for a rounded rectangle: start at `base`, then one `arc_to`
/// per corner, clockwise from the top-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundRectControls {
    pub base: Point,
    pub arcs: [ArcControl; 4],
}

impl RoundRectControls {
    /// Axis-aligned recipe for the rectangle at `corner`
    fn from_frame(corner: Point, width: f64, height: f64, radius: f64) -> Self {
        let base = Point::new(corner.x + radius, corner.y);
        let right = corner.x + width;
        let bottom = corner.y + height;
        let (left, top) = (corner.x, corner.y);
        RoundRectControls {
            base,
            arcs: [
                ArcControl {
                    c1: Point::new(right, top),
                    c2: Point::new(right, bottom),
                },
                ArcControl {
                    c1: Point::new(right, bottom),
                    c2: Point::new(left, bottom),
                },
                ArcControl {
                    c1: Point::new(left, bottom),
                    c2: Point::new(left, top),
                },
                ArcControl {
                    c1: Point::new(left, top),
                    c2: base,
                },
            ],
        }
    }

    fn map(&self, f: impl Fn(Point) -> Point) -> Self {
        RoundRectControls {
            base: f(self.base),
            arcs: self.arcs.map(|arc| ArcControl {
                c1: f(arc.c1),
                c2: f(arc.c2),
            }),
        }
    }
}

fn corners(corner: Point, width: f64, height: f64) -> Vec<Point> {
    vec![
        Point::new(corner.x, corner.y),
        Point::new(corner.x + width, corner.y),
        Point::new(corner.x + width, corner.y + height),
        Point::new(corner.x, corner.y + height),
    ]
}

/// A rectangle with rounded corners.
///
/// The geometry is the unrotated frame (corner, width, height); the control
/// cache and the corner handles in `points` are derived from it. Once
/// rotated, the shape stays rotated: later moves regenerate the cache
/// through the captured rotation about the new center.
///
/// Moving drags the corner. There is no per-point editing.
#[derive(Debug, Clone)]
pub struct RoundRect {
    core: ShapeCore,
    corner: Point,
    width: f64,
    height: f64,
    corner_radius: f64,
    controls: RoundRectControls,
}

impl RoundRect {
    pub fn new(corner: Point, width: f64, height: f64) -> Self {
        let corner = Point::new(corner.x, corner.y);
        let corner_radius = defaults::CORNER_RADIUS;
        let mut core = ShapeCore::new(corners(corner, width, height));
        core.radius = width.hypot(height);
        let mut rect = RoundRect {
            core,
            corner,
            width,
            height,
            corner_radius,
            controls: RoundRectControls::from_frame(corner, width, height, corner_radius),
        };
        rect.set_center(None);
        rect
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self.refresh_controls();
        self
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.core.style = style;
        self
    }

    pub fn with_pick_radius(mut self, radius: f64) -> Self {
        self.core.pick_radius = radius;
        self
    }

    /// Draw the control cache as dots on top of the shape
    pub fn with_debug_overlay(mut self, enabled: bool) -> Self {
        self.core.debug_overlay = enabled;
        self
    }

    pub fn set_debug_overlay(&mut self, enabled: bool) {
        self.core.debug_overlay = enabled;
    }

    pub fn corner(&self) -> Point {
        self.corner
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    pub fn controls(&self) -> &RoundRectControls {
        &self.controls
    }

    /// Rebuild the control cache and corner handles, honoring any rotation
    fn refresh_controls(&mut self) {
        if self.core.rotated {
            let center = self.core.center;
            self.update_point_after_rotated(Some(center));
        } else {
            self.controls = RoundRectControls::from_frame(self.corner, self.width, self.height, self.corner_radius);
            self.core.points = corners(self.corner, self.width, self.height);
        }
    }

    /// Corner of the frame centered on the origin
    fn local_corner(&self) -> Point {
        Point::new(-self.width / 2.0, -self.height / 2.0)
    }

    fn draw_debug_points(&self, surface: &mut dyn Surface) {
        let radius = defaults::DEBUG_POINT_RADIUS;
        draw_point(surface, self.controls.base, radius, defaults::DEBUG_BASE);
        for arc in &self.controls.arcs {
            draw_point(surface, arc.c1, radius, defaults::DEBUG_ARC_START);
            draw_point(surface, arc.c2, radius, defaults::DEBUG_ARC_END);
        }
    }
}

impl Shape for RoundRect {
    fn core(&self) -> &ShapeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ShapeCore {
        &mut self.core
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::RoundRect
    }

    fn create_path(&self, surface: &mut dyn Surface) {
        let RoundRectControls { base, arcs } = &self.controls;
        surface.begin_path();
        surface.move_to(*base);
        for arc in arcs {
            surface.arc_to(arc.c1, arc.c2, self.corner_radius);
        }
        surface.close_path();
    }

    fn trace_outline(&self, surface: &mut dyn Surface) {
        self.create_path(surface);
    }

    fn set_center(&mut self, _loc: Option<Point>) {
        self.core.center = Point::new(
            self.corner.x + self.width / 2.0,
            self.corner.y + self.height / 2.0,
        );
    }

    fn rotate(&mut self, surface: &mut dyn Surface, angle: f64) {
        let center = self.core.center;
        let corner = self.corner;
        self.core.rotated = true;
        self.core.angle = angle;

        surface.save();
        let transform = apply_transform(surface, &Transform::rotate_translate(angle, center.x, center.y));
        self.core.transform = Some(transform);
        self.core.center = Point::ORIGIN;
        self.corner = self.local_corner();
        self.controls = RoundRectControls::from_frame(self.corner, self.width, self.height, self.corner_radius);
        self.core.points = corners(self.corner, self.width, self.height);
        self.draw(surface);
        surface.restore();

        self.core.center = center;
        self.corner = corner;
        self.update_point_after_rotated(None);
    }

    fn update_point_after_rotated(&mut self, translation: Option<Point>) {
        let Some(transform) = self.core.transform else {
            return;
        };
        let (tx, ty) = match translation {
            Some(t) => (Some(t.x), Some(t.y)),
            None => (None, None),
        };
        let to_screen = |p: Point| transform.map_local_to_screen(p, tx, ty);
        let local = self.local_corner();
        self.controls = RoundRectControls::from_frame(local, self.width, self.height, self.corner_radius).map(to_screen);
        self.core.points = corners(local, self.width, self.height).into_iter().map(to_screen).collect();
    }

    fn capture_offsets(&mut self, loc: Point) {
        self.core.gesture = Gesture::Moving {
            offsets: vec![loc - self.corner],
        };
    }

    fn apply_move(&mut self, loc: Point) {
        let offset = match &self.core.gesture {
            Gesture::Moving { offsets } => offsets.last().copied(),
            _ => None,
        };
        let Some(offset) = offset else {
            contract_fault("apply_move");
            return;
        };
        self.corner = loc - offset;
        self.set_center(Some(loc));
        self.refresh_controls();
    }

    /// Corners are not individually editable
    fn apply_point_edit(&mut self, _loc: Point) {}

    fn draw(&self, surface: &mut dyn Surface) {
        draw_shape(self, surface);
        if self.core.debug_overlay {
            self.draw_debug_points(surface);
        }
    }
}
