use crate::style::ShapeStyle;
use crate::surface::Surface;
use crate::types::Point;

use super::{Shape, ShapeCore, ShapeKind, rotate_about};

/// A cubic Bezier curve.
///
/// Points are `[endpoint1, endpoint2, control1, control2]`. The curve is
/// stroked only. Its hit region is the bounding box of all four points grown
/// by the pick radius, so the control points count as part of the shape.
#[derive(Debug, Clone)]
pub struct BezierCurve {
    core: ShapeCore,
}

impl BezierCurve {
    pub fn new(endpoints: [Point; 2], controls: [Point; 2]) -> Self {
        let [e1, e2] = endpoints;
        let [c1, c2] = controls;
        let mut curve = BezierCurve {
            core: ShapeCore::new(vec![e1, e2, c1, c2]),
        };
        curve.set_center(None);
        curve
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.core.style = style;
        self
    }

    pub fn with_pick_radius(mut self, radius: f64) -> Self {
        self.core.pick_radius = radius;
        self
    }

    pub fn endpoints(&self) -> [Point; 2] {
        [self.core.points[0], self.core.points[1]]
    }

    pub fn control_points(&self) -> [Point; 2] {
        [self.core.points[2], self.core.points[3]]
    }
}

impl Shape for BezierCurve {
    fn core(&self) -> &ShapeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ShapeCore {
        &mut self.core
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::BezierCurve
    }

    fn create_path(&self, surface: &mut dyn Surface) {
        self.core.trace_pick_box(surface);
        surface.close_path();
    }

    fn trace_outline(&self, surface: &mut dyn Surface) {
        let [e1, e2] = self.endpoints();
        let [c1, c2] = self.control_points();
        surface.begin_path();
        surface.move_to(e1);
        surface.bezier_curve_to(c1, c2, e2);
    }

    fn paints_fill(&self) -> bool {
        false
    }

    fn set_center(&mut self, _loc: Option<Point>) {
        let rect = self.bounding_box();
        self.core.center = rect.center;
        // Diagonal, not the half-side
        self.core.radius = rect.width.hypot(rect.height);
    }

    fn rotate(&mut self, surface: &mut dyn Surface, angle: f64) {
        let pivot = self.core.center;
        rotate_about(self, surface, angle, pivot);
    }

    fn update_point_after_rotated(&mut self, translation: Option<Point>) {
        let pivot = self.core.center;
        if self.core.bake_rotation(pivot, translation) {
            self.set_center(None);
        }
    }
}
