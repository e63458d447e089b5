use std::f64::consts::TAU;

use crate::style::ShapeStyle;
use crate::surface::Surface;
use crate::types::Point;

use super::{Shape, ShapeCore, ShapeKind};

/// A circle with five handles: the center (flagged), then the top, right,
/// bottom and left of the rim.
///
/// Dragging the center moves the circle; dragging a rim handle changes the
/// radius. Rotation has no visible effect.
#[derive(Debug, Clone)]
pub struct Circle {
    core: ShapeCore,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        let mut core = ShapeCore::new(Vec::with_capacity(5));
        core.center = Point::new(center.x, center.y);
        core.radius = radius;
        let mut circle = Circle { core };
        circle.set_points();
        circle
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.core.style = style;
        self
    }

    pub fn with_pick_radius(mut self, radius: f64) -> Self {
        self.core.pick_radius = radius;
        self
    }

    /// Regenerate the handles from center and radius
    fn set_points(&mut self) {
        let Point { x, y, .. } = self.core.center;
        let r = self.core.radius;
        self.core.points = vec![
            Point::center_handle(x, y),
            Point::new(x, y - r),
            Point::new(x + r, y),
            Point::new(x, y + r),
            Point::new(x - r, y),
        ];
    }
}

impl Shape for Circle {
    fn core(&self) -> &ShapeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ShapeCore {
        &mut self.core
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn create_path(&self, surface: &mut dyn Surface) {
        self.trace_outline(surface);
    }

    fn trace_outline(&self, surface: &mut dyn Surface) {
        surface.begin_path();
        surface.arc(self.core.center, self.core.radius, 0.0, TAU, false);
    }

    fn set_center(&mut self, _loc: Option<Point>) {
        // The dragged handle already sits at the pointer
        let dragged = self.dragging_point().and_then(|i| self.core.points.get(i).copied());
        match dragged {
            Some(handle) if handle.is_center => {
                self.core.center = Point::new(handle.x, handle.y);
            }
            Some(handle) => {
                self.core.radius = self.core.center.distance(handle);
            }
            None => {
                let c = self.core.points[0];
                self.core.center = Point::new(c.x, c.y);
                return;
            }
        }
        self.set_points();
    }

    fn rotate(&mut self, surface: &mut dyn Surface, _angle: f64) {
        // Rotationally symmetric
        self.draw(surface);
    }

    fn update_point_after_rotated(&mut self, _translation: Option<Point>) {}
}
