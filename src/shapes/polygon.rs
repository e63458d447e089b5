use std::f64::consts::TAU;

use crate::errors::ShapeError;
use crate::style::ShapeStyle;
use crate::surface::Surface;
use crate::types::Point;

use super::{Shape, ShapeCore, ShapeKind, rotate_about};

/// A regular polygon, editable vertex by vertex.
///
/// Built from a center, circumradius, side count and the angle of the first
/// vertex. After an edit the center and radius come from the bounding box.
#[derive(Debug, Clone)]
pub struct Polygon {
    core: ShapeCore,
    sides: usize,
    start_angle: f64,
}

impl Polygon {
    pub fn new(center: Point, radius: f64, sides: usize, start_angle: f64) -> Result<Self, ShapeError> {
        if sides == 0 {
            return Err(ShapeError::NoSides);
        }
        let mut core = ShapeCore::new(vertices(center, radius, sides, start_angle));
        core.center = Point::new(center.x, center.y);
        core.radius = radius;
        Ok(Polygon {
            core,
            sides,
            start_angle,
        })
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.core.style = style;
        self
    }

    pub fn with_pick_radius(mut self, radius: f64) -> Self {
        self.core.pick_radius = radius;
        self
    }

    pub fn sides(&self) -> usize {
        self.sides
    }

    /// Angle of the first vertex at construction
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }
}

/// Vertex `i` sits at `start + i * TAU / sides` on the circumcircle, with
/// angle 0 straight up and angles growing clockwise.
fn vertices(center: Point, radius: f64, sides: usize, start_angle: f64) -> Vec<Point> {
    let step = TAU / sides as f64;
    (0..sides)
        .map(|i| {
            let angle = start_angle + i as f64 * step;
            Point::new(center.x + radius * angle.sin(), center.y - radius * angle.cos())
        })
        .collect()
}

impl Shape for Polygon {
    fn core(&self) -> &ShapeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ShapeCore {
        &mut self.core
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Polygon
    }

    fn create_path(&self, surface: &mut dyn Surface) {
        self.trace_outline(surface);
    }

    fn trace_outline(&self, surface: &mut dyn Surface) {
        surface.begin_path();
        let mut points = self.core.points.iter();
        if let Some(first) = points.next() {
            surface.move_to(*first);
        }
        for point in points {
            surface.line_to(*point);
        }
        surface.close_path();
    }

    fn set_center(&mut self, _loc: Option<Point>) {
        let rect = self.bounding_box();
        self.core.center = rect.center;
        self.core.radius = rect.radius;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Canvas, DrawCommand};
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    #[test]
    fn vertices_lie_on_circumcircle() {
        let center = Point::new(50.0, 60.0);
        let p = Polygon::new(center, 25.0, 7, 0.3).unwrap();
        assert_eq!(p.sides(), 7);
        assert_eq!(p.points().len(), 7);
        for v in p.points() {
            assert!((v.distance(center) - 25.0).abs() < EPS);
        }
        assert_eq!(p.center(), center);
        assert_eq!(p.radius(), 25.0);
    }

    #[test]
    fn first_vertex_points_up_then_clockwise() {
        let p = Polygon::new(Point::new(0.0, 0.0), 10.0, 4, 0.0).unwrap();
        assert!(p.points()[0].approx_eq(Point::new(0.0, -10.0), EPS));
        assert!(p.points()[1].approx_eq(Point::new(10.0, 0.0), EPS));

        let p = Polygon::new(Point::new(0.0, 0.0), 10.0, 4, FRAC_PI_2).unwrap();
        assert!(p.points()[0].approx_eq(Point::new(10.0, 0.0), EPS));
        assert!(p.points()[1].approx_eq(Point::new(0.0, 10.0), EPS));
    }

    #[test]
    fn degenerate_side_counts_are_accepted() {
        let p = Polygon::new(Point::new(5.0, 5.0), 3.0, 1, 0.0).unwrap();
        assert_eq!(p.points().len(), 1);
        assert_eq!(p.bounding_box().width, 0.0);
    }

    #[test]
    fn zero_sides_is_an_error() {
        let err = Polygon::new(Point::new(0.0, 0.0), 10.0, 0, 0.0).unwrap_err();
        assert_eq!(err, ShapeError::NoSides);
    }

    #[test]
    fn outline_is_closed() {
        let mut c = Canvas::new(100, 100).unwrap().with_command_log();
        let p = Polygon::new(Point::new(50.0, 50.0), 20.0, 3, 0.0).unwrap();
        p.draw(&mut c);
        let names: Vec<_> = c.commands().iter().map(DrawCommand::name).collect();
        assert_eq!(
            names,
            [
                "begin_path",
                "move_to",
                "line_to",
                "line_to",
                "close_path",
                "save",
                "set_line_width",
                "stroke",
                "restore"
            ]
        );
    }

    #[test]
    fn vertex_edit_recomputes_center_from_bounds() {
        let mut c = Canvas::new(200, 200).unwrap();
        let mut p = Polygon::new(Point::new(50.0, 50.0), 20.0, 4, 0.0).unwrap();
        // Vertices at (50,30) (70,50) (50,70) (30,50)
        assert_eq!(p.pick_control_point(&mut c, Point::new(70.0, 50.0)), Some(1));
        p.apply_point_edit(Point::new(90.0, 50.0));
        assert!(p.center().approx_eq(Point::new(60.0, 50.0), EPS));
        // Half the larger side
        assert!((p.radius() - 30.0).abs() < EPS);
    }

    #[test]
    fn contains_uses_outline() {
        let mut c = Canvas::new(200, 200).unwrap();
        let p = Polygon::new(Point::new(50.0, 50.0), 20.0, 4, 0.0).unwrap();
        assert!(p.contains(&mut c, Point::new(50.0, 50.0)));
        // Inside the bounding box, outside the diamond
        assert!(!p.contains(&mut c, Point::new(33.0, 33.0)));
    }

    #[test]
    fn commit_half_turn_about_center() {
        let mut c = Canvas::new(200, 200).unwrap();
        let mut p = Polygon::new(Point::new(50.0, 50.0), 20.0, 3, 0.0).unwrap();
        let before = p.points().to_vec();
        p.rotate(&mut c, PI);
        assert_eq!(p.points(), before);
        p.update_point_after_rotated(None);
        assert!(p.points()[0].approx_eq(Point::new(50.0, 70.0), EPS));
        assert!((p.angle() - PI).abs() < EPS);
    }
}
