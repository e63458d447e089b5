use crate::style::ShapeStyle;
use crate::surface::Surface;
use crate::types::Point;

use super::{Shape, ShapeCore, ShapeKind, rotate_about};

/// A straight segment between two control points.
///
/// The center is the first point and the radius is the segment length.
/// Lines are never filled; their hit region is the bounding box grown by
/// the pick radius.
#[derive(Debug, Clone)]
pub struct Line {
    core: ShapeCore,
}

impl Line {
    pub fn new(begin: Point, end: Point) -> Self {
        let mut line = Line {
            core: ShapeCore::new(vec![begin, end]),
        };
        line.set_center(None);
        line
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.core.style = style;
        self
    }

    pub fn with_pick_radius(mut self, radius: f64) -> Self {
        self.core.pick_radius = radius;
        self
    }

    pub fn begin(&self) -> Point {
        self.core.points[0]
    }

    pub fn end(&self) -> Point {
        self.core.points[1]
    }

    pub fn length(&self) -> f64 {
        self.begin().distance(self.end())
    }
}

impl Shape for Line {
    fn core(&self) -> &ShapeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ShapeCore {
        &mut self.core
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn create_path(&self, surface: &mut dyn Surface) {
        self.core.trace_pick_box(surface);
    }

    fn trace_outline(&self, surface: &mut dyn Surface) {
        surface.begin_path();
        surface.move_to(self.begin());
        surface.line_to(self.end());
    }

    fn paints_fill(&self) -> bool {
        false
    }

    fn set_center(&mut self, _loc: Option<Point>) {
        self.core.center = self.begin();
        self.core.radius = self.length();
    }

    fn rotate(&mut self, surface: &mut dyn Surface, angle: f64) {
        let pivot = self.begin();
        rotate_about(self, surface, angle, pivot);
    }

    fn update_point_after_rotated(&mut self, translation: Option<Point>) {
        let pivot = self.begin();
        if self.core.bake_rotation(pivot, translation) {
            self.set_center(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Canvas, DrawCommand};
    use crate::types::Offset;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-9;

    fn line() -> Line {
        Line::new(Point::new(10.0, 10.0), Point::new(40.0, 50.0))
    }

    #[test]
    fn center_is_begin_and_radius_is_length() {
        let l = line();
        assert_eq!(l.center(), Point::new(10.0, 10.0));
        assert!((l.radius() - 50.0).abs() < EPS);
    }

    #[test]
    fn move_keeps_length() {
        let mut l = line();
        l.capture_offsets(Point::new(20.0, 20.0));
        l.apply_move(Point::new(120.0, 70.0));
        assert_eq!(l.begin(), Point::new(110.0, 60.0));
        assert_eq!(l.end(), Point::new(140.0, 100.0));
        assert_eq!(l.center(), l.begin());
        assert!((l.radius() - 50.0).abs() < EPS);
    }

    #[test]
    fn offsets_are_pointer_minus_point() {
        let mut l = line();
        l.capture_offsets(Point::new(20.0, 20.0));
        assert_eq!(l.offsets(), [Offset::new(10.0, 10.0), Offset::new(-20.0, -30.0)]);
    }

    #[test]
    fn editing_end_updates_radius() {
        let mut c = Canvas::new(100, 100).unwrap();
        let mut l = line();
        assert_eq!(l.pick_control_point(&mut c, Point::new(41.0, 49.0)), Some(1));
        l.apply_point_edit(Point::new(10.0, 90.0));
        assert_eq!(l.end(), Point::new(10.0, 90.0));
        assert!((l.radius() - 80.0).abs() < EPS);
    }

    #[test]
    fn hit_region_is_inflated_bounding_box() {
        let mut c = Canvas::new(100, 100).unwrap().with_command_log();
        let l = line();
        // Inside the box but away from the segment
        assert!(l.contains(&mut c, Point::new(38.0, 12.0)));
        // Within the pick margin
        assert!(l.contains(&mut c, Point::new(7.0, 30.0)));
        assert!(!l.contains(&mut c, Point::new(3.0, 30.0)));
        assert_eq!(
            c.commands().last(),
            Some(&DrawCommand::Rect {
                origin: Point::new(5.0, 5.0),
                width: 40.0,
                height: 50.0,
            })
        );
    }

    #[test]
    fn never_filled() {
        let mut c = Canvas::new(100, 100).unwrap().with_command_log();
        let l = line().with_style(ShapeStyle::default().filled(true));
        l.draw(&mut c);
        assert!(!c.commands().iter().any(|cmd| matches!(cmd, DrawCommand::Fill(_))));
    }

    #[test]
    fn rotate_draws_about_begin_and_restores_points() {
        let mut c = Canvas::new(100, 100).unwrap().with_command_log();
        let mut l = line();
        let before = l.points().to_vec();
        l.rotate(&mut c, FRAC_PI_2);
        assert_eq!(l.points(), before);
        assert_eq!(l.center(), Point::new(10.0, 10.0));

        let moved_to = c.commands().iter().find_map(|cmd| match cmd {
            DrawCommand::MoveTo(p) => Some(*p),
            _ => None,
        });
        // Drawn in local coordinates: begin is the origin
        assert_eq!(moved_to, Some(Point::ORIGIN));
    }

    #[test]
    fn commit_rotation_turns_end_about_begin() {
        let mut c = Canvas::new(100, 100).unwrap();
        let mut l = Line::new(Point::new(10.0, 10.0), Point::new(30.0, 10.0));
        l.rotate(&mut c, FRAC_PI_2);
        l.update_point_after_rotated(None);
        assert!(l.begin().approx_eq(Point::new(10.0, 10.0), EPS));
        assert!(l.end().approx_eq(Point::new(10.0, 30.0), EPS));
        assert!((l.radius() - 20.0).abs() < EPS);

        // The captured rotation is consumed
        l.update_point_after_rotated(None);
        assert!(l.end().approx_eq(Point::new(10.0, 30.0), EPS));
    }

    #[test]
    fn begin_handle_picks_on_its_own_row() {
        let mut c = Canvas::new(100, 100).unwrap();
        for hx in 0..60 {
            for hy in 0..60 {
                let begin = Point::new(hx as f64, hy as f64);
                let mut l = Line::new(begin, Point::new(begin.x + 40.0, begin.y + 30.0));
                for dx in [-2.0, 0.0, 2.0] {
                    let click = Point::new(begin.x + dx, begin.y);
                    assert_eq!(l.pick_control_point(&mut c, click), Some(0), "click {click}");
                }
            }
        }
    }
}
