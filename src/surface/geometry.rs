//! Arc geometry for the canvas path primitives

use std::f64::consts::{PI, TAU};

use glam::DVec2;

/// Below this the two legs of an `arc_to` corner count as collinear
const COLLINEAR_EPSILON: f64 = 1e-12;

/// Signed sweep of a canvas `arc` call.
///
/// Clockwise arcs sweep forward from `start` to `end`, wrapping once;
/// a span of a full turn or more draws the whole circle.
pub(crate) fn arc_sweep(start: f64, end: f64, anticlockwise: bool) -> f64 {
    if anticlockwise {
        let delta = start - end;
        if delta >= TAU { -TAU } else { -delta.rem_euclid(TAU) }
    } else {
        let delta = end - start;
        if delta >= TAU { TAU } else { delta.rem_euclid(TAU) }
    }
}

/// The pieces of an `arc_to` corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CornerArc {
    /// Tangent point on `p0 -> p1`
    pub tangent1: DVec2,
    /// Tangent point on `p1 -> p2`
    pub tangent2: DVec2,
    pub center: DVec2,
    pub start_angle: f64,
    /// Always the short way round, |sweep| < PI
    pub sweep: f64,
}

/// Fit a circle of `radius` into the corner `p0 -> p1 -> p2`.
///
/// Returns `None` when the corner is degenerate (zero radius, coincident
/// points, straight line); the caller then draws a line to `p1`.
pub(crate) fn corner_arc(p0: DVec2, p1: DVec2, p2: DVec2, radius: f64) -> Option<CornerArc> {
    if radius <= 0.0 || p0 == p1 || p1 == p2 {
        return None;
    }

    let v1 = (p0 - p1).normalize();
    let v2 = (p2 - p1).normalize();
    if v1.perp_dot(v2).abs() < COLLINEAR_EPSILON {
        return None;
    }

    // Interior angle at p1
    let half = v1.dot(v2).clamp(-1.0, 1.0).acos() / 2.0;
    let tangent_dist = radius / half.tan();
    let tangent1 = p1 + v1 * tangent_dist;
    let tangent2 = p1 + v2 * tangent_dist;
    let center = p1 + (v1 + v2).normalize() * (radius / half.sin());

    let start_angle = angle_of(tangent1 - center);
    let mut sweep = angle_of(tangent2 - center) - start_angle;
    if sweep > PI {
        sweep -= TAU;
    } else if sweep <= -PI {
        sweep += TAU;
    }

    Some(CornerArc {
        tangent1,
        tangent2,
        center,
        start_angle,
        sweep,
    })
}

fn angle_of(v: DVec2) -> f64 {
    v.y.atan2(v.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-9;

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn full_turn_clockwise() {
        assert_eq!(arc_sweep(0.0, TAU, false), TAU);
        assert_eq!(arc_sweep(1.0, 1.0 + 3.0 * TAU, false), TAU);
    }

    #[test]
    fn full_turn_anticlockwise() {
        assert_eq!(arc_sweep(TAU, 0.0, true), -TAU);
    }

    #[test]
    fn partial_sweeps_wrap() {
        assert!((arc_sweep(0.0, FRAC_PI_2, false) - FRAC_PI_2).abs() < EPS);
        // Clockwise from 90deg to 0deg goes the long way round
        assert!((arc_sweep(FRAC_PI_2, 0.0, false) - 3.0 * FRAC_PI_2).abs() < EPS);
        assert!((arc_sweep(FRAC_PI_2, 0.0, true) + FRAC_PI_2).abs() < EPS);
        assert_eq!(arc_sweep(1.0, 1.0, false), 0.0);
    }

    #[test]
    fn right_angle_corner() {
        let arc = corner_arc(dvec2(0.0, 0.0), dvec2(10.0, 0.0), dvec2(10.0, 10.0), 2.0).unwrap();
        assert!(close(arc.tangent1, dvec2(8.0, 0.0)));
        assert!(close(arc.tangent2, dvec2(10.0, 2.0)));
        assert!(close(arc.center, dvec2(8.0, 2.0)));
        assert!((arc.start_angle + FRAC_PI_2).abs() < EPS);
        assert!((arc.sweep - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn turning_the_other_way_sweeps_negative() {
        let arc = corner_arc(dvec2(0.0, 0.0), dvec2(10.0, 0.0), dvec2(10.0, -10.0), 2.0).unwrap();
        assert!(close(arc.center, dvec2(8.0, -2.0)));
        assert!((arc.sweep + FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn degenerate_corners() {
        let a = dvec2(0.0, 0.0);
        let b = dvec2(10.0, 0.0);
        assert!(corner_arc(a, b, dvec2(20.0, 0.0), 2.0).is_none());
        assert!(corner_arc(a, a, b, 2.0).is_none());
        assert!(corner_arc(a, b, b, 2.0).is_none());
        assert!(corner_arc(a, b, dvec2(10.0, 10.0), 0.0).is_none());
    }
}
