//! Shape-local affine transforms.
//!
//! A shape rotates about its own center by composing a rotate-then-translate
//! matrix onto the surface for the duration of one draw. The same matrix maps
//! the shape's local coordinates back to the screen when a rotation has to
//! be baked into stored geometry.
//!
//! The matrix layout follows the canvas convention:
//!
//! ```text
//! | a c e |
//! | b d f |
//! | 0 0 1 |
//! ```

use glam::DAffine2;

use crate::surface::Surface;
use crate::types::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Translate by `(tx, ty)`, then rotate by `angle` radians about the new
    /// origin.
    pub fn rotate_translate(angle: f64, tx: f64, ty: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Transform {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: tx,
            f: ty,
        }
    }

    pub fn to_affine(&self) -> DAffine2 {
        DAffine2::from_cols_array(&[self.a, self.b, self.c, self.d, self.e, self.f])
    }

    pub fn from_affine(affine: DAffine2) -> Self {
        let [a, b, c, d, e, f] = affine.to_cols_array();
        Transform { a, b, c, d, e, f }
    }

    /// `self * other`: `other` is applied to a point first.
    pub fn then(&self, other: &Transform) -> Transform {
        Transform::from_affine(self.to_affine() * other.to_affine())
    }

    /// Map a point through the matrix, keeping its flags
    pub fn apply(&self, p: Point) -> Point {
        let mapped = self.to_affine().transform_point2(p.to_vec());
        Point {
            x: mapped.x,
            y: mapped.y,
            is_center: p.is_center,
        }
    }

    /// Map a shape-local point to the screen.
    ///
    /// `override_tx` / `override_ty` replace the translation column, for when
    /// the rotation center moved after the transform was captured.
    pub fn map_local_to_screen(&self, local: Point, override_tx: Option<f64>, override_ty: Option<f64>) -> Point {
        let e = override_tx.unwrap_or(self.e);
        let f = override_ty.unwrap_or(self.f);
        Point {
            x: local.x * self.a + local.y * self.c + e,
            y: local.x * self.b + local.y * self.d + f,
            is_center: local.is_center,
        }
    }

    /// Rotation angle in radians
    pub fn angle(&self) -> f64 {
        self.b.atan2(self.a)
    }

    pub fn translation(&self) -> Point {
        Point::new(self.e, self.f)
    }

    pub fn is_identity(&self) -> bool {
        *self == Transform::IDENTITY
    }
}

/// Compose `transform` onto the surface's current transform.
///
/// Returns the transform so the caller can keep it as its active shape-local
/// transform for later [`Transform::map_local_to_screen`] calls.
pub fn apply_transform(surface: &mut dyn Surface, transform: &Transform) -> Transform {
    surface.transform(transform);
    *transform
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    #[test]
    fn rotate_translate_coefficients() {
        let t = Transform::rotate_translate(FRAC_PI_2, 10.0, 20.0);
        assert!((t.a - 0.0).abs() < EPS);
        assert!((t.b - 1.0).abs() < EPS);
        assert!((t.c + 1.0).abs() < EPS);
        assert!((t.d - 0.0).abs() < EPS);
        assert_eq!(t.e, 10.0);
        assert_eq!(t.f, 20.0);
        assert!((t.angle() - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn zero_angle_is_pure_translation() {
        let t = Transform::rotate_translate(0.0, 3.0, -4.0);
        let p = t.map_local_to_screen(Point::new(1.0, 1.0), None, None);
        assert_eq!(p, Point::new(4.0, -3.0));
    }

    #[test]
    fn quarter_turn_is_clockwise_on_screen() {
        // +x rotates toward +y (down) in a Y-down space
        let t = Transform::rotate_translate(FRAC_PI_2, 0.0, 0.0);
        let p = t.map_local_to_screen(Point::new(10.0, 0.0), None, None);
        assert!(p.approx_eq(Point::new(0.0, 10.0), EPS));
    }

    #[test]
    fn map_local_to_screen_overrides_translation() {
        let t = Transform::rotate_translate(PI, 100.0, 100.0);
        let moved = t.map_local_to_screen(Point::new(5.0, 0.0), Some(50.0), None);
        assert!(moved.approx_eq(Point::new(45.0, 100.0), EPS));

        let moved = t.map_local_to_screen(Point::new(0.0, 5.0), None, Some(0.0));
        assert!(moved.approx_eq(Point::new(100.0, -5.0), EPS));
    }

    #[test]
    fn apply_matches_map_local_to_screen() {
        let t = Transform::rotate_translate(0.7, 12.0, -3.0);
        let local = Point::center_handle(4.0, 9.0);
        let a = t.apply(local);
        let b = t.map_local_to_screen(local, None, None);
        assert!(a.approx_eq(b, EPS));
        assert!(a.is_center && b.is_center);
    }

    #[test]
    fn then_applies_right_operand_first() {
        let rotate = Transform::rotate_translate(FRAC_PI_2, 0.0, 0.0);
        let shift = Transform::rotate_translate(0.0, 10.0, 0.0);
        let p = Point::new(1.0, 0.0);

        let composed = rotate.then(&shift);
        let expected = rotate.apply(shift.apply(p));
        assert!(composed.apply(p).approx_eq(expected, EPS));
        assert!(composed.apply(p).approx_eq(Point::new(0.0, 11.0), EPS));
    }

    #[test]
    fn affine_round_trip() {
        let t = Transform::rotate_translate(1.3, -2.0, 8.5);
        assert_eq!(Transform::from_affine(t.to_affine()), t);
        assert!(Transform::default().is_identity());
    }
}
