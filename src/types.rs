//! Geometry and paint primitives shared by every shape.
//!
//! Screen space is Y-down: +x is right, +y is down, and angles increase
//! clockwise on screen.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use glam::{DVec2, dvec2};

use crate::errors::ShapeError;

/// A control point owned by a shape.
///
/// `is_center` marks the circle's center handle; every other point leaves it
/// unset. Arithmetic keeps the flag of the left-hand point.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub is_center: bool,
}

impl Point {
    pub const ORIGIN: Point = Point::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Point {
            x,
            y,
            is_center: false,
        }
    }

    /// A point flagged as a center handle
    pub const fn center_handle(x: f64, y: f64) -> Self {
        Point {
            x,
            y,
            is_center: true,
        }
    }

    #[inline]
    pub fn to_vec(self) -> DVec2 {
        dvec2(self.x, self.y)
    }

    /// Move this point to `to`'s coordinates, keeping its own flags
    #[inline]
    pub fn set_position(&mut self, to: Point) {
        self.x = to.x;
        self.y = to.y;
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        self.to_vec().distance(other.to_vec())
    }

    /// Same coordinates within `eps` on both axes (flags ignored)
    pub fn approx_eq(self, other: Point, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        p.to_vec()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A displacement vector (not an absolute position).
/// Point + Offset = Point, Point - Point = Offset.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Offset { dx, dy }
    }

    pub fn length(self) -> f64 {
        dvec2(self.dx, self.dy).length()
    }
}

impl Add<Offset> for Point {
    type Output = Point;
    fn add(self, rhs: Offset) -> Point {
        Point {
            x: self.x + rhs.dx,
            y: self.y + rhs.dy,
            is_center: self.is_center,
        }
    }
}

impl Sub<Offset> for Point {
    type Output = Point;
    fn sub(self, rhs: Offset) -> Point {
        Point {
            x: self.x - rhs.dx,
            y: self.y - rhs.dy,
            is_center: self.is_center,
        }
    }
}

/// Subtract two points to get an offset
impl Sub<Point> for Point {
    type Output = Offset;
    fn sub(self, rhs: Point) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: Point::new(f64::MAX, f64::MAX),
            max: Point::new(f64::MIN, f64::MIN),
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut bbox = BBox::new();
        for p in points {
            bbox.expand_point(*p);
        }
        bbox
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Center computed as `min + size / 2`
    pub fn center(&self) -> Point {
        Point::new(
            self.min.x + self.width() / 2.0,
            self.min.y + self.height() / 2.0,
        )
    }

    /// Grow the box by `margin` on every side
    pub fn inflate(&self, margin: f64) -> BBox {
        BBox {
            min: Point::new(self.min.x - margin, self.min.y - margin),
            max: Point::new(self.max.x + margin, self.max.y + margin),
        }
    }

    /// Summarize as a [`RectInfo`]. An empty box yields the zero rect.
    pub fn rect_info(&self) -> RectInfo {
        if self.is_empty() {
            return RectInfo::default();
        }
        let width = self.width();
        let height = self.height();
        RectInfo {
            x: self.min.x,
            y: self.min.y,
            width,
            height,
            radius: width.max(height) / 2.0,
            center: self.center(),
        }
    }
}

/// Rectilinear extent of a shape's control points
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RectInfo {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Half of the larger side
    pub radius: f64,
    pub center: Point,
}

/// RGBA color, 8 bits per channel, straight alpha
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    fn named(name: &str) -> Option<Color> {
        let color = match name {
            "black" => Color::BLACK,
            "white" => Color::WHITE,
            "red" => Color::RED,
            "green" => Color::GREEN,
            "blue" => Color::BLUE,
            "yellow" => Color::YELLOW,
            "cyan" => Color::rgb(0, 255, 255),
            "magenta" => Color::rgb(255, 0, 255),
            "orange" => Color::rgb(255, 165, 0),
            "purple" => Color::rgb(128, 0, 128),
            "brown" => Color::rgb(165, 42, 42),
            "pink" => Color::rgb(255, 192, 203),
            "gray" | "grey" => Color::rgb(128, 128, 128),
            "lightgray" | "lightgrey" => Color::rgb(211, 211, 211),
            "darkgray" | "darkgrey" => Color::rgb(169, 169, 169),
            "silver" => Color::rgb(192, 192, 192),
            "none" | "transparent" => Color::TRANSPARENT,
            _ => return None,
        };
        Some(color)
    }

    fn parse_hex(hex: &str) -> Option<Color> {
        let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
        let pair = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            3 => Some(Color::rgb(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17)),
            6 => Some(Color::rgb(pair(0)?, pair(2)?, pair(4)?)),
            8 => Some(Color::rgba(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
            _ => None,
        }
    }

    fn parse_function(s: &str) -> Option<Color> {
        let (args, with_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
            (rest.strip_suffix(')')?, true)
        } else {
            (s.strip_prefix("rgb(")?.strip_suffix(')')?, false)
        };
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let channel = |i: usize| parts.get(i)?.parse::<u8>().ok();
        match (parts.len(), with_alpha) {
            (3, false) => Some(Color::rgb(channel(0)?, channel(1)?, channel(2)?)),
            (4, true) => {
                // CSS alpha is 0..=1
                let alpha: f64 = parts[3].parse().ok()?;
                if !(0.0..=1.0).contains(&alpha) {
                    return None;
                }
                Some(Color::rgba(
                    channel(0)?,
                    channel(1)?,
                    channel(2)?,
                    (alpha * 255.0).round() as u8,
                ))
            }
            _ => None,
        }
    }
}

impl FromStr for Color {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_ascii_lowercase();
        let parsed = if let Some(hex) = trimmed.strip_prefix('#') {
            Color::parse_hex(hex)
        } else if trimmed.starts_with("rgb") {
            Color::parse_function(&trimmed)
        } else {
            Color::named(&trimmed)
        };
        parsed.ok_or_else(|| ShapeError::InvalidColor {
            value: s.to_string(),
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_minus_point_is_offset() {
        let d = Point::new(5.0, 7.0) - Point::new(2.0, 3.0);
        assert_eq!(d, Offset::new(3.0, 4.0));
        assert_eq!(d.length(), 5.0);
    }

    #[test]
    fn offset_arithmetic_keeps_center_flag() {
        let p = Point::center_handle(1.0, 1.0) + Offset::new(2.0, -1.0);
        assert!(p.is_center);
        assert_eq!((p.x, p.y), (3.0, 0.0));

        let q = p - Offset::new(3.0, 0.0);
        assert!(q.is_center);
        assert_eq!((q.x, q.y), (0.0, 0.0));
    }

    #[test]
    fn set_position_keeps_flag() {
        let mut p = Point::center_handle(0.0, 0.0);
        p.set_position(Point::new(4.0, 2.0));
        assert!(p.is_center);
        assert_eq!((p.x, p.y), (4.0, 2.0));
    }

    #[test]
    fn bbox_of_points() {
        let pts = [
            Point::new(10.0, 40.0),
            Point::new(-5.0, 20.0),
            Point::new(30.0, 25.0),
        ];
        let info = BBox::from_points(&pts).rect_info();
        assert_eq!(info.x, -5.0);
        assert_eq!(info.y, 20.0);
        assert_eq!(info.width, 35.0);
        assert_eq!(info.height, 20.0);
        assert_eq!(info.radius, 17.5);
        assert_eq!(info.center, Point::new(12.5, 30.0));
    }

    #[test]
    fn bbox_single_point_is_zero_size() {
        let info = BBox::from_points(&[Point::new(3.0, 4.0)]).rect_info();
        assert_eq!(info.width, 0.0);
        assert_eq!(info.height, 0.0);
        assert_eq!(info.center, Point::new(3.0, 4.0));
    }

    #[test]
    fn bbox_negative_coordinates() {
        // max must start below any finite value, not at the smallest positive f64
        let info = BBox::from_points(&[Point::new(-10.0, -10.0), Point::new(-2.0, -4.0)]).rect_info();
        assert_eq!(info.width, 8.0);
        assert_eq!(info.height, 6.0);
    }

    #[test]
    fn empty_bbox_rect_info_is_zero() {
        assert!(BBox::new().is_empty());
        assert_eq!(BBox::new().rect_info(), RectInfo::default());
    }

    #[test]
    fn bbox_inflate() {
        let b = BBox::from_points(&[Point::new(0.0, 0.0), Point::new(10.0, 5.0)]).inflate(2.0);
        assert_eq!(b.min, Point::new(-2.0, -2.0));
        assert_eq!(b.max, Point::new(12.0, 7.0));
    }

    #[test]
    fn color_parse_named_and_hex() {
        assert_eq!("black".parse::<Color>().unwrap(), Color::BLACK);
        assert_eq!(" Red ".parse::<Color>().unwrap(), Color::RED);
        assert_eq!("#fff".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("#336699".parse::<Color>().unwrap(), Color::rgb(0x33, 0x66, 0x99));
        assert_eq!(
            "#33669980".parse::<Color>().unwrap(),
            Color::rgba(0x33, 0x66, 0x99, 0x80)
        );
    }

    #[test]
    fn color_parse_functions() {
        assert_eq!("rgb(1, 2, 3)".parse::<Color>().unwrap(), Color::rgb(1, 2, 3));
        assert_eq!(
            "rgba(10,20,30,0.5)".parse::<Color>().unwrap(),
            Color::rgba(10, 20, 30, 128)
        );
    }

    #[test]
    fn color_parse_rejects_garbage() {
        for bad in ["", "#12", "#gggggg", "rgb(1,2)", "rgb(300,0,0)", "rgba(1,2,3,2)", "chartreuse-ish"] {
            let err = bad.parse::<Color>().unwrap_err();
            assert_eq!(
                err,
                ShapeError::InvalidColor {
                    value: bad.to_string()
                }
            );
        }
    }

    #[test]
    fn color_display() {
        assert_eq!(Color::rgb(0x33, 0x66, 0x99).to_string(), "#336699");
        assert_eq!(Color::TRANSPARENT.to_string(), "#00000000");
    }
}
