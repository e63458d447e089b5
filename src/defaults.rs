//! Default sizes and settings (all in screen pixels)

use crate::types::Color;

/// Hit-test tolerance around each control point
pub const PICK_RADIUS: f64 = 5.0;
/// Corner radius of a rounded rectangle when none is given
pub const CORNER_RADIUS: f64 = 10.0;
/// Radius of the dots drawn by the debug overlay
pub const DEBUG_POINT_RADIUS: f64 = 4.0;
pub const LINE_WIDTH: f64 = 1.0;
pub const STROKE: Color = Color::BLACK;
pub const FILL: Color = Color::rgb(211, 211, 211);
/// Dot color for a rounded rectangle's base point
pub const DEBUG_BASE: Color = Color::RED;
/// Dot color for the first point of each arc pair
pub const DEBUG_ARC_START: Color = Color::GREEN;
/// Dot color for the second point of each arc pair
pub const DEBUG_ARC_END: Color = Color::YELLOW;
/// Maximum distance between an arc and its cubic approximation
pub const FLATTEN_TOLERANCE: f64 = 0.05;
