//! A 2D vector-shape editing engine.
//!
//! Shapes ([`Line`], [`Circle`], [`Polygon`], [`RoundRect`], [`BezierCurve`])
//! keep their geometry as control points and draw themselves onto a
//! [`Surface`]. An editor drives them through pointer gestures:
//!
//! - whole-shape drag: [`Shape::capture_offsets`] then [`Shape::apply_move`]
//! - control-point drag: [`Shape::pick_control_point`] then
//!   [`Shape::apply_point_edit`]
//! - rotation about the shape's own center: [`Shape::rotate`], optionally
//!   committed with [`Shape::update_point_after_rotated`]
//!
//! ```
//! use drawboard::{Canvas, Circle, Point, Shape};
//!
//! let mut canvas = Canvas::new(200, 200)?;
//! let mut circle = Circle::new(Point::new(100.0, 100.0), 50.0);
//!
//! // Grab the east handle and pull it outward
//! assert_eq!(circle.pick_control_point(&mut canvas, Point::new(150.0, 100.0)), Some(2));
//! circle.apply_point_edit(Point::new(170.0, 100.0));
//! circle.end_gesture();
//!
//! assert_eq!(circle.radius(), 70.0);
//! circle.draw(&mut canvas);
//! # Ok::<(), drawboard::SurfaceError>(())
//! ```

mod log;

pub mod defaults;
pub mod errors;
pub mod shapes;
pub mod style;
pub mod surface;
pub mod transform;
pub mod types;

pub use errors::{ShapeError, SurfaceError};
pub use shapes::{
    ArcControl, BezierCurve, Circle, Gesture, Line, Polygon, RoundRect, RoundRectControls, Shape, ShapeCore,
    ShapeEnum, ShapeKind,
};
pub use style::ShapeStyle;
pub use surface::{Canvas, DrawCommand, Surface};
pub use transform::{Transform, apply_transform};
pub use types::{BBox, Color, Offset, Point, RectInfo};
