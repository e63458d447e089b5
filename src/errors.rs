//! Error types with diagnostics using miette
//!
//! Interactive input never produces an error (a click that misses every
//! handle is a normal event). These types cover construction and the
//! canvas's raster output only.

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// Shape Errors
// ============================================================================

/// Errors raised while building shapes or their styles
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("polygon needs at least one side")]
    #[diagnostic(
        code(drawboard::shape::no_sides),
        help("a polygon with zero sides has no vertices to edit")
    )]
    NoSides,

    #[error("invalid color: {value}")]
    #[diagnostic(
        code(drawboard::shape::invalid_color),
        help("use a name like `black`, `#rgb`, `#rrggbb`, `rgb(r,g,b)` or `rgba(r,g,b,a)`")
    )]
    InvalidColor { value: String },
}

// ============================================================================
// Surface Errors
// ============================================================================

/// Errors raised by the raster canvas
#[derive(Error, Diagnostic, Debug)]
pub enum SurfaceError {
    #[error("invalid canvas size: {width}x{height}")]
    #[diagnostic(code(drawboard::surface::invalid_size))]
    InvalidSize { width: u32, height: u32 },

    #[error("failed to encode png: {message}")]
    #[diagnostic(code(drawboard::surface::encode))]
    Encode { message: String },

    #[error(transparent)]
    #[diagnostic(code(drawboard::surface::io))]
    Io(#[from] std::io::Error),
}
