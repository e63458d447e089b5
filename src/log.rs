//! Logging for gestures and canvas state.
//!
//! `debug!` reports control-point picks, rotations and canvas save depth.
//! `warn!` reports gesture calls made out of order in release builds and a
//! `restore` with nothing saved.
//!
//! With the `tracing` feature these are the `tracing` macros. Without it
//! they expand to nothing, so a pointer-move handler pays nothing for them.
//! Call them as statements.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, warn};
