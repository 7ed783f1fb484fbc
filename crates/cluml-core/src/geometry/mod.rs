//! Geometry primitives shared by every diagram component.
//!
//! All math is done in `f64`. Canvas coordinates follow screen convention:
//! x grows to the right, y grows downward.

mod line;
mod rect;
mod vector;

pub use line::Line;
pub use rect::{wrap_side, Rect};
pub use vector::Vector;
