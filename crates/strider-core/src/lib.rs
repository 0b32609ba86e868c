//! **strider-core**: geometry shared by the strider movement-planning crates.
//!
//! This crate provides the value types every other strider crate speaks:
//! discrete grid cells, half-open cell rectangles, and continuous points.

pub mod geom;

pub use geom::{Cell, Range, RangeIter, Vec2};
