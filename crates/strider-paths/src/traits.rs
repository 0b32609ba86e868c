use strider_core::{Cell, Range};

use crate::PathError;

/// Read-only terrain interface consumed by the search and the route
/// helpers.
///
/// Implementations must be immutable for the duration of a query; nothing in
/// this crate mutates a model.
pub trait CostModel {
    /// The grid rectangle covered by the model.
    fn bounds(&self) -> Range;

    /// Movement cost of entering `cell`: `Ok(Some(cost))` for a traversable
    /// cell, `Ok(None)` for a blocked one, and [`PathError::OutOfBounds`]
    /// outside [`bounds`](Self::bounds).
    fn cost_at(&self, cell: Cell) -> Result<Option<f64>, PathError>;

    /// Whether `cell` is in bounds and not blocked.
    fn is_traversable(&self, cell: Cell) -> bool {
        matches!(self.cost_at(cell), Ok(Some(_)))
    }
}
