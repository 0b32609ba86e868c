use strider_core::{Cell, Range, Vec2};

/// Errors reported by the cost model, the search, and the segmenter.
///
/// [`PathError::NoPathFound`] is an ordinary outcome: callers are expected to
/// drop any pending route when they see it. Everything else points at bad
/// input from the call site.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    #[error("cell {cell} lies outside the grid {bounds}")]
    OutOfBounds { cell: Cell, bounds: Range },

    #[error("no traversable route from {start} to {goal}")]
    NoPathFound { start: Cell, goal: Cell },

    #[error("movement allowance must be a non-negative number, got {0}")]
    InvalidAllowance(f64),

    #[error("cell {0} is blocked and has no movement cost")]
    Impassable(Cell),

    #[error("cost {cost} at index {index} is neither non-negative nor the blocked sentinel")]
    InvalidCost { index: usize, cost: f64 },

    /// Wrong cost-array length, or a dimension above `i32::MAX`.
    #[error("grid size mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(Vec2),
}

impl PathError {
    /// Whether this is the expected "no route exists" outcome rather than an
    /// input error.
    pub fn is_no_path(&self) -> bool {
        matches!(self, Self::NoPathFound { .. })
    }
}
