use strider_core::Cell;

/// Step multiplier for a diagonal move.
pub const DIAGONAL: f64 = std::f64::consts::SQRT_2;

/// Step multiplier for an orthogonal move.
pub const ORTHOGONAL: f64 = 1.0;

/// Expansion order: the four orthogonal steps, then the four diagonals.
///
/// The order is part of the search's tie-break behaviour, so routes only stay
/// reproducible as long as it does not change.
const STEPS: [(i32, i32, f64); 8] = [
    (1, 0, ORTHOGONAL),
    (-1, 0, ORTHOGONAL),
    (0, 1, ORTHOGONAL),
    (0, -1, ORTHOGONAL),
    (1, 1, DIAGONAL),
    (-1, -1, DIAGONAL),
    (-1, 1, DIAGONAL),
    (1, -1, DIAGONAL),
];

/// Reusable buffer of 8-directional neighbours with their step multipliers.
pub struct Neighbors {
    buf: Vec<(Cell, f64)>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Return the 8-directional neighbours of `c` for which `keep` returns
    /// `true`, each paired with its step multiplier.
    pub fn all(&mut self, c: Cell, keep: impl Fn(Cell) -> bool) -> &[(Cell, f64)] {
        self.buf.clear();
        for (dc, dr, multiplier) in STEPS {
            let n = c.shift(dc, dr);
            if keep(n) {
                self.buf.push((n, multiplier));
            }
        }
        &self.buf
    }
}
