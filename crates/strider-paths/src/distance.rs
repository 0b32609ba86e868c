use strider_core::Cell;

/// Manhattan (L1) distance between two cells.
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> i32 {
    (a.col - b.col).abs() + (a.row - b.row).abs()
}
