//! Geometry primitives: [`Cell`], [`Range`] and [`Vec2`].
//!
//! `Cell` and `Range` address the discrete grid; `Vec2` is a continuous
//! point (pixels or abstract distance units) used for waypoints and agent
//! positions.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Sub};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A discrete grid coordinate. Columns grow right, rows grow down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { col: 0, row: 0 };

    /// Create a new cell.
    #[inline]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Return a cell shifted by (dc, dr).
    #[inline]
    pub const fn shift(self, dc: i32, dr: i32) -> Self {
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }

    /// Whether `other` is one of the eight cells surrounding `self`.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        let d = other - self;
        d != Cell::ZERO && d.col.abs() <= 1 && d.row.abs() <= 1
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

impl Add for Cell {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.col + rhs.col, self.row + rhs.row)
    }
}

impl Sub for Cell {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.col - rhs.col, self.row - rhs.row)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max) of cells.
///
/// All empty ranges are considered equal.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Cell,
    pub max: Cell,
}

impl PartialEq for Range {
    fn eq(&self, other: &Self) -> bool {
        (self.min == other.min && self.max == other.max) || (self.is_empty() && other.is_empty())
    }
}

impl Eq for Range {}

impl Hash for Range {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_empty() {
            Cell::ZERO.hash(state);
            Cell::ZERO.hash(state);
        } else {
            self.min.hash(state);
            self.max.hash(state);
        }
    }
}

impl Range {
    /// Create a new range from two corners, canonicalized so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(c0: i32, r0: i32, c1: i32, r1: i32) -> Self {
        Self {
            min: Cell::new(c0.min(c1), r0.min(r1)),
            max: Cell::new(c0.max(c1), r0.max(r1)),
        }
    }

    /// The range `[0, width) x [0, height)`.
    #[inline]
    pub fn sized(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Number of columns.
    #[inline]
    pub fn width(self) -> i32 {
        self.max.col - self.min.col
    }

    /// Number of rows.
    #[inline]
    pub fn height(self) -> i32 {
        self.max.row - self.min.row
    }

    /// Total number of cells in the range.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the range has zero or negative area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.col >= self.max.col || self.min.row >= self.max.row
    }

    /// Whether `c` is inside the half-open range.
    #[inline]
    pub fn contains(self, c: Cell) -> bool {
        c.col >= self.min.col && c.col < self.max.col && c.row >= self.min.row && c.row < self.max.row
    }

    /// Row-major iterator over every cell in the range.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Range {
    type Item = Cell;
    type IntoIter = RangeIter;
    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

/// Row-major iterator over the cells in a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    cur: Cell,
}

impl Iterator for RangeIter {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        if self.cur.row >= self.range.max.row || self.range.is_empty() {
            return None;
        }
        let c = self.cur;
        self.cur.col += 1;
        if self.cur.col >= self.range.max.col {
            self.cur.col = self.range.min.col;
            self.cur.row += 1;
        }
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.range.is_empty() || self.cur.row >= self.range.max.row {
            return (0, Some(0));
        }
        let w = self.range.width() as usize;
        let remaining_in_row = (self.range.max.col - self.cur.col) as usize;
        let remaining_rows = (self.range.max.row - self.cur.row - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for RangeIter {}

// ---------------------------------------------------------------------------
// Vec2
// ---------------------------------------------------------------------------

/// A continuous 2D point or vector.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Vec2) -> f64 {
        (other - self).length()
    }

    /// Arithmetic midpoint of the segment `self`-`other`.
    #[inline]
    pub fn midpoint(self, other: Vec2) -> Vec2 {
        Vec2::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Component-wise division, e.g. to express a point in cell units.
    #[inline]
    pub fn div_components(self, by: Vec2) -> Vec2 {
        Vec2::new(self.x / by.x, self.y / by.y)
    }

    /// Whether both components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn cell_arithmetic() {
        let a = Cell::new(1, 2);
        let b = Cell::new(3, 4);
        assert_eq!(a + b, Cell::new(4, 6));
        assert_eq!(b - a, Cell::new(2, 2));
        assert_eq!(a.shift(-1, 1), Cell::new(0, 3));
    }

    #[test]
    fn cells_differ_when_either_coordinate_differs() {
        assert_ne!(Cell::new(1, 2), Cell::new(2, 1));
        assert_ne!(Cell::new(1, 2), Cell::new(1, 3));
    }

    #[test]
    fn cell_adjacency() {
        let c = Cell::new(5, 5);
        assert!(c.is_adjacent(Cell::new(6, 6)));
        assert!(c.is_adjacent(Cell::new(5, 4)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Cell::new(7, 5)));
    }

    #[test]
    fn cell_order_is_row_major() {
        let mut cells = vec![Cell::new(2, 0), Cell::new(0, 1), Cell::new(1, 0)];
        cells.sort();
        assert_eq!(cells, vec![Cell::new(1, 0), Cell::new(2, 0), Cell::new(0, 1)]);
    }

    #[test]
    fn range_basics() {
        let r = Range::sized(3, 2);
        assert_eq!(r.width(), 3);
        assert_eq!(r.height(), 2);
        assert_eq!(r.len(), 6);
        assert!(r.contains(Cell::new(0, 0)));
        assert!(r.contains(Cell::new(2, 1)));
        assert!(!r.contains(Cell::new(3, 0)));
        assert!(!r.contains(Cell::new(0, 2)));
        assert!(!r.contains(Cell::new(-1, 0)));
    }

    #[test]
    fn range_auto_canonicalize() {
        let r = Range::new(3, 2, 0, 0);
        assert_eq!(r.min, Cell::new(0, 0));
        assert_eq!(r.max, Cell::new(3, 2));
    }

    #[test]
    fn range_iter_row_major() {
        let r = Range::sized(3, 2);
        let cells: Vec<_> = r.iter().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(r.iter().len(), 6);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[3], Cell::new(0, 1));
        assert_eq!(cells[5], Cell::new(2, 1));
    }

    #[test]
    fn empty_ranges_compare_and_hash_equal() {
        let a = Range::default();
        let b = Range {
            min: Cell::new(5, 5),
            max: Cell::new(5, 5),
        };
        assert_eq!(a, b);
        assert_eq!(a.len(), 0);
        assert_eq!(b.iter().count(), 0);
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn vec2_distance_and_midpoint() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.midpoint(b), Vec2::new(1.5, 2.0));
        assert_eq!(b.div_components(Vec2::new(3.0, 2.0)), Vec2::new(1.0, 2.0));
        assert_eq!((b - a) * 2.0, Vec2::new(6.0, 8.0));
        assert!(!Vec2::new(f64::NAN, 0.0).is_finite());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn cell_round_trip() {
        let c = Cell::new(3, 7);
        let json = serde_json::to_string(&c).unwrap();
        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }

    #[test]
    fn vec2_round_trip() {
        let v = Vec2::new(16.0, 48.5);
        let json = serde_json::to_string(&v).unwrap();
        let back: Vec2 = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
