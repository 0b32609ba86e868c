//! Flat per-cell movement costs over a rectangular grid.

use strider_core::{Cell, Range};

use crate::PathError;
use crate::traits::CostModel;

/// Sentinel cost marking a non-traversable cell in the flat cost array.
pub const BLOCKED: f64 = -1.0;

/// Immutable grid of per-cell movement costs, indexed `row * width + col`.
///
/// Built once per map load and replaced wholesale on reload. Shared
/// references may be handed to any number of searches.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridCostData", into = "GridCostData")
)]
pub struct GridCostModel {
    bounds: Range,
    costs: Vec<f64>,
}

/// Cells are addressed with `i32` coordinates.
fn sized_bounds(width: u32, height: u32) -> Result<Range, PathError> {
    let dim = |d: u32| {
        i32::try_from(d).map_err(|_| PathError::DimensionMismatch {
            expected: i32::MAX as usize,
            actual: d as usize,
        })
    };
    Ok(Range::sized(dim(width)?, dim(height)?))
}

impl GridCostModel {
    /// Build a model from terrain-supplier output.
    ///
    /// Every entry must be a finite non-negative cost or exactly [`BLOCKED`].
    pub fn new(width: u32, height: u32, costs: Vec<f64>) -> Result<Self, PathError> {
        let bounds = sized_bounds(width, height)?;
        let expected = width as usize * height as usize;
        if costs.len() != expected {
            return Err(PathError::DimensionMismatch {
                expected,
                actual: costs.len(),
            });
        }
        if let Some((index, &cost)) = costs
            .iter()
            .enumerate()
            .find(|&(_, &c)| c != BLOCKED && !(c.is_finite() && c >= 0.0))
        {
            return Err(PathError::InvalidCost { index, cost });
        }
        Ok(Self { bounds, costs })
    }

    /// A grid where every cell costs `cost`.
    pub fn uniform(width: u32, height: u32, cost: f64) -> Result<Self, PathError> {
        Self::new(width, height, vec![cost; width as usize * height as usize])
    }

    /// Build a model by evaluating `f` for every cell in row-major order.
    pub fn from_fn(
        width: u32,
        height: u32,
        f: impl FnMut(Cell) -> f64,
    ) -> Result<Self, PathError> {
        let costs = sized_bounds(width, height)?.iter().map(f).collect();
        Self::new(width, height, costs)
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Linear id of `cell`, or `None` when out of bounds.
    #[inline]
    pub fn index(&self, cell: Cell) -> Option<usize> {
        if !self.bounds.contains(cell) {
            return None;
        }
        Some(cell.row as usize * self.width() as usize + cell.col as usize)
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn cell(&self, index: usize) -> Cell {
        let w = self.width() as usize;
        Cell::new((index % w) as i32, (index / w) as i32)
    }

    /// The raw cost array, blocked cells included as [`BLOCKED`].
    pub fn costs(&self) -> &[f64] {
        &self.costs
    }
}

impl CostModel for GridCostModel {
    #[inline]
    fn bounds(&self) -> Range {
        self.bounds
    }

    fn cost_at(&self, cell: Cell) -> Result<Option<f64>, PathError> {
        let idx = self.index(cell).ok_or(PathError::OutOfBounds {
            cell,
            bounds: self.bounds,
        })?;
        let cost = self.costs[idx];
        Ok(if cost == BLOCKED { None } else { Some(cost) })
    }
}

/// Serialized form of [`GridCostModel`]; validated on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridCostData {
    width: u32,
    height: u32,
    costs: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridCostData> for GridCostModel {
    type Error = PathError;

    fn try_from(data: GridCostData) -> Result<Self, PathError> {
        GridCostModel::new(data.width, data.height, data.costs)
    }
}

#[cfg(feature = "serde")]
impl From<GridCostModel> for GridCostData {
    fn from(model: GridCostModel) -> Self {
        Self {
            width: model.width() as u32,
            height: model.height() as u32,
            costs: model.costs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GridCostModel {
        #[rustfmt::skip]
        let costs = vec![
            1.0, 2.0,     3.0,
            1.0, BLOCKED, 0.0,
        ];
        GridCostModel::new(3, 2, costs).unwrap()
    }

    #[test]
    fn cost_lookup_is_row_major() {
        let m = sample();
        assert_eq!(m.width(), 3);
        assert_eq!(m.height(), 2);
        assert_eq!(m.cost_at(Cell::new(2, 0)), Ok(Some(3.0)));
        assert_eq!(m.cost_at(Cell::new(0, 1)), Ok(Some(1.0)));
        assert_eq!(m.cost_at(Cell::new(1, 1)), Ok(None));
        assert_eq!(m.cost_at(Cell::new(2, 1)), Ok(Some(0.0)));
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let m = sample();
        for c in [Cell::new(-1, 0), Cell::new(3, 0), Cell::new(0, 2)] {
            assert_eq!(
                m.cost_at(c),
                Err(PathError::OutOfBounds {
                    cell: c,
                    bounds: Range::sized(3, 2)
                })
            );
            assert!(!m.is_traversable(c));
        }
    }

    #[test]
    fn traversable_excludes_blocked() {
        let m = sample();
        assert!(m.is_traversable(Cell::new(0, 0)));
        assert!(m.is_traversable(Cell::new(2, 1)));
        assert!(!m.is_traversable(Cell::new(1, 1)));
    }

    #[test]
    fn index_round_trips() {
        let m = sample();
        for c in m.bounds().iter() {
            let i = m.index(c).unwrap();
            assert_eq!(m.cell(i), c);
        }
        assert_eq!(m.index(Cell::new(1, 1)), Some(4));
        assert_eq!(m.index(Cell::new(5, 5)), None);
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            GridCostModel::new(3, 3, vec![1.0; 8]),
            Err(PathError::DimensionMismatch {
                expected: 9,
                actual: 8
            })
        );
    }

    #[test]
    fn rejects_dimensions_beyond_i32() {
        let too_wide = i32::MAX as u32 + 1;
        let err = PathError::DimensionMismatch {
            expected: i32::MAX as usize,
            actual: too_wide as usize,
        };
        assert_eq!(GridCostModel::new(too_wide, 0, Vec::new()), Err(err.clone()));
        assert_eq!(GridCostModel::uniform(0, too_wide, 1.0), Err(err.clone()));
        assert_eq!(GridCostModel::from_fn(too_wide, 0, |_| 1.0), Err(err));
        assert!(GridCostModel::new(i32::MAX as u32, 0, Vec::new()).is_ok());
    }

    #[test]
    fn rejects_negative_and_non_finite_costs() {
        assert_eq!(
            GridCostModel::new(2, 1, vec![1.0, -0.5]),
            Err(PathError::InvalidCost {
                index: 1,
                cost: -0.5
            })
        );
        assert!(GridCostModel::new(2, 1, vec![f64::INFINITY, 1.0]).is_err());
        assert!(GridCostModel::new(2, 1, vec![f64::NAN, 1.0]).is_err());
    }

    #[test]
    fn from_fn_visits_row_major() {
        let m = GridCostModel::from_fn(3, 2, |c| (c.row * 10 + c.col) as f64).unwrap();
        assert_eq!(m.costs(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
        assert_eq!(m.len(), 6);
        assert!(!m.is_empty());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn model_round_trip() {
        let m = GridCostModel::new(2, 2, vec![1.0, BLOCKED, 2.5, 0.0]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        let back: GridCostModel = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }

    #[test]
    fn deserialize_validates() {
        let json = r#"{"width":2,"height":2,"costs":[1.0,1.0,1.0]}"#;
        assert!(serde_json::from_str::<GridCostModel>(json).is_err());
    }
}
