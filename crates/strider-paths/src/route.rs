//! Routes, waypoints, and continuous-space cost evaluation.

use strider_core::{Cell, Vec2};

use crate::PathError;
use crate::traits::CostModel;

/// An ordered chain of cells produced by one successful search, starting at
/// the search's start cell.
///
/// `costs[i]` is the accumulated search cost to reach `cells[i]`; the start
/// cell's own cost is never charged, so `costs[0] == 0`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    cells: Vec<Cell>,
    costs: Vec<f64>,
}

impl Route {
    pub(crate) fn new(cells: Vec<Cell>, costs: Vec<f64>) -> Self {
        debug_assert_eq!(cells.len(), costs.len());
        Self { cells, costs }
    }

    /// The cells in travel order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Accumulated cost to reach each cell.
    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    /// Cost of the whole route; zero for an empty route.
    pub fn total_cost(&self) -> f64 {
        self.costs.last().copied().unwrap_or(0.0)
    }

    /// Number of cells, start included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the route is empty (start and goal were the same cell).
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// First cell of the route.
    pub fn start(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    /// Last cell of the route.
    pub fn goal(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    /// Whether the route passes through `cell`.
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Shorthand for [`to_waypoints`].
    pub fn waypoints(&self, cell_size: Vec2) -> Vec<Waypoint> {
        to_waypoints(self, cell_size)
    }
}

/// A continuous point on a route with the accumulated cost to reach it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub pos: Vec2,
    pub cost: f64,
}

impl Waypoint {
    pub const fn new(pos: Vec2, cost: f64) -> Self {
        Self { pos, cost }
    }
}

/// Map each cell of `route` to its centre, preserving order.
pub fn to_waypoints(route: &Route, cell_size: Vec2) -> Vec<Waypoint> {
    route
        .cells
        .iter()
        .zip(&route.costs)
        .map(|(&c, &cost)| Waypoint::new(cell_center(c, cell_size), cost))
        .collect()
}

/// Move the first waypoint onto the agent's live position.
pub fn anchor(waypoints: &mut [Waypoint], position: Vec2) {
    if let Some(first) = waypoints.first_mut() {
        first.pos = position;
    }
}

/// Centre of `cell` in continuous coordinates.
#[inline]
pub fn cell_center(cell: Cell, cell_size: Vec2) -> Vec2 {
    cell_origin(cell, cell_size) + cell_size / 2.0
}

/// Upper-left corner of `cell` in continuous coordinates.
#[inline]
pub fn cell_origin(cell: Cell, cell_size: Vec2) -> Vec2 {
    Vec2::new(cell.col as f64 * cell_size.x, cell.row as f64 * cell_size.y)
}

/// The cell owning continuous point `p`. Points left of or above the origin
/// map to negative cells.
#[inline]
pub fn cell_at(p: Vec2, cell_size: Vec2) -> Cell {
    Cell::new(
        (p.x / cell_size.x).floor() as i32,
        (p.y / cell_size.y).floor() as i32,
    )
}

/// Check that `cell_size` is usable for coordinate conversion.
pub fn check_cell_size(cell_size: Vec2) -> Result<(), PathError> {
    if cell_size.is_finite() && cell_size.x > 0.0 && cell_size.y > 0.0 {
        Ok(())
    } else {
        Err(PathError::InvalidCellSize(cell_size))
    }
}

/// Movement cost between two continuous points that are the same corner, or
/// the centres, of two adjacent cells.
///
/// Both points are normalized to cell units. Each half of the segment is
/// charged at the cost of the cell its endpoint lies in:
/// `dist(a, mid) * cost(a) + dist(mid, b) * cost(b)`.
///
/// An agent may stand on a blocked cell, so a blocked `p0` is charged at the
/// cost of the cell being entered. A blocked `p1` is
/// [`PathError::Impassable`].
pub fn cost_between<M: CostModel>(
    p0: Vec2,
    p1: Vec2,
    model: &M,
    cell_size: Vec2,
) -> Result<f64, PathError> {
    check_cell_size(cell_size)?;
    let cell1 = cell_at(p1, cell_size);
    let cost1 = model.cost_at(cell1)?.ok_or(PathError::Impassable(cell1))?;
    let cost0 = model.cost_at(cell_at(p0, cell_size))?.unwrap_or(cost1);

    let a = p0.div_components(cell_size);
    let b = p1.div_components(cell_size);
    let mid = a.midpoint(b);

    Ok(a.distance(mid) * cost0 + mid.distance(b) * cost1)
}

/// Sum of [`cost_between`] over consecutive waypoints.
///
/// This is the allowance [`segment`](crate::segment) needs to afford the
/// whole sequence. It differs from [`Route::total_cost`] on non-uniform
/// terrain because each step is split at the cell boundary.
pub fn travel_cost<M: CostModel>(
    waypoints: &[Waypoint],
    model: &M,
    cell_size: Vec2,
) -> Result<f64, PathError> {
    waypoints.windows(2).try_fold(0.0, |total, w| {
        Ok(total + cost_between(w[0].pos, w[1].pos, model, cell_size)?)
    })
}
