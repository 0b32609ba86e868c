use std::cmp::Ordering;
use std::collections::BinaryHeap;

use strider_core::{Cell, Range};

use crate::PathError;
use crate::distance::manhattan;
use crate::neighbors::Neighbors;
use crate::route::Route;
use crate::traits::CostModel;

const NO_PARENT: usize = usize::MAX;

#[derive(Clone, Copy, PartialEq, Eq)]
enum NodeState {
    Unseen,
    Open,
    Closed,
}

/// Arena slot for one grid cell, addressed by the cell's linear id.
#[derive(Clone)]
struct Node {
    g: f64,
    parent: usize,
    state: NodeState,
    /// Insertion stamp of the node's live open-set entry.
    seq: u64,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0.0,
            parent: NO_PARENT,
            state: NodeState::Unseen,
            seq: 0,
        }
    }
}

/// Open-set entry. Lowest score pops first; equal scores pop the most
/// recently inserted entry first.
#[derive(Clone, Copy)]
struct OpenRef {
    idx: usize,
    score: f64,
    seq: u64,
}

impl Ord for OpenRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse on score so BinaryHeap (max-heap) pops the smallest first.
        other
            .score
            .total_cmp(&self.score)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for OpenRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenRef {}

/// Linear ids for the cells of a model's bounds.
struct Ids {
    bounds: Range,
    width: usize,
}

impl Ids {
    fn new(bounds: Range) -> Self {
        Self {
            bounds,
            width: bounds.width().max(0) as usize,
        }
    }

    #[inline]
    fn idx(&self, c: Cell) -> usize {
        let x = (c.col - self.bounds.min.col) as usize;
        let y = (c.row - self.bounds.min.row) as usize;
        y * self.width + x
    }

    #[inline]
    fn cell(&self, idx: usize) -> Cell {
        Cell::new(
            (idx % self.width) as i32 + self.bounds.min.col,
            (idx / self.width) as i32 + self.bounds.min.row,
        )
    }
}

/// A* search over an 8-connected weighted grid.
///
/// Entering a cell costs its movement cost, multiplied by √2 for diagonal
/// steps. The heuristic is the Manhattan distance to the goal. The search
/// stops as soon as the goal is generated as a neighbour.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AStar {
    max_expansions: Option<usize>,
}

impl AStar {
    /// A search without an expansion cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Give up with [`PathError::NoPathFound`] after expanding `cap` nodes.
    pub fn with_max_expansions(mut self, cap: usize) -> Self {
        self.max_expansions = Some(cap);
        self
    }

    /// Set or clear the expansion cap.
    pub fn set_max_expansions(&mut self, cap: Option<usize>) {
        self.max_expansions = cap;
    }

    /// The expansion cap, if any.
    pub fn max_expansions(&self) -> Option<usize> {
        self.max_expansions
    }

    /// Compute a route from `start` to `goal`.
    ///
    /// Returns an empty route when `start == goal`. Both cells must lie
    /// inside the model's bounds; a blocked `start` is accepted since the
    /// agent already stands on it.
    pub fn find_path<M: CostModel>(
        &self,
        model: &M,
        start: Cell,
        goal: Cell,
    ) -> Result<Route, PathError> {
        let bounds = model.bounds();
        for cell in [start, goal] {
            if !bounds.contains(cell) {
                return Err(PathError::OutOfBounds { cell, bounds });
            }
        }
        if start == goal {
            return Ok(Route::default());
        }

        let ids = Ids::new(bounds);
        let mut nodes = vec![Node::default(); bounds.len()];
        let mut open: BinaryHeap<OpenRef> = BinaryHeap::new();
        let mut seq: u64 = 0;

        let si = ids.idx(start);
        nodes[si].state = NodeState::Open;
        open.push(OpenRef {
            idx: si,
            score: 0.0,
            seq,
        });

        let mut nbuf = Neighbors::new();
        let mut expansions = 0usize;

        while let Some(current) = open.pop() {
            let ci = current.idx;

            // Skip entries superseded by a cheaper re-insertion.
            if nodes[ci].state != NodeState::Open || nodes[ci].seq != current.seq {
                continue;
            }

            if self.max_expansions.is_some_and(|cap| expansions >= cap) {
                log::debug!(
                    "search {start} -> {goal} gave up after {expansions} expansions"
                );
                return Err(PathError::NoPathFound { start, goal });
            }
            expansions += 1;

            nodes[ci].state = NodeState::Closed;
            let current_g = nodes[ci].g;
            let cp = ids.cell(ci);
            log::trace!("expand {cp} g={current_g:.3} score={:.3}", current.score);

            for &(np, multiplier) in nbuf.all(cp, |c| bounds.contains(c)) {
                let Some(cost) = model.cost_at(np)? else {
                    continue;
                };
                let g = current_g + cost * multiplier;
                let ni = ids.idx(np);

                if np == goal {
                    nodes[ni].g = g;
                    nodes[ni].parent = ci;
                    log::debug!(
                        "search {start} -> {goal} found route cost {g:.3} after {expansions} expansions"
                    );
                    return Ok(trace_route(&nodes, &ids, ni));
                }

                match nodes[ni].state {
                    NodeState::Closed => continue,
                    NodeState::Open if g >= nodes[ni].g => continue,
                    _ => {}
                }

                seq += 1;
                nodes[ni] = Node {
                    g,
                    parent: ci,
                    state: NodeState::Open,
                    seq,
                };
                open.push(OpenRef {
                    idx: ni,
                    score: g + manhattan(np, goal) as f64,
                    seq,
                });
            }
        }

        log::debug!("search {start} -> {goal} exhausted after {expansions} expansions");
        Err(PathError::NoPathFound { start, goal })
    }
}

/// Compute a route with an uncapped [`AStar`] search.
pub fn find_path<M: CostModel>(model: &M, start: Cell, goal: Cell) -> Result<Route, PathError> {
    AStar::new().find_path(model, start, goal)
}

/// Walk predecessor links from `goal_idx` back to the start.
fn trace_route(nodes: &[Node], ids: &Ids, goal_idx: usize) -> Route {
    let mut cells = Vec::new();
    let mut costs = Vec::new();
    let mut ci = goal_idx;
    while ci != NO_PARENT {
        cells.push(ids.cell(ci));
        costs.push(nodes[ci].g);
        ci = nodes[ci].parent;
    }
    cells.reverse();
    costs.reverse();
    Route::new(cells, costs)
}
