//! Movement planning on weighted grids.
//!
//! This crate provides the pieces a turn-based game needs to move an agent
//! across terrain with per-cell movement costs:
//!
//! - **Cost model** ([`GridCostModel`]): an immutable grid of per-cell costs
//!   with a [`BLOCKED`] sentinel for impassable cells.
//! - **A\*** search ([`AStar`], [`find_path`]): an optimal 8-directional
//!   [`Route`] with √2 diagonal steps and a reproducible tie-break.
//! - **Routes** ([`to_waypoints`], [`cost_between`]): cell chains expanded to
//!   continuous waypoints, and the cost of moving between two points.
//! - **Turn budgets** ([`segment`]): a route split into what the agent can
//!   afford this turn and what is deferred to later turns.
//!
//! Searches consume terrain through the [`CostModel`] trait, so any read-only
//! terrain view can stand in for [`GridCostModel`].

mod astar;
mod costmodel;
mod distance;
mod error;
mod neighbors;
mod route;
mod segment;
mod traits;

pub use astar::{AStar, find_path};
pub use costmodel::{BLOCKED, GridCostModel};
pub use distance::manhattan;
pub use error::PathError;
pub use neighbors::{DIAGONAL, Neighbors, ORTHOGONAL};
pub use route::{
    Route, Waypoint, anchor, cell_at, cell_center, cell_origin, check_cell_size, cost_between,
    to_waypoints, travel_cost,
};
pub use segment::{Segmentation, segment};
pub use traits::CostModel;
