//! Turn-by-turn movement of a single agent.
//!
//! A [`Mover`] plans a route with [`strider_paths`], splits it by the
//! allowance left this turn, and walks it one waypoint at a time. After every
//! completed step the route is planned again from the agent's new cell, and
//! at every turn boundary the allowance is restored and the route re-split.
//!
//! ```
//! use strider_core::Cell;
//! use strider_march::{MarchConfig, MoveEvent, Mover};
//! use strider_paths::GridCostModel;
//!
//! let grid = GridCostModel::uniform(8, 8, 1.0).unwrap();
//! let mut mover = Mover::at_cell(Cell::new(0, 0), MarchConfig::default()).unwrap();
//! mover.plan_to(&grid, Cell::new(3, 0)).unwrap();
//! mover.begin_moving(&grid).unwrap();
//! let mut event = MoveEvent::Moving;
//! while !matches!(event, MoveEvent::Arrived(_)) {
//!     event = mover.update(&grid).unwrap();
//! }
//! assert_eq!(mover.cell(), Cell::new(3, 0));
//! ```

mod config;
mod error;
mod mover;
mod overlay;

pub use config::MarchConfig;
pub use error::MarchError;
pub use mover::{MoveEvent, Mover, PlanOutcome};
pub use overlay::{Marker, MarkerKind, PathOverlay};
