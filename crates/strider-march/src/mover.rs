//! A single agent moving across the map one turn at a time.
//!
//! The mover owns its route and segmentation and rebuilds both from scratch
//! whenever its destination, position, or allowance changes: after every
//! completed step and at every turn boundary. A step in flight is never
//! replanned.

use strider_core::{Cell, Vec2};
use strider_paths::{
    CostModel, Route, Segmentation, anchor, cell_at, cell_center, cost_between, segment,
};

use crate::config::MarchConfig;
use crate::error::MarchError;
use crate::overlay::PathOverlay;

/// Result of [`Mover::plan_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutcome {
    /// A route was found and segmented.
    Planned,
    /// The destination is the agent's own cell; any previous plan was
    /// dropped.
    AlreadyThere,
}

/// What happened during one [`Mover::update`] frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveEvent {
    /// No step in flight, or a step finished after its plan was dropped.
    Idle,
    /// Still travelling toward the next waypoint.
    Moving,
    /// Reached the next cell and started the following step.
    Stepped(Cell),
    /// Reached the next cell but cannot afford the following step this turn.
    OutOfMoves(Cell),
    /// Reached the final destination.
    Arrived(Cell),
}

#[derive(Debug, Clone)]
struct Plan {
    destination: Cell,
    route: Route,
    segmentation: Segmentation,
}

#[derive(Debug, Clone, Copy)]
struct Step {
    target: Vec2,
    cost: f64,
}

/// An agent with a continuous position and a per-turn movement allowance.
#[derive(Debug, Clone)]
pub struct Mover {
    config: MarchConfig,
    position: Vec2,
    moves_left: f64,
    plan: Option<Plan>,
    step: Option<Step>,
}

impl Mover {
    /// Create a mover whose centre is at `position`, with a full allowance.
    pub fn new(position: Vec2, config: MarchConfig) -> Result<Self, MarchError> {
        config.validate()?;
        Ok(Self {
            config,
            position,
            moves_left: config.moves_per_turn,
            plan: None,
            step: None,
        })
    }

    /// Create a mover standing at the centre of `cell`.
    pub fn at_cell(cell: Cell, config: MarchConfig) -> Result<Self, MarchError> {
        Self::new(cell_center(cell, config.cell_size), config)
    }

    pub fn config(&self) -> &MarchConfig {
        &self.config
    }

    /// Live continuous position of the agent's centre.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// The cell the agent's centre is in.
    pub fn cell(&self) -> Cell {
        cell_at(self.position, self.config.cell_size)
    }

    /// Allowance remaining this turn.
    pub fn moves_left(&self) -> f64 {
        self.moves_left
    }

    /// Whether a step is in flight.
    pub fn is_moving(&self) -> bool {
        self.step.is_some()
    }

    /// The planned final destination, if any.
    pub fn destination(&self) -> Option<Cell> {
        self.plan.as_ref().map(|p| p.destination)
    }

    /// The current route, if any.
    pub fn route(&self) -> Option<&Route> {
        self.plan.as_ref().map(|p| &p.route)
    }

    /// The current split of the route by this turn's allowance, if any.
    pub fn segmentation(&self) -> Option<&Segmentation> {
        self.plan.as_ref().map(|p| &p.segmentation)
    }

    /// Drop the plan and any step in flight.
    pub fn clear(&mut self) {
        self.plan = None;
        self.step = None;
    }

    /// Plan a route from the agent's cell to `destination`.
    ///
    /// On any error, including [`NoPathFound`](strider_paths::PathError::NoPathFound),
    /// the previous plan is dropped.
    pub fn plan_to<M: CostModel>(
        &mut self,
        model: &M,
        destination: Cell,
    ) -> Result<PlanOutcome, MarchError> {
        let here = self.cell();
        if destination == here {
            self.plan = None;
            return Ok(PlanOutcome::AlreadyThere);
        }
        match self.build_plan(model, here, destination) {
            Ok(plan) => {
                log::debug!(
                    "planned {here} -> {destination}: {} cells, cost {:.2}, {:.2} affordable of {:.2}",
                    plan.route.len(),
                    plan.route.total_cost(),
                    plan.segmentation.spent,
                    self.moves_left
                );
                self.plan = Some(plan);
                Ok(PlanOutcome::Planned)
            }
            Err(e) => {
                log::debug!("planning {here} -> {destination} failed: {e}");
                self.plan = None;
                Err(e)
            }
        }
    }

    fn build_plan<M: CostModel>(
        &self,
        model: &M,
        here: Cell,
        destination: Cell,
    ) -> Result<Plan, MarchError> {
        let cell_size = self.config.cell_size;
        let route = self.config.search().find_path(model, here, destination)?;
        let mut waypoints = route.waypoints(cell_size);
        anchor(&mut waypoints, self.position);
        let segmentation = segment(&waypoints, self.moves_left, model, cell_size)?;
        Ok(Plan {
            destination,
            route,
            segmentation,
        })
    }

    /// Start stepping toward the next waypoint if this turn's allowance
    /// covers it. Returns whether the agent is now moving.
    pub fn begin_moving<M: CostModel>(&mut self, model: &M) -> Result<bool, MarchError> {
        if self.step.is_some() {
            return Ok(true);
        }
        let plan = self.plan.as_ref().ok_or(MarchError::NotPlanned)?;
        let Some(next) = plan.segmentation.next_waypoint() else {
            return Ok(false);
        };
        let cost = cost_between(self.position, next.pos, model, self.config.cell_size)?;
        if self.moves_left - cost >= 0.0 {
            self.step = Some(Step {
                target: next.pos,
                cost,
            });
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Advance one frame.
    pub fn update<M: CostModel>(&mut self, model: &M) -> Result<MoveEvent, MarchError> {
        let Some(step) = self.step else {
            return Ok(MoveEvent::Idle);
        };

        let to_target = step.target - self.position;
        let dist = to_target.length();
        if dist > self.config.speed {
            self.position = self.position + to_target * (self.config.speed / dist);
            return Ok(MoveEvent::Moving);
        }

        self.position = step.target;
        self.step = None;
        self.moves_left -= step.cost;
        let here = self.cell();
        log::debug!(
            "stepped into {here} for {:.2}, {:.2} moves left",
            step.cost,
            self.moves_left
        );

        // The plan was dropped mid-step.
        let Some(destination) = self.destination() else {
            return Ok(MoveEvent::Idle);
        };
        if destination == here {
            self.plan = None;
            log::info!("arrived at {here} with {:.2} moves left", self.moves_left);
            return Ok(MoveEvent::Arrived(here));
        }

        self.plan_to(model, destination)?;
        if self.begin_moving(model)? {
            Ok(MoveEvent::Stepped(here))
        } else {
            Ok(MoveEvent::OutOfMoves(here))
        }
    }

    /// Restore the full allowance and re-plan toward the current destination.
    ///
    /// Movement does not resume on its own; call
    /// [`begin_moving`](Self::begin_moving) again.
    pub fn new_turn<M: CostModel>(&mut self, model: &M) -> Result<(), MarchError> {
        self.moves_left = self.config.moves_per_turn;
        log::debug!("new turn at {} with {:.2} moves", self.cell(), self.moves_left);
        if self.step.is_some() {
            return Ok(());
        }
        if let Some(destination) = self.destination() {
            self.plan_to(model, destination)?;
        }
        Ok(())
    }

    /// Render data for the current plan, anchored at the live position.
    pub fn overlay(&self) -> Option<PathOverlay> {
        let plan = self.plan.as_ref()?;
        PathOverlay::from_segmentation(&plan.segmentation, self.position)
    }

    /// Whether `point` hits the destination marker of the current plan.
    pub fn marker_hit(&self, point: Vec2) -> bool {
        self.overlay()
            .is_some_and(|o| o.marker_hit(point, self.config.cell_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strider_paths::GridCostModel;

    fn config() -> MarchConfig {
        MarchConfig {
            cell_size: Vec2::new(1.0, 1.0),
            moves_per_turn: 3.0,
            speed: 0.25,
            max_expansions: None,
        }
    }

    #[test]
    fn new_mover_has_full_allowance() {
        let m = Mover::at_cell(Cell::new(2, 3), config()).unwrap();
        assert_eq!(m.position(), Vec2::new(2.5, 3.5));
        assert_eq!(m.cell(), Cell::new(2, 3));
        assert_eq!(m.moves_left(), 3.0);
        assert!(!m.is_moving());
        assert!(m.overlay().is_none());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let bad = MarchConfig {
            speed: -1.0,
            ..config()
        };
        assert!(Mover::new(Vec2::ZERO, bad).is_err());
    }

    #[test]
    fn planning_own_cell_drops_the_plan() {
        let grid = GridCostModel::uniform(5, 1, 1.0).unwrap();
        let mut m = Mover::at_cell(Cell::new(0, 0), config()).unwrap();
        assert_eq!(m.plan_to(&grid, Cell::new(4, 0)).unwrap(), PlanOutcome::Planned);
        assert_eq!(m.destination(), Some(Cell::new(4, 0)));
        assert_eq!(m.plan_to(&grid, Cell::new(0, 0)).unwrap(), PlanOutcome::AlreadyThere);
        assert_eq!(m.destination(), None);
    }

    #[test]
    fn begin_moving_without_plan_fails() {
        let grid = GridCostModel::uniform(2, 1, 1.0).unwrap();
        let mut m = Mover::at_cell(Cell::new(0, 0), config()).unwrap();
        assert_eq!(m.begin_moving(&grid), Err(MarchError::NotPlanned));
        assert_eq!(m.update(&grid).unwrap(), MoveEvent::Idle);
    }

    #[test]
    fn partial_step_moves_by_speed() {
        let grid = GridCostModel::uniform(3, 1, 1.0).unwrap();
        let mut m = Mover::at_cell(Cell::new(0, 0), config()).unwrap();
        m.plan_to(&grid, Cell::new(2, 0)).unwrap();
        assert!(m.begin_moving(&grid).unwrap());
        assert_eq!(m.update(&grid).unwrap(), MoveEvent::Moving);
        assert_eq!(m.position(), Vec2::new(0.75, 0.5));
        // The overlay follows the agent mid-step.
        let o = m.overlay().unwrap();
        assert_eq!(o.affordable[0], Vec2::new(0.75, 0.5));
        // No charge until the step completes.
        assert_eq!(m.moves_left(), 3.0);
    }

    #[test]
    fn step_finishing_without_a_plan_is_idle() {
        let grid = GridCostModel::uniform(3, 1, 1.0).unwrap();
        let mut m = Mover::at_cell(Cell::new(0, 0), config()).unwrap();
        m.plan_to(&grid, Cell::new(2, 0)).unwrap();
        assert!(m.begin_moving(&grid).unwrap());
        assert_eq!(m.update(&grid).unwrap(), MoveEvent::Moving);
        assert_eq!(m.plan_to(&grid, Cell::new(0, 0)).unwrap(), PlanOutcome::AlreadyThere);

        // The step in flight still completes and is charged.
        let mut event = MoveEvent::Moving;
        while event == MoveEvent::Moving {
            event = m.update(&grid).unwrap();
        }
        assert_eq!(event, MoveEvent::Idle);
        assert_eq!(m.cell(), Cell::new(1, 0));
        assert_eq!(m.moves_left(), 2.0);
        assert!(!m.is_moving());
    }
}
