use strider_core::Vec2;
use strider_paths::AStar;

use crate::MarchError;

/// Tunables for a [`Mover`](crate::Mover).
///
/// With the `serde` feature every field is optional when deserializing;
/// missing fields take their [`Default`] value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MarchConfig {
    /// Size of one grid cell in continuous units.
    pub cell_size: Vec2,
    /// Movement allowance restored at the start of every turn.
    pub moves_per_turn: f64,
    /// Continuous units travelled per frame while stepping.
    pub speed: f64,
    /// Node-expansion cap for each search; `None` searches exhaustively.
    pub max_expansions: Option<usize>,
}

impl Default for MarchConfig {
    fn default() -> Self {
        Self {
            cell_size: Vec2::new(32.0, 32.0),
            moves_per_turn: 10.0,
            speed: 2.0,
            max_expansions: None,
        }
    }
}

impl MarchConfig {
    /// Reject values the planner cannot work with.
    pub fn validate(&self) -> Result<(), MarchError> {
        strider_paths::check_cell_size(self.cell_size)?;
        if !(self.moves_per_turn.is_finite() && self.moves_per_turn >= 0.0) {
            return Err(MarchError::Config(format!(
                "moves_per_turn must be finite and non-negative, got {}",
                self.moves_per_turn
            )));
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(MarchError::Config(format!(
                "speed must be finite and positive, got {}",
                self.speed
            )));
        }
        Ok(())
    }

    /// The search configured with this config's expansion cap.
    pub fn search(&self) -> AStar {
        let mut astar = AStar::new();
        astar.set_max_expansions(self.max_expansions);
        astar
    }
}
