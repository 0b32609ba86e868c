//! Splitting a waypoint sequence by this turn's movement allowance.

use strider_core::Vec2;

use crate::PathError;
use crate::route::{Waypoint, cost_between};
use crate::traits::CostModel;

/// A route split into the part affordable this turn and the part deferred to
/// later turns.
///
/// When `deferred` is non-empty its first point repeats the last affordable
/// point so the two polylines join without a gap.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segmentation {
    pub affordable: Vec<Waypoint>,
    pub deferred: Vec<Waypoint>,
    /// Allowance consumed by the affordable part.
    pub spent: f64,
}

impl Segmentation {
    /// Whether the whole route fits in this turn's allowance.
    pub fn is_fully_affordable(&self) -> bool {
        self.deferred.is_empty()
    }

    /// The last waypoint of the route, if any.
    pub fn destination(&self) -> Option<Waypoint> {
        self.deferred.last().or(self.affordable.last()).copied()
    }

    /// The waypoint following the route origin, if any.
    pub fn next_waypoint(&self) -> Option<Waypoint> {
        self.affordable
            .get(1)
            .or_else(|| self.deferred.get(1))
            .copied()
    }

    /// Whether there is nothing to draw or walk.
    pub fn is_empty(&self) -> bool {
        self.affordable.len() < 2 && self.deferred.is_empty()
    }
}

/// Partition `waypoints` into an affordable prefix and a deferred suffix.
///
/// Steps are accepted while `allowance - step - spent >= 0`, so a step that
/// uses the allowance up exactly is still affordable. The first waypoint is
/// always affordable; callers anchor it to the agent's live position before
/// calling.
pub fn segment<M: CostModel>(
    waypoints: &[Waypoint],
    allowance: f64,
    model: &M,
    cell_size: Vec2,
) -> Result<Segmentation, PathError> {
    // Also rejects NaN.
    if !(allowance >= 0.0) {
        return Err(PathError::InvalidAllowance(allowance));
    }
    let Some(&origin) = waypoints.first() else {
        return Ok(Segmentation::default());
    };

    let mut affordable = vec![origin];
    let mut spent = 0.0;
    let mut i = 0;
    while i + 1 < waypoints.len() {
        let step = cost_between(waypoints[i].pos, waypoints[i + 1].pos, model, cell_size)?;
        // `allowance - step - spent >= 0`, summed in `travel_cost` order.
        let next = spent + step;
        if next > allowance {
            break;
        }
        affordable.push(waypoints[i + 1]);
        spent = next;
        i += 1;
    }

    let deferred = if i + 1 < waypoints.len() {
        waypoints[i..].to_vec()
    } else {
        Vec::new()
    };

    log::trace!(
        "segmented {} waypoints: {} affordable, {} deferred, spent {spent:.3} of {allowance:.3}",
        waypoints.len(),
        affordable.len(),
        deferred.len()
    );

    Ok(Segmentation {
        affordable,
        deferred,
        spent,
    })
}
