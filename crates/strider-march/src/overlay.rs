//! Geometry handed to a renderer: two polylines and a destination marker.

use strider_core::Vec2;
use strider_paths::{Segmentation, cell_at};

/// How the destination marker should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkerKind {
    /// The whole route fits in this turn.
    Reachable,
    /// Part of the route is deferred to later turns.
    Deferred,
}

/// Destination marker at the final waypoint.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marker {
    pub pos: Vec2,
    pub kind: MarkerKind,
}

/// A planned route ready for drawing.
///
/// A polyline with fewer than two points is not drawn and is left empty.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathOverlay {
    pub affordable: Vec<Vec2>,
    pub deferred: Vec<Vec2>,
    pub marker: Marker,
}

impl PathOverlay {
    /// Build the overlay for `seg`, starting the affordable polyline at the
    /// agent's live position. Returns `None` when there is nothing to draw.
    pub fn from_segmentation(seg: &Segmentation, live: Vec2) -> Option<Self> {
        let mut affordable: Vec<Vec2> = seg.affordable.iter().map(|w| w.pos).collect();
        let deferred: Vec<Vec2> = seg.deferred.iter().map(|w| w.pos).collect();

        if affordable.len() > 1 {
            affordable[0] = live;
        } else {
            affordable.clear();
        }

        let marker = if deferred.len() > 1 {
            Marker {
                pos: deferred[deferred.len() - 1],
                kind: MarkerKind::Deferred,
            }
        } else if let Some(&pos) = affordable.last() {
            Marker {
                pos,
                kind: MarkerKind::Reachable,
            }
        } else {
            return None;
        };

        Some(Self {
            affordable,
            deferred: if deferred.len() > 1 { deferred } else { Vec::new() },
            marker,
        })
    }

    /// Whether `point` falls in the same cell as the destination marker.
    pub fn marker_hit(&self, point: Vec2, cell_size: Vec2) -> bool {
        cell_at(point, cell_size) == cell_at(self.marker.pos, cell_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strider_paths::Waypoint;

    const TILE: Vec2 = Vec2::new(32.0, 32.0);

    fn wp(x: f64, y: f64) -> Waypoint {
        Waypoint::new(Vec2::new(x, y), 0.0)
    }

    #[test]
    fn split_route_gets_deferred_marker() {
        let seg = Segmentation {
            affordable: vec![wp(16.0, 16.0), wp(48.0, 16.0)],
            deferred: vec![wp(48.0, 16.0), wp(80.0, 16.0)],
            spent: 1.0,
        };
        let o = PathOverlay::from_segmentation(&seg, Vec2::new(20.0, 16.0)).unwrap();
        assert_eq!(o.affordable, vec![Vec2::new(20.0, 16.0), Vec2::new(48.0, 16.0)]);
        assert_eq!(o.deferred, vec![Vec2::new(48.0, 16.0), Vec2::new(80.0, 16.0)]);
        assert_eq!(o.marker.kind, MarkerKind::Deferred);
        assert_eq!(o.marker.pos, Vec2::new(80.0, 16.0));
    }

    #[test]
    fn affordable_route_gets_reachable_marker() {
        let seg = Segmentation {
            affordable: vec![wp(16.0, 16.0), wp(48.0, 48.0)],
            deferred: Vec::new(),
            spent: 1.4,
        };
        let o = PathOverlay::from_segmentation(&seg, Vec2::new(16.0, 16.0)).unwrap();
        assert!(o.deferred.is_empty());
        assert_eq!(o.marker.kind, MarkerKind::Reachable);
        assert_eq!(o.marker.pos, Vec2::new(48.0, 48.0));
    }

    #[test]
    fn nothing_affordable_draws_only_the_deferred_line() {
        let seg = Segmentation {
            affordable: vec![wp(16.0, 16.0)],
            deferred: vec![wp(16.0, 16.0), wp(48.0, 16.0)],
            spent: 0.0,
        };
        let o = PathOverlay::from_segmentation(&seg, Vec2::new(16.0, 16.0)).unwrap();
        assert!(o.affordable.is_empty());
        assert_eq!(o.deferred.len(), 2);
        assert_eq!(o.marker.kind, MarkerKind::Deferred);
    }

    #[test]
    fn empty_segmentation_draws_nothing() {
        assert_eq!(
            PathOverlay::from_segmentation(&Segmentation::default(), Vec2::ZERO),
            None
        );
    }

    #[test]
    fn marker_hit_tests_the_whole_cell() {
        let seg = Segmentation {
            affordable: vec![wp(16.0, 16.0), wp(48.0, 16.0)],
            deferred: Vec::new(),
            spent: 1.0,
        };
        let o = PathOverlay::from_segmentation(&seg, Vec2::new(16.0, 16.0)).unwrap();
        assert!(o.marker_hit(Vec2::new(33.0, 1.0), TILE));
        assert!(o.marker_hit(Vec2::new(63.9, 31.9), TILE));
        assert!(!o.marker_hit(Vec2::new(64.0, 16.0), TILE));
    }
}
