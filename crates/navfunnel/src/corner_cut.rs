//! Extra waypoints for funnel edges that leave the corridor vertically.

use std::ops::Range;

use glam::Vec3A;

use crate::{
    funnel::Portal,
    segment::{SEGMENT_DEGENERATE_EPSILON_SQ, Segment},
};

/// Checks the portals in `skipped` against the funnel edge `pivot` and pushes a waypoint onto `path`
/// for every portal the edge misses in 3D by more than `threshold_sq`.
///
/// The waypoint is the point on the portal where the edge crosses it on the xz-plane, at the portal's own height.
/// An empty or reversed range inserts nothing.
pub(crate) fn insert_corner_cuts(
    pivot: Segment,
    portals: &[Portal],
    skipped: Range<usize>,
    threshold_sq: f32,
    path: &mut Vec<Vec3A>,
) {
    let skipped = portals.get(skipped).unwrap_or_default();
    let flat_pivot = pivot.flatten();
    for portal in skipped {
        let edge = portal.edge();
        if pivot.distance_squared(&edge) <= threshold_sq {
            continue;
        }
        let point = corner_cut_point(flat_pivot, edge);
        tracing::trace!("Inserting corner cut at {point}");
        path.push(point);
    }
}

fn corner_cut_point(flat_pivot: Segment, edge: Segment) -> Vec3A {
    let flat_edge = edge.flatten();
    if flat_edge.length_squared() <= SEGMENT_DEGENERATE_EPSILON_SQ {
        tracing::warn!("Portal {edge:?} has no extent on the xz-plane, using its left vertex as corner cut");
        return edge.start;
    }
    let crossing = flat_pivot.closest_points(&flat_edge).closest_on_other;
    let delta = crossing.distance(flat_edge.start) / flat_edge.length_squared().sqrt();
    edge.lerp(delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32, z: f32) -> Vec3A {
        Vec3A::new(x, y, z)
    }

    fn portals() -> Vec<Portal> {
        vec![
            Portal::new(v(2.0, 1.0, -1.0), v(2.0, 1.0, 1.0)),
            Portal::new(v(3.0, 0.0, -1.0), v(3.0, 0.0, 1.0)),
            Portal::new(v(3.5, -2.0, -1.0), v(3.5, -2.0, 1.0)),
        ]
    }

    #[test]
    fn inserts_only_for_portals_out_of_reach() {
        let pivot = Segment::new(v(0.0, 0.0, 0.0), v(4.0, 0.0, 0.0));
        let mut path = Vec::new();
        insert_corner_cuts(pivot, &portals(), 0..3, 0.01, &mut path);
        assert_eq!(path.len(), 2);
        assert!(path[0].abs_diff_eq(v(2.0, 1.0, 0.0), 1.0e-6));
        assert!(path[1].abs_diff_eq(v(3.5, -2.0, 0.0), 1.0e-6));
    }

    #[test]
    fn respects_range() {
        let pivot = Segment::new(v(0.0, 0.0, 0.0), v(4.0, 0.0, 0.0));
        let mut path = Vec::new();
        insert_corner_cuts(pivot, &portals(), 1..2, 0.01, &mut path);
        assert!(path.is_empty());
        insert_corner_cuts(pivot, &portals(), 2..1, 0.01, &mut path);
        assert!(path.is_empty());
        insert_corner_cuts(pivot, &portals(), 0..10, 0.01, &mut path);
        assert!(path.is_empty());
    }

    #[test]
    fn threshold_is_squared_distance() {
        let pivot = Segment::new(v(0.0, 0.0, 0.0), v(4.0, 0.0, 0.0));
        let mut path = Vec::new();
        insert_corner_cuts(pivot, &portals(), 0..1, 1.5, &mut path);
        assert!(path.is_empty());
        insert_corner_cuts(pivot, &portals(), 0..1, 0.5, &mut path);
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn vertical_portal_falls_back_to_left_vertex() {
        let pivot = Segment::new(v(0.0, 0.0, 0.0), v(4.0, 0.0, 0.0));
        let portals = [Portal::new(v(2.0, 1.0, 0.0), v(2.0, 3.0, 0.0))];
        let mut path = Vec::new();
        insert_corner_cuts(pivot, &portals, 0..1, 0.01, &mut path);
        assert_eq!(path, vec![v(2.0, 1.0, 0.0)]);
    }
}
