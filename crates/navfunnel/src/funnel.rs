//! String pulling through a corridor of portals, a.k.a. the simple stupid funnel algorithm.
//!
//! The funnel is kept as an apex and two edges, one towards a left and one towards a right portal vertex.
//! Walking the corridor, each portal either narrows an edge of the funnel or makes one edge cross over the other.
//! On a crossover, the vertex of the edge that was crossed becomes a waypoint and the new apex, and the scan
//! resumes right after the portal that vertex came from.

use glam::Vec3A;

use crate::{
    config::FunnelConfig,
    corner_cut::insert_corner_cuts,
    math::{turn_direction, vequal},
    segment::Segment,
};

/// The shared edge between two adjacent polygons of a corridor.
///
/// Left and right are relative to the direction of travel. All portals of a corridor must use
/// the same sense, i.e. the left vertices of consecutive portals must lie on the same side of the corridor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Portal {
    /// The left vertex of the edge when looking along the corridor.
    pub left: Vec3A,
    /// The right vertex of the edge when looking along the corridor.
    pub right: Vec3A,
}

impl Portal {
    /// Creates a new portal.
    #[inline]
    pub const fn new(left: Vec3A, right: Vec3A) -> Self {
        Self { left, right }
    }

    /// A zero-width portal at `point`.
    #[inline]
    pub const fn point(point: Vec3A) -> Self {
        Self::new(point, point)
    }

    /// The portal as a segment from left to right.
    #[inline]
    pub fn edge(&self) -> Segment {
        Segment::new(self.left, self.right)
    }
}

// The four funnel comparisons below are asymmetric: a turn of exactly zero narrows an edge,
// but never counts as staying clear of the opposite edge. Collinear portals must not be able to pivot
// the funnel back and forth.

/// The candidate lies on or inside the current right edge.
#[inline]
fn narrows_right(turn: f32) -> bool {
    turn >= 0.0
}

/// The candidate for the right edge lies strictly right of the current left edge.
#[inline]
fn clears_left(turn: f32) -> bool {
    turn < 0.0
}

/// The candidate lies on or inside the current left edge.
#[inline]
fn narrows_left(turn: f32) -> bool {
    turn <= 0.0
}

/// The candidate for the left edge lies strictly left of the current right edge.
#[inline]
fn clears_right(turn: f32) -> bool {
    turn > 0.0
}

/// Smooths the corridor described by `portals` into the shortest path from `start` to `end`,
/// using [`FunnelConfig::default`].
///
/// See [`smooth_path_with_config`] for details.
pub fn smooth_path(start: Vec3A, end: Vec3A, portals: &[Portal]) -> Vec<Vec3A> {
    smooth_path_with_config(start, end, portals, &FunnelConfig::default())
}

/// Smooths the corridor described by `portals` into the shortest path from `start` to `end`.
///
/// `start` should lie inside the polygon before the first portal and `end` inside the polygon after the last one.
/// The returned path always begins with `start` and has at least two points. It ends at `end`,
/// or at the last portal's left vertex if that is within [`FunnelConfig::goal_tolerance_sq`] of `end`.
/// Every point in between is a portal vertex, or a corner-cut point on a portal edge if
/// [`FunnelConfig::corner_cut`] is enabled.
///
/// An empty corridor yields `[start, end]`.
///
/// The caller's portals are never modified; see [`effective_portals`] for the corridor that is actually walked.
pub fn smooth_path_with_config(
    start: Vec3A,
    end: Vec3A,
    portals: &[Portal],
    config: &FunnelConfig,
) -> Vec<Vec3A> {
    let Some(first) = portals.first() else {
        return vec![start, end];
    };
    let portals = effective_portals(portals, end, config);

    let mut path = vec![start];
    let mut funnel = Funnel::new(start, first);

    let mut cursor = 1;
    while cursor < portals.len() {
        cursor = match funnel.step(cursor, &portals, config, &mut path) {
            ScanState::Scanning => cursor + 1,
            ScanState::Pivoted => funnel.apex_index + 1,
        };
    }

    let exit = portals.last().map_or(end, |portal| portal.left);
    let arrived = path.len() > 1 && path.last().is_some_and(|&last| vequal(last, exit));
    if !arrived {
        path.push(exit);
    }
    path
}

/// Returns the corridor [`smooth_path_with_config`] walks for the given portals.
///
/// This is a copy of `portals`, with a zero-width portal at `end` appended if the last portal's left vertex
/// is further than [`FunnelConfig::goal_tolerance_sq`] away from `end`.
pub fn effective_portals(portals: &[Portal], end: Vec3A, config: &FunnelConfig) -> Vec<Portal> {
    let mut effective = Vec::with_capacity(portals.len() + 1);
    effective.extend_from_slice(portals);
    if portals
        .last()
        .is_some_and(|last| last.left.distance_squared(end) > config.goal_tolerance_sq)
    {
        tracing::debug!("Appending goal portal after {} portals", portals.len());
        effective.push(Portal::point(end));
    }
    effective
}

/// What the scan does after a [`Funnel::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Continue with the next portal.
    Scanning,
    /// The apex moved; continue with the portal after the new apex.
    Pivoted,
}

#[derive(Debug)]
struct Funnel {
    apex: Vec3A,
    apex_index: usize,
    left: Vec3A,
    left_index: usize,
    right: Vec3A,
    right_index: usize,
}

impl Funnel {
    fn new(apex: Vec3A, first: &Portal) -> Self {
        Self {
            apex,
            apex_index: 0,
            left: first.left,
            left_index: 0,
            right: first.right,
            right_index: 0,
        }
    }

    /// Feeds the portal at `index` into the funnel.
    fn step(
        &mut self,
        index: usize,
        portals: &[Portal],
        config: &FunnelConfig,
        path: &mut Vec<Vec3A>,
    ) -> ScanState {
        let Portal { left, right } = portals[index];

        if narrows_right(turn_direction(self.apex, self.right, right)) {
            if vequal(self.apex, self.right)
                || clears_left(turn_direction(self.apex, self.left, right))
            {
                self.right = right;
                self.right_index = index;
            } else {
                // Right crossed over left
                self.pivot_to_left(portals, config, path);
                return ScanState::Pivoted;
            }
        }

        if narrows_left(turn_direction(self.apex, self.left, left)) {
            if vequal(self.apex, self.left)
                || clears_right(turn_direction(self.apex, self.right, left))
            {
                self.left = left;
                self.left_index = index;
            } else {
                // Left crossed over right
                self.pivot_to_right(portals, config, path);
                return ScanState::Pivoted;
            }
        }

        ScanState::Scanning
    }

    fn pivot_to_left(
        &mut self,
        portals: &[Portal],
        config: &FunnelConfig,
        path: &mut Vec<Vec3A>,
    ) {
        if config.corner_cut {
            insert_corner_cuts(
                Segment::new(self.apex, self.left),
                portals,
                self.apex_index..self.left_index.saturating_sub(1),
                config.corner_cut_threshold_sq,
                path,
            );
        }
        path.push(self.left);
        tracing::trace!("Funnel pivoted to the left vertex of portal {}", self.left_index);

        self.apex = self.left;
        self.apex_index = self.left_index;
        self.right = self.apex;
        self.right_index = self.apex_index;
    }

    fn pivot_to_right(
        &mut self,
        portals: &[Portal],
        config: &FunnelConfig,
        path: &mut Vec<Vec3A>,
    ) {
        if config.corner_cut {
            insert_corner_cuts(
                Segment::new(self.apex, self.right),
                portals,
                self.apex_index..self.right_index.saturating_sub(1),
                config.corner_cut_threshold_sq,
                path,
            );
        }
        path.push(self.right);
        tracing::trace!(
            "Funnel pivoted to the right vertex of portal {}",
            self.right_index
        );

        self.apex = self.right;
        self.apex_index = self.right_index;
        self.left = self.apex;
        self.left_index = self.apex_index;
    }
}
