#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Tolerances used by [`smooth_path_with_config`](crate::smooth_path_with_config).
///
/// The defaults match [`smooth_path`](crate::smooth_path) and are tuned for worlds measured in meters.
/// All distances are squared to avoid square roots in the comparisons.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct FunnelConfig {
    /// If the last portal's left vertex is further than this from the goal, a zero-width portal at the goal
    /// is appended to the corridor. `[Limit: >= 0] [Units: wu²]`
    pub goal_tolerance_sq: f32,

    /// A funnel edge that is further than this from a portal it skipped over gets an extra waypoint on that portal.
    /// `[Limit: >= 0] [Units: wu²]`
    ///
    /// The funnel works on the xz-plane only. When the corridor has height differences, an edge that looks fine
    /// from above can pass through the ground or float above it. The extra waypoint pins the path back onto the portal.
    /// Lower values correct more aggressively.
    pub corner_cut_threshold_sq: f32,

    /// Whether to insert corner-cut waypoints at all.
    ///
    /// Disable this for flat navmeshes where the correction can never trigger, or when the consumer
    /// snaps the path to the ground on its own.
    pub corner_cut: bool,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            goal_tolerance_sq: 0.001,
            corner_cut_threshold_sq: 0.01,
            corner_cut: true,
        }
    }
}

impl FunnelConfig {
    /// Returns the config with corner-cut correction turned off.
    pub fn without_corner_cut(self) -> Self {
        Self {
            corner_cut: false,
            ..self
        }
    }
}
