#![doc = include_str!("../../../readme.md")]

mod config;
mod containment;
mod corner_cut;
mod funnel;
mod math;
mod segment;
mod trimesh;
mod weld;

pub use config::FunnelConfig;
pub use containment::{
    ContainmentError, POLYGON_HEIGHT_MARGIN, point_in_polygon, point_in_triangle,
};
pub use funnel::{Portal, effective_portals, smooth_path, smooth_path_with_config};
pub use math::{VEQUAL_EPSILON_SQ, path_length, tri_area_2d, turn_direction, vequal};
pub use segment::{SEGMENT_DEGENERATE_EPSILON_SQ, Segment, SegmentDistance};
pub use trimesh::TriMesh;
pub use weld::{DEFAULT_WELD_TOLERANCE, WeldError, WeldedBuffers, weld_vertices};
