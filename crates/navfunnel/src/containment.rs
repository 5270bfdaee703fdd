//! Point location against navmesh triangles.

use glam::Vec3A;
use thiserror::Error;

/// How far above the highest or below the lowest vertex of a polygon a point may be
/// and still be considered inside it. `[Units: wu]`
pub const POLYGON_HEIGHT_MARGIN: f32 = 0.5;

/// Returns `true` if `point` lies inside `triangle` when both are projected onto the xz-plane.
///
/// Points on an edge or vertex count as inside. The winding of the triangle does not matter.
pub fn point_in_triangle(triangle: &[Vec3A; 3], point: Vec3A) -> bool {
    let [a, b, c] = *triangle;

    let cross_ab = (b - a).cross(point - a).y;
    let cross_bc = (c - b).cross(point - b).y;
    let cross_ca = (a - c).cross(point - c).y;

    (cross_ab >= 0.0 && cross_bc >= 0.0 && cross_ca >= 0.0)
        || (cross_ab <= 0.0 && cross_bc <= 0.0 && cross_ca <= 0.0)
}

/// Returns `true` if `point` is inside the triangle formed by `vertex_ids`.
///
/// In addition to [`point_in_triangle`], the point's y-coordinate must lie strictly within
/// [`POLYGON_HEIGHT_MARGIN`] of the triangle's vertical extent. This rejects points on other floors
/// of a multi-level navmesh.
///
/// # Errors
///
/// Fails if `vertex_ids` is empty, does not describe exactly one triangle,
/// or references a vertex outside of `vertices`.
pub fn point_in_polygon(
    point: Vec3A,
    vertex_ids: &[u32],
    vertices: &[Vec3A],
) -> Result<bool, ContainmentError> {
    let triangle = match vertex_ids {
        [] => return Err(ContainmentError::EmptyPolygon),
        [a, b, c] => [
            vertex(vertices, *a)?,
            vertex(vertices, *b)?,
            vertex(vertices, *c)?,
        ],
        _ => {
            return Err(ContainmentError::NotATriangle {
                vertex_count: vertex_ids.len(),
            });
        }
    };

    let (lowest, highest) = triangle
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v.y), hi.max(v.y))
        });

    Ok(point.y < highest + POLYGON_HEIGHT_MARGIN
        && point.y > lowest - POLYGON_HEIGHT_MARGIN
        && point_in_triangle(&triangle, point))
}

fn vertex(vertices: &[Vec3A], vertex_id: u32) -> Result<Vec3A, ContainmentError> {
    vertices
        .get(vertex_id as usize)
        .copied()
        .ok_or(ContainmentError::VertexOutOfBounds {
            vertex_id,
            vertex_count: vertices.len(),
        })
}

/// Errors that can occur when calling [`point_in_polygon`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainmentError {
    /// Happens when the polygon has no vertices.
    #[error("Cannot test containment against a polygon without vertices")]
    EmptyPolygon,
    /// Happens when the polygon is not a triangle.
    #[error("Containment is only supported for triangles, but the polygon has {vertex_count} vertices")]
    NotATriangle {
        /// The number of vertices the polygon has
        vertex_count: usize,
    },
    /// Happens when the polygon references a vertex that does not exist.
    #[error("Vertex id {vertex_id} is out of bounds for {vertex_count} vertices")]
    VertexOutOfBounds {
        /// The offending vertex id
        vertex_id: u32,
        /// The number of available vertices
        vertex_count: usize,
    },
}
