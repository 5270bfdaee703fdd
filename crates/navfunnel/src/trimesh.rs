//! Indexed triangle meshes used for navmesh preprocessing and point location.

use glam::{UVec3, Vec3A};

use crate::{
    containment::{ContainmentError, point_in_polygon},
    weld::{WeldError, weld_points},
};

/// An indexed triangle list.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TriMesh {
    /// The vertices composing the mesh.
    pub vertices: Vec<Vec3A>,

    /// The indices composing the mesh.
    /// Each entry is one triangle referencing [`TriMesh::vertices`].
    pub indices: Vec<UVec3>,
}

impl TriMesh {
    /// Extends the trimesh with the vertices and indices of another trimesh.
    /// The indices of `other` will be offset by the number of vertices in `self`.
    ///
    /// # Panics
    ///
    /// Panics if `self` has more than 2^32 vertices.
    pub fn extend(&mut self, other: TriMesh) {
        if self.vertices.len() > u32::MAX as usize {
            panic!("Cannot extend a trimesh with more than 2^32 vertices");
        }
        let next_vertex_index = self.vertices.len() as u32;
        self.vertices.extend(other.vertices);
        self.indices
            .extend(other.indices.iter().map(|i| i + next_vertex_index));
    }

    /// Returns the vertices of the triangle at `index`, or `None` if either the triangle
    /// or one of its vertices does not exist.
    pub fn triangle(&self, index: usize) -> Option<[Vec3A; 3]> {
        let ids = self.indices.get(index)?;
        Some([
            *self.vertices.get(ids.x as usize)?,
            *self.vertices.get(ids.y as usize)?,
            *self.vertices.get(ids.z as usize)?,
        ])
    }

    /// Returns the index of the first triangle containing `point`, as decided by
    /// [`point_in_polygon`](crate::point_in_polygon).
    ///
    /// # Errors
    ///
    /// Fails if a triangle references a vertex that does not exist.
    pub fn find_triangle(&self, point: Vec3A) -> Result<Option<usize>, ContainmentError> {
        for (i, ids) in self.indices.iter().enumerate() {
            if point_in_polygon(point, &ids.to_array(), &self.vertices)? {
                return Ok(Some(i));
            }
        }
        Ok(None)
    }

    /// Returns a copy of the mesh with vertices closer than `tolerance` merged into one.
    /// See [`weld_vertices`](crate::weld_vertices) for the exact merge rule.
    ///
    /// # Errors
    ///
    /// Fails if a triangle references a vertex that does not exist or the tolerance is not finite.
    pub fn weld(&self, tolerance: f32) -> Result<TriMesh, WeldError> {
        let flat_indices: Vec<u32> = self.indices.iter().flat_map(|i| i.to_array()).collect();
        let (vertices, indices) =
            weld_points(&self.vertices, Some(flat_indices.as_slice()), tolerance)?;
        Ok(TriMesh {
            vertices,
            indices: indices.chunks_exact(3).map(UVec3::from_slice).collect(),
        })
    }
}
