//! Merging of nearly-coincident vertices into a compact indexed buffer.

use std::collections::HashMap;

use glam::{I64Vec3, Vec3A};
use thiserror::Error;

/// A weld tolerance suited to worlds measured in meters.
pub const DEFAULT_WELD_TOLERANCE: f32 = 1.0e-4;

/// A position buffer and the index buffer referencing it, as produced by [`weld_vertices`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeldedBuffers {
    /// Flat xyz positions of the unique vertices, in order of first use.
    pub positions: Vec<f32>,
    /// One entry per input index (or per input vertex for unindexed input), pointing into [`Self::positions`].
    pub indices: Vec<u32>,
}

impl WeldedBuffers {
    /// The number of vertices in [`Self::positions`].
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Deduplicates vertices of a flat xyz position buffer.
///
/// If `indices` is `None`, the positions are treated as an unindexed triangle list.
/// The output contains one index per input index in the same order; the position buffer only contains
/// the first occurrence of every group of vertices that collapsed together.
///
/// Coordinates are scaled by `1 / tolerance` and truncated toward zero. Vertices that land in the same
/// integer cell are merged. Because this truncates instead of rounding, two vertices closer than
/// `tolerance` but on opposite sides of a cell boundary are kept apart.
///
/// `tolerance` is floored at machine epsilon.
///
/// # Errors
///
/// Fails if the position buffer is not a multiple of three long, an index is out of bounds,
/// or the tolerance is NaN or infinite.
pub fn weld_vertices(
    positions: &[f32],
    indices: Option<&[u32]>,
    tolerance: f32,
) -> Result<WeldedBuffers, WeldError> {
    if positions.len() % 3 != 0 {
        return Err(WeldError::PositionsNotMultipleOfThree {
            len: positions.len(),
        });
    }
    let vertices: Vec<Vec3A> = positions.chunks_exact(3).map(Vec3A::from_slice).collect();
    let (vertices, indices) = weld_points(&vertices, indices, tolerance)?;
    Ok(WeldedBuffers {
        positions: vertices.iter().flat_map(|v| v.to_array()).collect(),
        indices,
    })
}

/// [`weld_vertices`] over points instead of a flat buffer.
pub(crate) fn weld_points(
    vertices: &[Vec3A],
    indices: Option<&[u32]>,
    tolerance: f32,
) -> Result<(Vec<Vec3A>, Vec<u32>), WeldError> {
    let shift = shift_multiplier(tolerance)?;
    let vertex_count = indices.map_or(vertices.len(), <[u32]>::len);

    let mut key_to_index: HashMap<I64Vec3, u32> = HashMap::with_capacity(vertex_count);
    let mut new_vertices = Vec::new();
    let mut new_indices = Vec::with_capacity(vertex_count);

    for i in 0..vertex_count {
        let index = match indices {
            Some(indices) => indices[i],
            None => i as u32,
        };
        let Some(vertex) = vertices.get(index as usize).copied() else {
            return Err(WeldError::IndexOutOfBounds {
                index,
                vertex_count: vertices.len(),
            });
        };

        let key = weld_key(vertex, shift);
        let next_index = new_vertices.len() as u32;
        let new_index = *key_to_index.entry(key).or_insert_with(|| {
            new_vertices.push(vertex);
            next_index
        });
        new_indices.push(new_index);
    }

    tracing::debug!(
        "Welded {vertex_count} vertices into {} unique vertices",
        new_vertices.len()
    );
    Ok((new_vertices, new_indices))
}

/// Converts a tolerance into the factor coordinates are scaled by before truncation.
fn shift_multiplier(tolerance: f32) -> Result<f64, WeldError> {
    if !tolerance.is_finite() {
        return Err(WeldError::NonFiniteTolerance { tolerance });
    }
    let tolerance = (tolerance as f64).max(f64::EPSILON);
    let decimal_shift = (1.0 / tolerance).log10();
    Ok(10.0_f64.powf(decimal_shift))
}

/// Truncates each scaled coordinate toward zero. Saturates for coordinates too large for an `i64`.
#[inline]
fn weld_key(vertex: Vec3A, shift: f64) -> I64Vec3 {
    let truncate = |v: f32| (v as f64 * shift) as i64;
    I64Vec3::new(truncate(vertex.x), truncate(vertex.y), truncate(vertex.z))
}

/// Errors that can occur when calling [`weld_vertices`] or [`TriMesh::weld`](crate::TriMesh::weld).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeldError {
    /// Happens when a flat position buffer cannot be split into xyz triples.
    #[error("Position buffer length must be a multiple of 3, but got {len}")]
    PositionsNotMultipleOfThree {
        /// The length of the position buffer
        len: usize,
    },
    /// Happens when the index buffer references a vertex that does not exist.
    #[error("Index {index} is out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds {
        /// The offending index
        index: u32,
        /// The number of vertices in the position buffer
        vertex_count: usize,
    },
    /// Happens when the tolerance is NaN or infinite.
    #[error("Weld tolerance must be finite, but got {tolerance}")]
    NonFiniteTolerance {
        /// The offending tolerance
        tolerance: f32,
    },
}
