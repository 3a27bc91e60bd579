//! Triangle soup mesh with a cached bounding box.

use crate::{Aabb, Triangle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle mesh stored as a soup of concrete triangles.
///
/// Every triangle owns full copies of its three vertices. There is no
/// shared vertex pool; the BVH partitions triangles into leaf buckets that
/// each own their data, which keeps a query's working set local to the
/// single leaf it lands in.
///
/// The bounding box is computed once at construction and tightly encloses
/// every vertex position. The mesh is immutable afterwards.
///
/// # Example
///
/// ```
/// use prox_types::{TriMesh, Triangle};
///
/// let mesh = TriMesh::new(vec![Triangle::from_positions(
///     [0.0, 0.0, 0.0],
///     [1.0, 0.0, 0.0],
///     [0.0, 1.0, 0.0],
/// )]);
///
/// assert_eq!(mesh.tri_count(), 1);
/// assert_eq!(mesh.bounds().max.x, 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<Triangle>", into = "Vec<Triangle>"))]
pub struct TriMesh {
    tris: Vec<Triangle>,
    bounds: Aabb,
}

impl TriMesh {
    /// Create a mesh from a list of triangles.
    ///
    /// Computes the bounding box as the pointwise min/max of every vertex
    /// position. An empty list yields the canonical empty box.
    #[must_use]
    pub fn new(tris: Vec<Triangle>) -> Self {
        let mut bounds = Aabb::empty();
        for tri in &tris {
            for position in tri.positions() {
                bounds.expand_to_include(&position);
            }
        }
        Self { tris, bounds }
    }

    /// Create an empty mesh.
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tris: Vec::new(),
            bounds: Aabb::empty(),
        }
    }

    /// Get the cached bounding box.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Get the triangles.
    #[inline]
    #[must_use]
    pub fn tris(&self) -> &[Triangle] {
        &self.tris
    }

    /// Get the number of triangles.
    #[inline]
    #[must_use]
    pub fn tri_count(&self) -> usize {
        self.tris.len()
    }

    /// Check if the mesh has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tris.is_empty()
    }

    /// Iterate over the triangles.
    pub fn iter(&self) -> impl Iterator<Item = &Triangle> {
        self.tris.iter()
    }
}

impl From<Vec<Triangle>> for TriMesh {
    fn from(tris: Vec<Triangle>) -> Self {
        Self::new(tris)
    }
}

impl From<TriMesh> for Vec<Triangle> {
    fn from(mesh: TriMesh) -> Self {
        mesh.tris
    }
}

impl<'a> IntoIterator for &'a TriMesh {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.tris.iter()
    }
}
