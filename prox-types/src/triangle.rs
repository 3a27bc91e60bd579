//! Triangle carrying three full vertices.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Aabb, Vertex};

/// A triangle of three full vertices.
///
/// The vertices form an ordered triple. Orientation is not used by proximity
/// queries (there is no front/back distinction); winding only matters to
/// renderers consuming the carried normals.
///
/// # Example
///
/// ```
/// use prox_types::Triangle;
///
/// let tri = Triangle::from_positions(
///     [0.0, 0.0, 0.0],
///     [1.0, 0.0, 0.0],
///     [0.0, 1.0, 0.0],
/// );
///
/// assert!((tri.area() - 0.5).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub a: Vertex,
    /// Second vertex.
    pub b: Vertex,
    /// Third vertex.
    pub c: Vertex,
}

impl Triangle {
    /// Create a triangle from three vertices.
    #[inline]
    #[must_use]
    pub const fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self { a, b, c }
    }

    /// Create a triangle from three positions, with zero normals and the
    /// default vertex color.
    ///
    /// # Example
    ///
    /// ```
    /// use prox_types::Triangle;
    ///
    /// let tri = Triangle::from_positions(
    ///     [0.0, 0.0, 0.0],
    ///     [3.0, 0.0, 0.0],
    ///     [0.0, 4.0, 0.0],
    /// );
    /// assert!((tri.area() - 6.0).abs() < 1e-10);
    /// ```
    #[inline]
    #[must_use]
    pub fn from_positions(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Self {
        Self {
            a: Vertex::from(a),
            b: Vertex::from(b),
            c: Vertex::from(c),
        }
    }

    /// Get the three vertex positions.
    #[inline]
    #[must_use]
    pub const fn positions(&self) -> [Point3<f64>; 3] {
        [self.a.position, self.b.position, self.c.position]
    }

    /// Compute the bounding box of the triangle.
    ///
    /// The pointwise min/max of the three vertex positions.
    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        let [v0, v1, v2] = self.positions();
        Aabb {
            min: Point3::new(
                v0.x.min(v1.x).min(v2.x),
                v0.y.min(v1.y).min(v2.y),
                v0.z.min(v1.z).min(v2.z),
            ),
            max: Point3::new(
                v0.x.max(v1.x).max(v2.x),
                v0.y.max(v1.y).max(v2.y),
                v0.z.max(v1.z).max(v2.z),
            ),
        }
    }

    /// Compute the centroid (center of mass).
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        let [v0, v1, v2] = self.positions();
        Point3::new(
            (v0.x + v1.x + v2.x) / 3.0,
            (v0.y + v1.y + v2.y) / 3.0,
            (v0.z + v1.z + v2.z) / 3.0,
        )
    }

    /// Compute the area of the triangle.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        let [v0, v1, v2] = self.positions();
        (v1 - v0).cross(&(v2 - v0)).norm() * 0.5
    }

    /// Compute the unit face normal.
    ///
    /// Returns `None` for degenerate triangles (zero area). This is the
    /// geometric normal from the vertex ordering, independent of the
    /// shading normals the vertices carry.
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let [v0, v1, v2] = self.positions();
        let n = (v1 - v0).cross(&(v2 - v0));
        let len_sq = n.norm_squared();
        if len_sq > f64::EPSILON {
            Some(n / len_sq.sqrt())
        } else {
            None
        }
    }

    /// Check if the triangle is degenerate (area below `epsilon`).
    ///
    /// Degenerate triangles are legal inputs to proximity queries; the
    /// closest-point kernel falls back to edge projection for them.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        self.area() < epsilon
    }
}
