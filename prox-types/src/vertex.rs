//! Mesh vertex carrying position, normal, and color.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Rgba;

/// A vertex in 3D space.
///
/// The position is the only field that participates in geometric queries.
/// The normal and color are carried along for downstream rendering and are
/// copied into BVH leaf buckets untouched.
///
/// # Example
///
/// ```
/// use prox_types::{Point3, Rgba, Vector3, Vertex};
///
/// let v = Vertex::new(
///     Point3::new(1.0, 2.0, 3.0),
///     Vector3::z(),
///     Rgba::WHITE,
/// );
/// assert_eq!(v.position.x, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// 3D position.
    pub position: Point3<f64>,

    /// Shading normal. Not interpreted by queries; preserved for rendering.
    pub normal: Vector3<f64>,

    /// Vertex color. Not interpreted by queries; preserved for rendering.
    pub color: Rgba,
}

impl Vertex {
    /// Create a new vertex.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>, normal: Vector3<f64>, color: Rgba) -> Self {
        Self {
            position,
            normal,
            color,
        }
    }

    /// Create a vertex from a position only, with a zero normal and the
    /// default color.
    ///
    /// # Example
    ///
    /// ```
    /// use prox_types::{Point3, Vertex};
    ///
    /// let v = Vertex::from_position(Point3::new(1.0, 2.0, 3.0));
    /// assert_eq!(v.normal.norm(), 0.0);
    /// ```
    #[inline]
    #[must_use]
    pub fn from_position(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: Vector3::zeros(),
            color: Rgba::default(),
        }
    }

    /// Create a vertex from raw coordinates, with a zero normal and the
    /// default color.
    #[inline]
    #[must_use]
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::from_position(Point3::new(x, y, z))
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::from_position(position)
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}

impl From<(f64, f64, f64)> for Vertex {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::from_coords(x, y, z)
    }
}
