//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
///
/// Represents a 3D box aligned with the coordinate axes, defined by minimum
/// and maximum corner points. The empty box is `(+INF, +INF, +INF)` /
/// `(-INF, -INF, -INF)` so that expanding it by any point yields a valid box.
///
/// # Example
///
/// ```
/// use prox_types::{Aabb, Point3};
///
/// let aabb = Aabb::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 10.0, 10.0),
/// );
///
/// assert!(aabb.contains(&Point3::new(5.0, 5.0, 5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f64>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f64>,
}

/// Canonical corner selectors, one per octant.
///
/// Each entry picks min (`false`) or max (`true`) per axis, in `[x, y, z]`
/// order with x varying fastest. [`Aabb::corners`] and [`Aabb::octants`]
/// share this table so octant indices are reproducible across builds.
const CORNER_TABLE: [[bool; 3]; 8] = [
    [false, false, false],
    [true, false, false],
    [false, true, false],
    [true, true, false],
    [false, false, true],
    [true, false, true],
    [false, true, true],
    [true, true, true],
];

impl Aabb {
    /// Create a new AABB from two corner points.
    ///
    /// The corners are reordered per axis if necessary, so the arguments may
    /// be given in any order.
    ///
    /// # Example
    ///
    /// ```
    /// use prox_types::{Aabb, Point3};
    ///
    /// let aabb = Aabb::new(
    ///     Point3::new(10.0, 0.0, 10.0),
    ///     Point3::new(0.0, 10.0, 0.0),
    /// );
    /// assert_eq!(aabb.min, Point3::new(0.0, 0.0, 0.0));
    /// assert_eq!(aabb.max, Point3::new(10.0, 10.0, 10.0));
    /// ```
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Create an empty (inverted) AABB.
    ///
    /// # Example
    ///
    /// ```
    /// use prox_types::{Aabb, Point3};
    ///
    /// let mut aabb = Aabb::empty();
    /// assert!(aabb.is_empty());
    ///
    /// aabb.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
    /// assert!(!aabb.is_empty());
    /// ```
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Create an AABB from a single point (zero volume).
    #[inline]
    #[must_use]
    pub const fn from_point(point: Point3<f64>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Create an AABB enclosing an iterator of points.
    ///
    /// Returns an empty AABB if the iterator is empty.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_to_include(point);
        }
        aabb
    }

    /// Check if the AABB is empty (min > max on some axis).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Get the center of the AABB.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        Point3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Get the size (dimensions) of the AABB.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Get the diagonal length of the AABB.
    #[inline]
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        self.size().norm()
    }

    /// Expand the AABB in place to include a point.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Compute the union (enclosing AABB) of two AABBs.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// Expand the AABB by a uniform margin on all sides.
    ///
    /// Negative margins shrink the AABB.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min: Point3::new(
                self.min.x - margin,
                self.min.y - margin,
                self.min.z - margin,
            ),
            max: Point3::new(
                self.max.x + margin,
                self.max.y + margin,
                self.max.z + margin,
            ),
        }
    }

    /// Check if the AABB contains a point.
    ///
    /// Points on the boundary are considered inside.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Check if this AABB intersects another AABB.
    ///
    /// Touching AABBs are considered intersecting.
    ///
    /// # Example
    ///
    /// ```
    /// use prox_types::{Aabb, Point3};
    ///
    /// let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
    /// let b = Aabb::new(Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 1.0, 1.0));
    /// let c = Aabb::new(Point3::new(3.0, 3.0, 3.0), Point3::new(4.0, 4.0, 4.0));
    ///
    /// assert!(a.intersects(&b)); // shared face
    /// assert!(!a.intersects(&c));
    /// ```
    #[inline]
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Squared distance from a point to the AABB.
    ///
    /// Per axis, the point contributes the squared gap to the nearer face
    /// when it lies outside the slab and nothing when inside (the classic
    /// Graphics Gems box/sphere distance). Zero when the point is inside
    /// or on the boundary.
    #[must_use]
    pub fn distance_squared_to(&self, point: &Point3<f64>) -> f64 {
        let mut dist = 0.0;

        for axis in 0..3 {
            let p = point[axis];
            if p < self.min[axis] {
                dist += (p - self.min[axis]) * (p - self.min[axis]);
            } else if p > self.max[axis] {
                dist += (p - self.max[axis]) * (p - self.max[axis]);
            }
        }

        dist
    }

    /// Check if a sphere overlaps the AABB.
    ///
    /// Overlap is STRICT: true iff `radius² > distance_squared_to(center)`.
    /// A sphere exactly grazing the box does not overlap; the BVH builder
    /// and the proximity-query pruning both rely on this tie-break.
    ///
    /// # Example
    ///
    /// ```
    /// use prox_types::{Aabb, Point3};
    ///
    /// let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
    ///
    /// assert!(aabb.intersects_sphere(&Point3::new(2.0, 0.5, 0.5), 1.5));
    /// assert!(!aabb.intersects_sphere(&Point3::new(2.0, 0.5, 0.5), 1.0)); // grazing
    /// ```
    #[inline]
    #[must_use]
    pub fn intersects_sphere(&self, center: &Point3<f64>, radius: f64) -> bool {
        radius * radius > self.distance_squared_to(center)
    }

    /// Get the eight corner points of the AABB in canonical octant order.
    ///
    /// Bit 0 selects x, bit 1 selects y, bit 2 selects z (0 = min, 1 = max).
    #[must_use]
    pub fn corners(&self) -> [Point3<f64>; 8] {
        CORNER_TABLE.map(|[x, y, z]| {
            Point3::new(
                if x { self.max.x } else { self.min.x },
                if y { self.max.y } else { self.min.y },
                if z { self.max.z } else { self.min.z },
            )
        })
    }

    /// Subdivide the AABB into its eight octants.
    ///
    /// Each octant is the box spanned by the center and one corner, emitted
    /// in the canonical order of [`Aabb::corners`]. The octants partition
    /// this box (disjoint interiors, union equal to the whole).
    ///
    /// # Example
    ///
    /// ```
    /// use prox_types::{Aabb, Point3};
    ///
    /// let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
    /// let octants = aabb.octants();
    ///
    /// assert_eq!(octants[0].min, Point3::new(0.0, 0.0, 0.0));
    /// assert_eq!(octants[0].max, Point3::new(1.0, 1.0, 1.0));
    /// assert_eq!(octants[7].min, Point3::new(1.0, 1.0, 1.0));
    /// assert_eq!(octants[7].max, Point3::new(2.0, 2.0, 2.0));
    /// ```
    #[must_use]
    pub fn octants(&self) -> [Self; 8] {
        let center = self.center();
        self.corners().map(|corner| Self::new(center, corner))
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}
