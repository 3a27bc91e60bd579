//! Closest-point kernels for segments and triangles.
//!
//! Pure functions over `Point3<f64>`, total on finite inputs. Behavior on
//! non-finite inputs is unspecified.

use nalgebra::{Matrix3, Point3};

/// Compute the closest point on a segment to a query point.
///
/// With `d = (b - a) · (p - a)` and `n = (b - a) · (b - a)`, the answer is
/// `a` when `d < 0`, `b` when `d > n`, and the interior projection
/// `a + (d/n)(b - a)` otherwise. A zero-length segment returns `a`.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use prox_query::closest_point_on_segment;
///
/// let a = Point3::new(0.0, 0.0, 0.0);
/// let b = Point3::new(10.0, 0.0, 0.0);
///
/// let q = closest_point_on_segment(a, b, Point3::new(5.0, 3.0, 0.0));
/// assert_eq!(q, Point3::new(5.0, 0.0, 0.0));
///
/// let q = closest_point_on_segment(a, b, Point3::new(-5.0, 0.0, 0.0));
/// assert_eq!(q, a);
/// ```
#[must_use]
pub fn closest_point_on_segment(a: Point3<f64>, b: Point3<f64>, p: Point3<f64>) -> Point3<f64> {
    let dir = b - a;
    let d = dir.dot(&(p - a));
    let n = dir.norm_squared();

    if d < 0.0 || n == 0.0 {
        return a;
    }
    if d > n {
        return b;
    }

    a + dir * (d / n)
}

/// Compute the closest point on a triangle to a query point.
///
/// Builds the local frame `X = v1 - v0`, `Y = v2 - v0`, `Z = X × Y` and
/// solves `[X Y Z] · (u, v, w) = p - v0` for the barycentric pair `(u, v)`.
/// When the projection lands strictly inside the triangle
/// (`u > 0`, `v > 0`, `u + v < 1`) the answer is `v0 + uX + vY`; otherwise
/// the point projects onto each of the three edges and the nearest
/// projection wins, ties preferring edge `(v0, v1)`, then `(v1, v2)`, then
/// `(v2, v0)`. Degenerate triangles (no invertible frame) fall through to
/// the edges.
///
/// Points exactly on an edge fail the strict interior test and route
/// through the segment branch, which returns the same point up to floating
/// point noise.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use prox_query::closest_point_on_triangle;
///
/// let v0 = Point3::new(0.0, 0.0, 0.0);
/// let v1 = Point3::new(1.0, 0.0, 0.0);
/// let v2 = Point3::new(0.0, 1.0, 0.0);
///
/// // Directly above the interior: projects onto the plane
/// let q = closest_point_on_triangle(v0, v1, v2, Point3::new(0.25, 0.25, 2.0));
/// assert!((q - Point3::new(0.25, 0.25, 0.0)).norm() < 1e-12);
/// ```
#[must_use]
pub fn closest_point_on_triangle(
    v0: Point3<f64>,
    v1: Point3<f64>,
    v2: Point3<f64>,
    p: Point3<f64>,
) -> Point3<f64> {
    // Coordinate system centered at v0; Z completes the frame so the 3x3
    // system is solvable whenever the triangle has area.
    let x = v1 - v0;
    let y = v2 - v0;
    let z = x.cross(&y);

    if let Some(inverse) = Matrix3::from_columns(&[x, y, z]).try_inverse() {
        let bary = inverse * (p - v0);
        let (u, v) = (bary.x, bary.y);

        if u > 0.0 && v > 0.0 && u + v < 1.0 {
            // inside the triangle
            return v0 + x * u + y * v;
        }
    }

    // Out of the triangle (or degenerate): fall on the segments.
    let e0 = closest_point_on_segment(v0, v1, p);
    let e1 = closest_point_on_segment(v1, v2, p);
    let e2 = closest_point_on_segment(v2, v0, p);

    let d0 = (p - e0).norm_squared();
    let d1 = (p - e1).norm_squared();
    let d2 = (p - e2).norm_squared();

    if d0 <= d1 && d0 <= d2 {
        e0
    } else if d1 <= d2 {
        e1
    } else {
        e2
    }
}
