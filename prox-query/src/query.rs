//! Nearest-point proximity queries.
//!
//! The query walks the flat BVH with branch-and-bound pruning: a node is
//! skipped when its box cannot contain a point closer than the best distance
//! found so far, and the children of an internal node are visited nearest
//! box first so the bound tightens early.

use nalgebra::Point3;

use crate::collision::{BvhNode, CollisionMesh};
use crate::distance::closest_point_on_triangle;
use prox_types::TriMesh;

/// A successful proximity query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityHit {
    /// The closest point on the mesh surface.
    pub point: Point3<f64>,
    /// Distance from the query point to [`ProximityHit::point`].
    /// Strictly less than the search radius.
    pub distance: f64,
    /// Index of the leaf NODE (in the collision mesh's node table, not the
    /// leaf-bucket table) that owns the winning triangle.
    pub node_id: u32,
}

/// Find the closest point on a collision mesh within a search radius.
///
/// Returns the point on the mesh minimizing the distance to `point`,
/// together with the id of the leaf node that owns it, or `None` when no
/// triangle lies strictly within `radius`. A radius of zero or less always
/// misses. A miss is a normal outcome, not a failure.
///
/// Ties in distance are broken by visit order (first wins). For a fixed
/// collision mesh and fixed inputs the result is deterministic, and
/// concurrent queries on a shared collision mesh are safe.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use prox_query::{closest_point_on_mesh, BuildParams, CollisionMesh};
/// use prox_types::{TriMesh, Triangle};
///
/// let mesh = TriMesh::new(vec![Triangle::from_positions(
///     [0.0, 0.0, 0.0],
///     [1.0, 0.0, 0.0],
///     [0.0, 1.0, 0.0],
/// )]);
/// let collision = CollisionMesh::build(&mesh, &BuildParams::default());
///
/// let hit = closest_point_on_mesh(&collision, Point3::new(0.25, 0.25, 1.0), 5.0)
///     .expect("triangle is within radius");
/// assert!((hit.distance - 1.0).abs() < 1e-12);
///
/// assert!(closest_point_on_mesh(&collision, Point3::new(50.0, 0.0, 0.0), 1.0).is_none());
/// ```
#[must_use]
pub fn closest_point_on_mesh(
    collision: &CollisionMesh,
    point: Point3<f64>,
    radius: f64,
) -> Option<ProximityHit> {
    if radius <= 0.0 {
        return None;
    }

    let mut best: Option<(Point3<f64>, u32)> = None;
    let mut best_dist = radius;
    visit(collision, collision.root_id(), &point, &mut best, &mut best_dist);

    best.map(|(q, node_id)| ProximityHit {
        point: q,
        distance: best_dist,
        node_id,
    })
}

fn visit(
    collision: &CollisionMesh,
    id: u32,
    point: &Point3<f64>,
    best: &mut Option<(Point3<f64>, u32)>,
    best_dist: &mut f64,
) {
    let node = &collision.nodes()[id as usize];

    // Prune: nothing in this box can beat the current best. Strict test,
    // so a subtree exactly best_dist away is skipped.
    if !node.bounds().intersects_sphere(point, *best_dist) {
        return;
    }

    match node {
        BvhNode::Leaf { bucket, .. } => {
            for tri in collision.leaves()[*bucket as usize].iter() {
                let [v0, v1, v2] = tri.positions();
                let candidate = closest_point_on_triangle(v0, v1, v2, *point);
                let dist = (candidate - *point).norm();
                if dist < *best_dist {
                    *best_dist = dist;
                    *best = Some((candidate, id));
                }
            }
        }
        BvhNode::Internal { children, .. } => {
            // Visit nearest boxes first so best_dist tightens before the
            // far children are tested. Stable sort keeps ties in canonical
            // octant order.
            let mut order: [(f64, u32); 8] = [(0.0, 0); 8];
            for (slot, &child) in children.iter().enumerate() {
                let gap = collision.nodes()[child as usize]
                    .bounds()
                    .distance_squared_to(point);
                order[slot] = (gap, child);
            }
            order.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

            for &(_, child) in &order {
                visit(collision, child, point, best, best_dist);
            }
        }
    }
}

/// Reference implementation: scan every triangle of a mesh.
///
/// Same contract as [`closest_point_on_mesh`] but without the hierarchy, and
/// returning only the point and its distance. Used to cross-check the BVH
/// traversal and as a fallback for tiny meshes.
#[must_use]
pub fn closest_point_brute_force(
    mesh: &TriMesh,
    point: Point3<f64>,
    radius: f64,
) -> Option<(Point3<f64>, f64)> {
    if radius <= 0.0 {
        return None;
    }

    let mut best: Option<Point3<f64>> = None;
    let mut best_dist = radius;

    for tri in mesh.iter() {
        let [v0, v1, v2] = tri.positions();
        let candidate = closest_point_on_triangle(v0, v1, v2, point);
        let dist = (candidate - point).norm();
        if dist < best_dist {
            best_dist = dist;
            best = Some(candidate);
        }
    }

    best.map(|q| (q, best_dist))
}
