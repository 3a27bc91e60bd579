//! Collision-mesh construction.
//!
//! Construction runs in two passes. A transient pointer tree is built by
//! recursive octant subdivision (simple, local, allocations contained), then
//! flattened into the index-addressed node and leaf tables by a post-order
//! walk so that every node's children precede it in the output array. The
//! transient tree is dropped on return.

use prox_types::{Aabb, Rgba, TriMesh, Triangle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::collision::{BvhNode, CollisionMesh};
use crate::params::BuildParams;

/// Transient node of the builder working set.
struct BuildNode {
    bounds: Aabb,
    kind: BuildKind,
}

enum BuildKind {
    /// Leaf bucket of triangles (possibly empty).
    Bucket(Vec<Triangle>),
    /// Eight children, one per octant, in canonical order.
    Children([Box<BuildNode>; 8]),
}

/// Build a collision mesh from a triangle mesh.
pub(crate) fn build(mesh: &TriMesh, params: &BuildParams) -> CollisionMesh {
    let max_leaf = params.max_tris_per_leaf.max(1);
    let root_node = subdivide(mesh.tris().to_vec(), max_leaf);

    let mut rng = match params.color_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut nodes = Vec::new();
    let mut leaves = Vec::new();
    let root = flatten(root_node, &mut nodes, &mut leaves, &mut rng);

    let collision = CollisionMesh::from_parts(nodes, leaves, root);
    let stats = collision.stats();
    debug!(
        triangles = mesh.tri_count(),
        nodes = collision.nodes().len(),
        leaves = collision.leaves().len(),
        max_depth = stats.max_depth,
        max_bucket = stats.max_bucket_size,
        "Built collision mesh"
    );

    collision
}

/// Union of the per-triangle bounding boxes.
///
/// An empty set yields the canonical empty box.
fn tight_bounds(tris: &[Triangle]) -> Aabb {
    let mut bounds = Aabb::empty();
    for tri in tris {
        bounds = bounds.union(&tri.bounding_box());
    }
    bounds
}

/// Recursively subdivide a triangle set into the transient tree.
fn subdivide(tris: Vec<Triangle>, max_leaf: usize) -> BuildNode {
    let bounds = tight_bounds(&tris);

    if tris.len() <= max_leaf {
        return BuildNode {
            bounds,
            kind: BuildKind::Bucket(tris),
        };
    }

    let octants = bounds.octants();
    let boxes: Vec<Aabb> = tris.iter().map(Triangle::bounding_box).collect();

    // Stall check: a triangle larger than any child cell can make an octant
    // overlap the whole set, and recursing would never reduce the problem.
    for octant in &octants {
        let overlapping = boxes.iter().filter(|b| octant.intersects(b)).count();
        if overlapping == tris.len() {
            return BuildNode {
                bounds,
                kind: BuildKind::Bucket(tris),
            };
        }
    }

    // First-fit partition: each triangle lands in the first octant whose box
    // overlaps its own. The octants partition `bounds` and every triangle
    // box is contained in `bounds`, so an overlapping octant always exists.
    let mut buckets: [Vec<Triangle>; 8] = Default::default();
    for (tri, bbox) in tris.into_iter().zip(boxes) {
        let slot = octants
            .iter()
            .position(|octant| octant.intersects(&bbox))
            .unwrap_or(0);
        buckets[slot].push(tri);
    }

    // Empty buckets become empty leaves so child slots stay positional.
    let children = buckets.map(|bucket| Box::new(subdivide(bucket, max_leaf)));

    BuildNode {
        bounds,
        kind: BuildKind::Children(children),
    }
}

/// Flatten the transient tree post-order into the node and leaf tables.
///
/// Returns the index of the appended node; the value returned for the root
/// becomes the collision mesh's root id.
#[allow(clippy::cast_possible_truncation)] // node/leaf counts stay far below u32::MAX
fn flatten(
    node: BuildNode,
    nodes: &mut Vec<BvhNode>,
    leaves: &mut Vec<TriMesh>,
    rng: &mut StdRng,
) -> u32 {
    match node.kind {
        BuildKind::Bucket(tris) => {
            let bucket = leaves.len() as u32;
            leaves.push(TriMesh::new(tris));
            nodes.push(BvhNode::Leaf {
                bounds: node.bounds,
                bucket,
                color: Rgba::opaque(rng.gen(), rng.gen(), rng.gen()),
            });
            (nodes.len() - 1) as u32
        }
        BuildKind::Children(children) => {
            let mut ids = [0u32; 8];
            for (slot, child) in children.into_iter().enumerate() {
                ids[slot] = flatten(*child, nodes, leaves, rng);
            }
            nodes.push(BvhNode::Internal {
                bounds: node.bounds,
                children: ids,
            });
            (nodes.len() - 1) as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::BuildParams;

    fn spread_triangles(count: usize) -> Vec<Triangle> {
        (0..count)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let x = i as f64 * 3.0;
                Triangle::from_positions([x, 0.0, 0.0], [x + 0.5, 0.0, 0.0], [x, 0.5, 0.0])
            })
            .collect()
    }

    #[test]
    fn leaf_when_under_capacity() {
        let mesh = TriMesh::new(spread_triangles(4));
        let collision = build(&mesh, &BuildParams::default().with_max_tris_per_leaf(4));

        assert_eq!(collision.nodes().len(), 1);
        assert_eq!(collision.leaves().len(), 1);
        assert_eq!(collision.tri_count(), 4);
    }

    #[test]
    fn subdivides_over_capacity() {
        let mesh = TriMesh::new(spread_triangles(16));
        let collision = build(&mesh, &BuildParams::default().with_max_tris_per_leaf(2));

        let stats = collision.stats();
        assert!(stats.internal_count > 0);
        assert!(stats.max_bucket_size <= 2);
        assert_eq!(stats.total_triangles_in_leaves, 16);
    }

    #[test]
    fn stall_emits_leaf() {
        // One giant triangle plus overlapping copies: every octant of the
        // shared bounds overlaps all of them, so subdivision must stop.
        let big = Triangle::from_positions([0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [0.0, 10.0, 10.0]);
        let mesh = TriMesh::new(vec![big, big, big]);
        let collision = build(&mesh, &BuildParams::default().with_max_tris_per_leaf(1));

        assert_eq!(collision.nodes().len(), 1);
        assert_eq!(collision.tri_count(), 3);
    }

    #[test]
    fn deterministic_structure() {
        let mesh = TriMesh::new(spread_triangles(32));
        let params = BuildParams::default().with_max_tris_per_leaf(2);

        let a = build(&mesh, &params);
        let b = build(&mesh, &params);

        assert_eq!(a.root_id(), b.root_id());
        assert_eq!(a.nodes().len(), b.nodes().len());
        assert_eq!(a.leaves().len(), b.leaves().len());
        for (la, lb) in a.leaves().iter().zip(b.leaves()) {
            assert_eq!(la.tris(), lb.tris());
        }
    }

    #[test]
    fn seeded_colors_reproduce() {
        let mesh = TriMesh::new(spread_triangles(16));
        let params = BuildParams::seeded(7).with_max_tris_per_leaf(2);

        let a = build(&mesh, &params);
        let b = build(&mesh, &params);

        for (na, nb) in a.nodes().iter().zip(b.nodes()) {
            if let (BvhNode::Leaf { color: ca, .. }, BvhNode::Leaf { color: cb, .. }) = (na, nb) {
                assert_eq!(ca, cb);
            }
        }
    }

    #[test]
    fn empty_input_builds_single_empty_leaf() {
        let collision = build(&TriMesh::empty(), &BuildParams::default());

        assert_eq!(collision.nodes().len(), 1);
        assert_eq!(collision.root_id(), 0);
        assert!(collision.nodes()[0].is_leaf());
        assert!(collision.nodes()[0].bounds().is_empty());
    }

    #[test]
    fn empty_octants_kept_as_empty_leaves() {
        // Two far-apart clusters leave most octants empty
        let mut tris = spread_triangles(2);
        tris.extend(spread_triangles(2).into_iter().map(|t| {
            Triangle::new(
                prox_types::Vertex::from_coords(
                    t.a.position.x,
                    t.a.position.y + 100.0,
                    t.a.position.z + 100.0,
                ),
                prox_types::Vertex::from_coords(
                    t.b.position.x,
                    t.b.position.y + 100.0,
                    t.b.position.z + 100.0,
                ),
                prox_types::Vertex::from_coords(
                    t.c.position.x,
                    t.c.position.y + 100.0,
                    t.c.position.z + 100.0,
                ),
            )
        }));
        let mesh = TriMesh::new(tris);
        let collision = build(&mesh, &BuildParams::default().with_max_tris_per_leaf(1));

        let stats = collision.stats();
        assert!(stats.empty_leaf_count > 0);
        assert_eq!(stats.leaf_count, stats.internal_count * 8 - stats.internal_count + 1);
    }
}
