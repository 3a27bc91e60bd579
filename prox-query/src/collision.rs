//! Flat collision-mesh storage.
//!
//! The BVH is stored as two contiguous, index-addressed arrays: a node table
//! and a leaf table. Nodes reference children and leaf buckets by integer
//! index, never by pointer. The node table is small and dense so the hot set
//! of a query stays in L1/L2; triangle payloads live in the leaf table and
//! are touched only when a leaf survives pruning.

use prox_types::{Aabb, Rgba, TriMesh, Triangle};

use crate::builder;
use crate::params::BuildParams;

/// A node of the flattened BVH.
///
/// Internal nodes carry exactly eight child slots; empty octants occupy a
/// slot as empty leaves, which keeps nodes uniformly sized and child indices
/// positional. Leaves carry the index of their triangle bucket and a debug
/// color for visualization (ignored by queries).
#[derive(Debug, Clone)]
pub enum BvhNode {
    /// Internal node with eight children, one per octant.
    Internal {
        /// Bounding box containing all descendants.
        bounds: Aabb,
        /// Indices of the eight children in the node array, in canonical
        /// octant order.
        children: [u32; 8],
    },
    /// Leaf node referencing a triangle bucket.
    Leaf {
        /// Bounding box of the bucket.
        bounds: Aabb,
        /// Index of the bucket in the leaf array.
        bucket: u32,
        /// Random per-leaf debug color for visualization.
        color: Rgba,
    },
}

impl BvhNode {
    /// Get the bounding box of this node.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> &Aabb {
        match self {
            Self::Internal { bounds, .. } | Self::Leaf { bounds, .. } => bounds,
        }
    }

    /// Check if this node is a leaf.
    #[inline]
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }
}

/// An immutable collision mesh: a flat BVH over a triangle soup.
///
/// Built once with [`CollisionMesh::build`]; rebuild after any mesh change.
/// After construction the structure is deeply immutable and can be shared
/// across threads for concurrent queries without synchronization.
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
/// let hit = closest_point_on_mesh(&collision, Point3::new(2.0, 0.0, 0.0), 5.0);
/// assert!(hit.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct CollisionMesh {
    nodes: Vec<BvhNode>,
    leaves: Vec<TriMesh>,
    root: u32,
}

impl CollisionMesh {
    /// Build a collision mesh from a triangle mesh.
    ///
    /// Recursively subdivides the mesh bounds into octants until each cell
    /// holds at most `params.max_tris_per_leaf` triangles (or subdivision
    /// stalls), then flattens the tree post-order so every node's children
    /// precede it in the node array.
    ///
    /// Building an empty mesh is legal: the result is a single empty leaf
    /// and every query against it misses.
    #[must_use]
    pub fn build(mesh: &TriMesh, params: &BuildParams) -> Self {
        builder::build(mesh, params)
    }

    pub(crate) fn from_parts(nodes: Vec<BvhNode>, leaves: Vec<TriMesh>, root: u32) -> Self {
        Self {
            nodes,
            leaves,
            root,
        }
    }

    /// Get the index of the root node.
    #[inline]
    #[must_use]
    pub const fn root_id(&self) -> u32 {
        self.root
    }

    /// Get the node table.
    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    /// Get the leaf-bucket table.
    #[inline]
    #[must_use]
    pub fn leaves(&self) -> &[TriMesh] {
        &self.leaves
    }

    /// Get a node by index.
    #[inline]
    #[must_use]
    pub fn node(&self, id: u32) -> Option<&BvhNode> {
        self.nodes.get(id as usize)
    }

    /// Get a leaf bucket by index.
    #[inline]
    #[must_use]
    pub fn leaf(&self, id: u32) -> Option<&TriMesh> {
        self.leaves.get(id as usize)
    }

    /// Get the total number of triangles across all leaf buckets.
    #[must_use]
    pub fn tri_count(&self) -> usize {
        self.leaves.iter().map(TriMesh::tri_count).sum()
    }

    /// Check if the collision mesh holds no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves.iter().all(TriMesh::is_empty)
    }

    /// Collect every triangle, concatenating the leaf buckets in index
    /// order.
    ///
    /// Rebuilding from this list with the same parameters reproduces a
    /// structurally identical collision mesh (debug colors aside).
    #[must_use]
    pub fn triangles(&self) -> Vec<Triangle> {
        self.leaves
            .iter()
            .flat_map(|leaf| leaf.tris().iter().copied())
            .collect()
    }

    /// Get statistics about the tree structure.
    #[must_use]
    pub fn stats(&self) -> BvhStats {
        let mut stats = BvhStats::default();
        if !self.nodes.is_empty() {
            self.collect_stats(self.root, 0, &mut stats);
        }
        stats
    }

    fn collect_stats(&self, id: u32, depth: usize, stats: &mut BvhStats) {
        stats.max_depth = stats.max_depth.max(depth);

        match &self.nodes[id as usize] {
            BvhNode::Leaf { bucket, .. } => {
                let count = self.leaves[*bucket as usize].tri_count();
                stats.leaf_count += 1;
                if count == 0 {
                    stats.empty_leaf_count += 1;
                }
                stats.total_triangles_in_leaves += count;
                stats.max_bucket_size = stats.max_bucket_size.max(count);
            }
            BvhNode::Internal { children, .. } => {
                stats.internal_count += 1;
                for &child in children {
                    self.collect_stats(child, depth + 1, stats);
                }
            }
        }
    }
}

/// Statistics about a collision mesh's tree structure.
#[derive(Debug, Default, Clone)]
pub struct BvhStats {
    /// Number of internal nodes.
    pub internal_count: usize,
    /// Number of leaf nodes.
    pub leaf_count: usize,
    /// Number of leaves with an empty bucket.
    pub empty_leaf_count: usize,
    /// Maximum depth of the tree (root = 0).
    pub max_depth: usize,
    /// Largest bucket size across all leaves.
    pub max_bucket_size: usize,
    /// Total triangles stored across all leaves.
    pub total_triangles_in_leaves: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_tetrahedron() -> TriMesh {
        let v = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ];
        TriMesh::new(vec![
            Triangle::from_positions(v[0], v[1], v[2]),
            Triangle::from_positions(v[0], v[1], v[3]),
            Triangle::from_positions(v[0], v[2], v[3]),
            Triangle::from_positions(v[1], v[2], v[3]),
        ])
    }

    /// 32 small triangles on a 4x4x2 grid. Small enough relative to their
    /// spacing that octant subdivision separates them without stalling.
    fn scattered_mesh() -> TriMesh {
        let mut tris = Vec::new();
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..2 {
                    let x = f64::from(i) * 2.0;
                    let y = f64::from(j) * 2.0;
                    let z = f64::from(k) * 4.0;
                    tris.push(Triangle::from_positions(
                        [x, y, z],
                        [x + 0.2, y, z],
                        [x, y + 0.2, z],
                    ));
                }
            }
        }
        TriMesh::new(tris)
    }

    #[test]
    fn build_empty_mesh() {
        let collision = CollisionMesh::build(&TriMesh::empty(), &BuildParams::default());

        assert!(collision.is_empty());
        assert_eq!(collision.tri_count(), 0);
        assert_eq!(collision.nodes().len(), 1);
        assert_eq!(collision.leaves().len(), 1);
        assert!(collision.nodes()[0].bounds().is_empty());
    }

    #[test]
    fn root_is_in_range() {
        let collision = CollisionMesh::build(&unit_tetrahedron(), &BuildParams::default());
        assert!((collision.root_id() as usize) < collision.nodes().len());
    }

    #[test]
    fn children_precede_parents() {
        // Force subdivision with a tiny leaf capacity
        let params = BuildParams::default().with_max_tris_per_leaf(1);
        let collision = CollisionMesh::build(&scattered_mesh(), &params);

        for (id, node) in collision.nodes().iter().enumerate() {
            if let BvhNode::Internal { children, .. } = node {
                for &child in children {
                    assert!((child as usize) < id, "post-order layout violated");
                }
            }
        }
        // The root is the last node appended
        assert_eq!(collision.root_id() as usize, collision.nodes().len() - 1);
    }

    #[test]
    fn child_bounds_nest_in_parent() {
        let params = BuildParams::default().with_max_tris_per_leaf(1);
        let collision = CollisionMesh::build(&scattered_mesh(), &params);

        for node in collision.nodes() {
            if let BvhNode::Internal { bounds, children } = node {
                for &child in children {
                    let child_bounds = collision.nodes()[child as usize].bounds();
                    if !child_bounds.is_empty() {
                        assert_eq!(bounds.union(child_bounds), *bounds);
                    }
                }
            }
        }
    }

    #[test]
    fn triangle_partition() {
        let mesh = scattered_mesh();
        let params = BuildParams::default().with_max_tris_per_leaf(1);
        let collision = CollisionMesh::build(&mesh, &params);

        let mut collected = collision.triangles();
        assert_eq!(collected.len(), mesh.tri_count());

        // Each input triangle appears exactly once across the buckets
        for tri in mesh.iter() {
            let at = collected
                .iter()
                .position(|t| t == tri)
                .expect("triangle missing from buckets");
            collected.swap_remove(at);
        }
        assert!(collected.is_empty());
    }

    #[test]
    fn bucket_indices_in_range() {
        let params = BuildParams::default().with_max_tris_per_leaf(1);
        let collision = CollisionMesh::build(&scattered_mesh(), &params);

        for node in collision.nodes() {
            if let BvhNode::Leaf { bucket, .. } = node {
                assert!((*bucket as usize) < collision.leaves().len());
            }
        }
    }

    #[test]
    fn stats_account_for_all_triangles() {
        let params = BuildParams::default().with_max_tris_per_leaf(2);
        let collision = CollisionMesh::build(&unit_tetrahedron(), &params);

        let stats = collision.stats();
        assert_eq!(stats.total_triangles_in_leaves, 4);
        assert!(stats.leaf_count > 0);
        assert!(stats.max_bucket_size <= 2 || stats.internal_count == 0);
    }

    #[test]
    fn single_leaf_when_capacity_suffices() {
        let collision = CollisionMesh::build(
            &unit_tetrahedron(),
            &BuildParams::default().with_max_tris_per_leaf(16),
        );

        assert_eq!(collision.nodes().len(), 1);
        assert!(collision.nodes()[0].is_leaf());
        let stats = collision.stats();
        assert_eq!(stats.internal_count, 0);
        assert_eq!(stats.max_depth, 0);
    }

    #[test]
    fn internal_nodes_have_dense_children() {
        let params = BuildParams::default().with_max_tris_per_leaf(1);
        let collision = CollisionMesh::build(&scattered_mesh(), &params);
        let stats = collision.stats();

        // Every internal node contributes exactly eight children
        let expected_nodes = stats.internal_count * 8 + 1;
        assert_eq!(collision.nodes().len(), expected_nodes);
    }

    #[test]
    fn accessors_reject_out_of_range() {
        let collision = CollisionMesh::build(&unit_tetrahedron(), &BuildParams::default());
        let node_count = collision.nodes().len() as u32;
        let leaf_count = collision.leaves().len() as u32;

        assert!(collision.node(node_count).is_none());
        assert!(collision.leaf(leaf_count).is_none());
        assert!(collision.node(collision.root_id()).is_some());
    }

    #[test]
    fn leaf_bounds_contain_their_triangles() {
        let params = BuildParams::default().with_max_tris_per_leaf(1);
        let collision = CollisionMesh::build(&scattered_mesh(), &params);

        for node in collision.nodes() {
            if let BvhNode::Leaf { bounds, bucket, .. } = node {
                let leaf = &collision.leaves()[*bucket as usize];
                for tri in leaf.iter() {
                    for position in tri.positions() {
                        // Positions may sit on the boundary but never outside
                        assert!(bounds.expanded(1e-9).contains(&position));
                    }
                }
            }
        }
    }
}
