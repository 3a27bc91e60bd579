//! Cache-friendly proximity queries over triangle meshes.
//!
//! This crate answers nearest-point queries against a triangular surface
//! mesh: given a query point and a search radius, it returns the point on
//! the mesh minimizing the distance to the query, together with the BVH
//! leaf that owns it, or reports a miss when no triangle lies within the
//! radius.
//!
//! # Features
//!
//! - **Octree BVH**: recursive octant subdivision of axis-aligned bounding
//!   boxes, with a stall check for triangles larger than any child cell
//! - **Flat storage**: the tree is flattened post-order into dense node and
//!   leaf tables addressed by integer index, so the traversal's hot set
//!   stays in cache
//! - **Exact kernels**: closest point on segment and on triangle
//!   (barycentric solve with edge fallback)
//! - **Branch-and-bound traversal**: subtrees that cannot beat the best
//!   distance found so far are pruned, nearest children first
//!
//! # Layer 0 Crate
//!
//! Zero rendering dependencies. The per-leaf debug colors exist for
//! downstream visualizers and never influence query results.
//!
//! # Example
//!
//! ```
//! use nalgebra::Point3;
//! use prox_query::{closest_point_on_mesh, BuildParams, CollisionMesh};
//! use prox_types::{TriMesh, Triangle};
//!
//! let mesh = TriMesh::new(vec![Triangle::from_positions(
//!     [0.0, 0.0, 0.0],
//!     [1.0, 0.0, 0.0],
//!     [0.0, 1.0, 0.0],
//! )]);
//!
//! let collision = CollisionMesh::build(&mesh, &BuildParams::default());
//!
//! match closest_point_on_mesh(&collision, Point3::new(2.0, 0.0, 0.0), 5.0) {
//!     Some(hit) => println!("closest point {} at distance {}", hit.point, hit.distance),
//!     None => println!("nothing within radius"),
//! }
//! ```
//!
//! # Concurrency
//!
//! Construction and queries are single threaded. A built [`CollisionMesh`]
//! is deeply immutable; sharing it across threads for concurrent queries
//! needs no synchronization. Rebuild after any mesh change.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod builder;
mod collision;
mod distance;
mod params;
mod query;

pub use collision::{BvhNode, BvhStats, CollisionMesh};
pub use distance::{closest_point_on_segment, closest_point_on_triangle};
pub use params::BuildParams;
pub use query::{closest_point_brute_force, closest_point_on_mesh, ProximityHit};
