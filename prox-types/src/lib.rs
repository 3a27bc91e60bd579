//! Core geometry types for proximity queries.
//!
//! This crate provides the foundational types shared by the proximity-query
//! workspace:
//!
//! - [`Vertex`] - A point in 3D space with a normal and a color
//! - [`Triangle`] - A concrete triangle carrying three full vertices
//! - [`TriMesh`] - A triangle soup with a cached bounding box
//! - [`Aabb`] - Axis-aligned bounding box with overlap kernels
//! - [`Rgba`] - RGBA color with float components
//!
//! # Layer 0 Crate
//!
//! This crate has **zero rendering dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Game engines
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`. Vertex
//! normals and colors are carried through untouched; only positions
//! participate in geometric queries.
//!
//! # Example
//!
//! ```
//! use prox_types::{TriMesh, Triangle, Vertex};
//!
//! let tri = Triangle::from_positions(
//!     [0.0, 0.0, 0.0],
//!     [1.0, 0.0, 0.0],
//!     [0.0, 1.0, 0.0],
//! );
//! let mesh = TriMesh::new(vec![tri]);
//!
//! assert_eq!(mesh.tri_count(), 1);
//! assert!(!mesh.bounds().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod color;
mod mesh;
mod triangle;
mod vertex;

pub use bounds::Aabb;
pub use color::Rgba;
pub use mesh::TriMesh;
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
