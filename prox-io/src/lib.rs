//! Wavefront OBJ loading for the proximity-query workspace.
//!
//! This crate turns OBJ files into the in-memory [`TriMesh`](prox_types::TriMesh)
//! form the query core consumes. It is an external collaborator of the core:
//! the collision mesh and the proximity query impose no file format of their
//! own.
//!
//! # Supported OBJ subset
//!
//! - `v` vertex positions (extra components ignored)
//! - `vn` vertex normals
//! - `f` faces as `v`, `v//n`, or `v/t/n`, with 1-based or negative
//!   (relative) indices; polygons are fan triangulated
//! - comments and all other directives are skipped
//!
//! # Example
//!
//! ```no_run
//! use prox_io::load_obj;
//!
//! let mesh = load_obj("monkey.obj").unwrap();
//! println!("loaded {} triangles", mesh.tri_count());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod obj;

pub use error::{ObjError, ObjResult};
pub use obj::{load_obj, parse_obj};
