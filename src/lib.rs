//! Surfmesh
//!
//! Load and save ASCII PLY surface meshes with per-vertex attributes.
//! Everything lives in `surfmesh-data`; this crate re-exports it.

pub use surfmesh_data::*;
