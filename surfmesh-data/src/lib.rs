//! Surfmesh Data Crate
//!
//! Triangle meshes with named per-vertex float attributes, and an ASCII PLY
//! reader/writer for them. No GPU or geometry processing lives here.

pub mod attributes;
pub mod error;
pub mod mesh;
pub mod ply;

pub use attributes::{
    AttributeRegistry, VERTEX_CHARGE, VERTEX_PREFIX, VERTEX_X, VERTEX_Y, VERTEX_Z,
};
pub use error::{MeshError, Result};
pub use mesh::Mesh;
pub use ply::{FacePolicy, LoadOptions, SaveOptions};
