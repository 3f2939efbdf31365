//! ASCII PLY reading and writing

mod header;
mod options;
mod reader;
mod writer;

pub use header::{PlyHeader, VertexColumn};
pub use options::{FacePolicy, LoadOptions, SaveOptions};
pub(crate) use reader::parse_mesh;
pub(crate) use writer::write_mesh;
