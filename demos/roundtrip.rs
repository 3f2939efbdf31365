//! Mesh round-trip example
//!
//! Builds a small surface patch, attaches a per-vertex attribute, writes it
//! as ASCII PLY and reads it back.
//!
//! Usage:
//!   cargo run --example roundtrip -- [output.ply]

use glam::Vec3;
use std::error::Error;
use std::path::PathBuf;
use surfmesh::{Mesh, SaveOptions};
use tracing::info;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("surfmesh_roundtrip.ply"));

    // 4x4 grid over the unit square, two triangles per cell
    let n = 4u32;
    let mut vertices = Vec::new();
    for j in 0..n {
        for i in 0..n {
            let (x, y) = (i as f32 / (n - 1) as f32, j as f32 / (n - 1) as f32);
            vertices.push(Vec3::new(x, y, (x * y).sin()));
        }
    }
    let mut faces = Vec::new();
    for j in 0..n - 1 {
        for i in 0..n - 1 {
            let a = j * n + i;
            faces.push([a, a + 1, a + n]);
            faces.push([a + 1, a + n + 1, a + n]);
        }
    }

    let charge: Vec<f32> = vertices.iter().map(|v| v.x - v.y).collect();
    let mut mesh = Mesh::new(vertices, faces);
    mesh.set_attribute("vertex_charge", charge)?;

    mesh.save_with(&output, &SaveOptions::default().with_precision(3))?;
    info!("Wrote {}", output.display());

    let loaded = Mesh::from_ply(&output)?;
    info!(
        "Read back {} vertices, {} faces, attributes: {:?}",
        loaded.vertex_count(),
        loaded.face_count(),
        loaded.get_attribute_names()
    );

    Ok(())
}
