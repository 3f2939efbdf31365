//! Mesh summaries for the `info` command.

use serde::Serialize;
use std::fmt;
use surfmesh_data::{Mesh, MeshError};

/// Range of one attribute's values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeStats {
    pub name: String,
    pub min: Option<f32>,
    pub max: Option<f32>,
    pub mean: Option<f32>,
}

impl AttributeStats {
    fn new(name: String, values: &[f32]) -> Self {
        if values.is_empty() {
            return Self {
                name,
                min: None,
                max: None,
                mean: None,
            };
        }
        let min = values.iter().copied().fold(f32::INFINITY, f32::min);
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let mean = values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64;
        Self {
            name,
            min: Some(min),
            max: Some(max),
            mean: Some(mean as f32),
        }
    }
}

/// Serializable overview of a mesh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshSummary {
    pub vertex_count: usize,
    pub face_count: usize,
    pub non_triangle_faces: usize,
    pub bounds_min: Option<[f32; 3]>,
    pub bounds_max: Option<[f32; 3]>,
    pub attributes: Vec<AttributeStats>,
}

impl MeshSummary {
    pub fn from_mesh(mesh: &Mesh) -> Result<Self, MeshError> {
        let bounds = mesh.bounds();
        let attributes = mesh
            .get_attribute_names()
            .into_iter()
            .map(|name| {
                let values = mesh.get_attribute(&name)?;
                Ok(AttributeStats::new(name, &values))
            })
            .collect::<Result<Vec<_>, MeshError>>()?;

        Ok(Self {
            vertex_count: mesh.vertex_count(),
            face_count: mesh.face_count(),
            non_triangle_faces: mesh.faces.iter().filter(|f| f.len() != 3).count(),
            bounds_min: bounds.map(|(min, _)| min.to_array()),
            bounds_max: bounds.map(|(_, max)| max.to_array()),
            attributes,
        })
    }
}

impl fmt::Display for MeshSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "vertices: {}", self.vertex_count)?;
        write!(f, "faces: {}", self.face_count)?;
        if self.non_triangle_faces > 0 {
            write!(f, " ({} not triangles)", self.non_triangle_faces)?;
        }
        writeln!(f)?;
        if let (Some(min), Some(max)) = (self.bounds_min, self.bounds_max) {
            writeln!(
                f,
                "bounds: [{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
                min[0], min[1], min[2], max[0], max[1], max[2]
            )?;
        }
        write!(f, "attributes:")?;
        for stats in &self.attributes {
            write!(f, "\n  {}", stats.name)?;
            if let (Some(min), Some(max), Some(mean)) = (stats.min, stats.max, stats.mean) {
                write!(f, "  min {min:.3}  max {max:.3}  mean {mean:.3}")?;
            }
        }
        Ok(())
    }
}
