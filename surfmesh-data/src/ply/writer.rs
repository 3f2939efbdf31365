//! PLY serialisation

use crate::attributes::{self, VERTEX_X, VERTEX_Y, VERTEX_Z};
use crate::error::{MeshError, Result};
use crate::mesh::Mesh;
use crate::ply::{FacePolicy, SaveOptions};
use tracing::{debug, warn};

/// Render `mesh` as the complete text of an ASCII PLY file.
pub(crate) fn write_mesh(mesh: &Mesh, options: &SaveOptions) -> Result<String> {
    let columns = property_columns(mesh)?;
    let precision = options.precision;

    let mut out = String::from("ply\nformat ascii 1.0\n");
    if !options.comment.is_empty() {
        out.push_str(&format!("comment {}\n", options.comment.replace('\n', " ")));
    }
    out.push_str(&format!("element vertex {}\n", mesh.vertices.len()));
    for (_, property, _) in &columns {
        out.push_str(&format!("property float {property}\n"));
    }
    out.push_str(&format!("element face {}\n", mesh.faces.len()));
    out.push_str("property list uchar int vertex_indices\n");
    out.push_str("end_header\n");

    for (i, vertex) in mesh.vertices.iter().enumerate() {
        let row: Vec<String> = columns
            .iter()
            .map(|(_, _, source)| {
                let value = match source {
                    Column::Axis(axis) => vertex[*axis],
                    Column::Values(values) => values[i],
                };
                format!("{value:.precision$}")
            })
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }

    let mut truncated = 0usize;
    for (i, face) in mesh.faces.iter().enumerate() {
        let (a, b, c) = match (options.face_policy, face.as_slice()) {
            (_, [a, b, c]) => (a, b, c),
            (FacePolicy::Lenient, [a, b, c, ..]) => {
                truncated += 1;
                (a, b, c)
            }
            _ => {
                return Err(MeshError::UnsupportedArity {
                    face: i,
                    arity: face.len(),
                });
            }
        };
        out.push_str(&format!("3 {a} {b} {c}\n"));
    }
    if truncated > 0 {
        warn!(
            "{} faces have more than three vertices, only the first three were written",
            truncated
        );
    }

    Ok(out)
}

enum Column<'a> {
    Axis(usize),
    Values(&'a [f32]),
}

/// Declared vertex properties in output order: `(attribute, property, source)`.
fn property_columns(mesh: &Mesh) -> Result<Vec<(&str, &str, Column<'_>)>> {
    let mut columns = Vec::new();

    // Positions are always written when there are vertices.
    if !mesh.vertices.is_empty() {
        for name in [VERTEX_X, VERTEX_Y, VERTEX_Z] {
            if !mesh.attributes.contains(name) {
                debug!("Position attribute {} not registered, declaring it first", name);
                columns.push(position_column(name));
            }
        }
    }

    for name in mesh.attributes.names() {
        let Some(property) = attributes::property_name(name) else {
            debug!("Attribute {} has no {} prefix, not written", name, attributes::VERTEX_PREFIX);
            continue;
        };
        if attributes::position_axis(name).is_some() {
            columns.push(position_column(name));
            continue;
        }
        let values = mesh.attributes.get(name).unwrap_or_default();
        if values.len() != mesh.vertices.len() {
            return Err(MeshError::LengthMismatch {
                name: name.to_string(),
                expected: mesh.vertices.len(),
                actual: values.len(),
            });
        }
        columns.push((name, property, Column::Values(values)));
    }

    Ok(columns)
}

fn position_column(name: &str) -> (&str, &str, Column<'static>) {
    let property = attributes::property_name(name).unwrap_or(name);
    let axis = attributes::position_axis(name).unwrap_or(0);
    (name, property, Column::Axis(axis))
}
