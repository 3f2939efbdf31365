//! PLY body parsing

use crate::attributes::{self, AttributeRegistry};
use crate::error::{MeshError, Result};
use crate::mesh::Mesh;
use crate::ply::{FacePolicy, LoadOptions, PlyHeader, VertexColumn};
use glam::Vec3;
use std::fmt::Display;
use std::str::FromStr;
use tracing::{debug, warn};

const POSITION_PROPERTIES: [&str; 3] = ["x", "y", "z"];

/// Parse the full text of an ASCII PLY file into a new mesh.
pub(crate) fn parse_mesh(content: &str, options: &LoadOptions) -> Result<Mesh> {
    let lines: Vec<&str> = content.lines().collect();
    let header = PlyHeader::parse(&lines)?;
    let body = &lines[header.data_start..];

    let expected_rows = header
        .vertex_count
        .checked_add(header.face_count)
        .ok_or_else(|| MeshError::MalformedHeader {
            line: header.data_start,
            message: format!(
                "element counts too large: {} vertices, {} faces",
                header.vertex_count, header.face_count
            ),
        })?;
    if body.len() < expected_rows {
        return Err(MeshError::RowParse {
            line: lines.len() + 1,
            message: format!(
                "header declares {} vertex and {} face rows, found {} data lines",
                header.vertex_count,
                header.face_count,
                body.len()
            ),
        });
    }

    let (vertex_rows, rest) = body.split_at(header.vertex_count);
    let face_rows = &rest[..header.face_count];
    let first_face_line = header.data_start + header.vertex_count + 1;

    let (vertices, registry) = parse_vertices(&header, vertex_rows)?;
    let faces = parse_faces(face_rows, first_face_line, options.face_policy)?;

    let trailing = rest[header.face_count..]
        .iter()
        .filter(|l| !l.trim().is_empty())
        .count();
    if trailing > 0 {
        debug!("Ignoring {} lines after the last face row", trailing);
    }

    Ok(Mesh::from_parts(vertices, faces, registry))
}

fn parse_vertices(header: &PlyHeader, rows: &[&str]) -> Result<(Vec<Vec3>, AttributeRegistry)> {
    // (column index, property name) for every float column
    let float_columns: Vec<(usize, &str)> = header
        .vertex_columns
        .iter()
        .enumerate()
        .filter_map(|(col, c)| match c {
            VertexColumn::Float(name) => Some((col, name.as_str())),
            VertexColumn::Skipped => None,
        })
        .collect();

    let mut axis_slots = [0usize; 3];
    if !rows.is_empty() {
        for (axis, property) in POSITION_PROPERTIES.iter().enumerate() {
            axis_slots[axis] = float_columns
                .iter()
                .position(|(_, name)| name == property)
                .ok_or_else(|| MeshError::MalformedHeader {
                    line: header.data_start,
                    message: format!("vertex element has no 'property float {property}'"),
                })?;
        }
    }

    let mut values: Vec<Vec<f32>> = vec![Vec::with_capacity(rows.len()); float_columns.len()];
    let column_count = header.vertex_columns.len();

    for (i, row) in rows.iter().enumerate() {
        let line_no = header.data_start + i + 1;
        let tokens: Vec<&str> = row.split_whitespace().collect();
        if tokens.len() < column_count {
            return Err(MeshError::RowParse {
                line: line_no,
                message: format!(
                    "vertex row has {} values, expected {}",
                    tokens.len(),
                    column_count
                ),
            });
        }
        for (slot, (col, _)) in float_columns.iter().enumerate() {
            values[slot].push(parse_token(tokens[*col], line_no)?);
        }
    }

    let vertices = (0..rows.len())
        .map(|i| {
            Vec3::new(
                values[axis_slots[0]][i],
                values[axis_slots[1]][i],
                values[axis_slots[2]][i],
            )
        })
        .collect();

    let mut registry = AttributeRegistry::new();
    for ((_, property), column) in float_columns.iter().zip(values) {
        let name = attributes::attribute_name(property);
        if attributes::position_axis(&name).is_some() {
            registry.register(&name);
        } else {
            registry.insert(&name, column);
        }
    }

    Ok((vertices, registry))
}

fn parse_faces(rows: &[&str], first_line: usize, policy: FacePolicy) -> Result<Vec<Vec<u32>>> {
    let mut faces = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let line_no = first_line + i;
        let mut tokens = row.split_whitespace();
        let arity: usize = match tokens.next() {
            Some(token) => parse_token(token, line_no)?,
            None => {
                return Err(MeshError::RowParse {
                    line: line_no,
                    message: "empty face row".to_string(),
                });
            }
        };
        let indices = tokens
            .map(|t| parse_token::<u32>(t, line_no))
            .collect::<Result<Vec<_>>>()?;

        if indices.len() != arity {
            warn!(
                "Face at line {} declares {} vertices but lists {}",
                line_no,
                arity,
                indices.len()
            );
        }
        if policy == FacePolicy::Strict && indices.len() != 3 {
            return Err(MeshError::UnsupportedArity {
                face: i,
                arity: indices.len(),
            });
        }
        faces.push(indices);
    }

    Ok(faces)
}

fn parse_token<T>(token: &str, line: usize) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    token.parse().map_err(|e| MeshError::RowParse {
        line,
        message: format!("invalid value '{token}': {e}"),
    })
}
