//! PLY header scanning

use crate::error::{MeshError, Result};

/// One scalar column of a vertex data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VertexColumn {
    /// `property float <name>`, kept as attribute `vertex_<name>`.
    Float(String),
    /// Any other scalar property type; its column is skipped.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    Vertex,
    Face,
    Other,
}

/// Counts and vertex layout declared by a PLY header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlyHeader {
    pub format: Option<String>,
    pub vertex_count: usize,
    pub face_count: usize,
    /// Scalar vertex columns in declaration order.
    pub vertex_columns: Vec<VertexColumn>,
    /// Index of the first data line (the line after `end_header`).
    pub data_start: usize,
}

impl PlyHeader {
    /// Scan `lines` up to and including the `end_header` line.
    pub fn parse(lines: &[&str]) -> Result<Self> {
        let mut header = PlyHeader::default();
        let mut element: Option<Element> = None;

        for (idx, line) in lines.iter().enumerate() {
            let line_no = idx + 1;
            let tokens: Vec<&str> = line.split_whitespace().collect();

            if tokens.contains(&"end_header") {
                header.data_start = idx + 1;
                return Ok(header);
            }

            match tokens.as_slice() {
                ["format", kind, ..] => {
                    if *kind != "ascii" {
                        return Err(MeshError::UnsupportedFormat(kind.to_string()));
                    }
                    header.format = Some(kind.to_string());
                }
                ["element", name, count, ..] => {
                    let count = parse_count(count, line_no)?;
                    element = Some(match *name {
                        "vertex" => {
                            header.vertex_count = count;
                            Element::Vertex
                        }
                        "face" => {
                            header.face_count = count;
                            Element::Face
                        }
                        _ => Element::Other,
                    });
                }
                ["element", ..] => {
                    return Err(MeshError::MalformedHeader {
                        line: line_no,
                        message: format!("element declaration without count: '{}'", line.trim()),
                    });
                }
                // List properties have no fixed column; ignored.
                ["property", "list", ..] => {}
                ["property", kind, name, ..] if element == Some(Element::Vertex) => {
                    let column = if matches!(*kind, "float" | "float32") {
                        if header.float_properties().any(|p| p == *name) {
                            return Err(MeshError::MalformedHeader {
                                line: line_no,
                                message: format!("duplicate vertex property '{name}'"),
                            });
                        }
                        VertexColumn::Float(name.to_string())
                    } else {
                        VertexColumn::Skipped
                    };
                    header.vertex_columns.push(column);
                }
                _ => {}
            }
        }

        Err(MeshError::MalformedHeader {
            line: lines.len(),
            message: "end_header not found".to_string(),
        })
    }

    /// Declared float vertex property names, in column order.
    pub fn float_properties(&self) -> impl Iterator<Item = &str> {
        self.vertex_columns.iter().filter_map(|c| match c {
            VertexColumn::Float(name) => Some(name.as_str()),
            VertexColumn::Skipped => None,
        })
    }
}

fn parse_count(token: &str, line: usize) -> Result<usize> {
    token.parse().map_err(|_| MeshError::MalformedHeader {
        line,
        message: format!("invalid element count '{token}'"),
    })
}
