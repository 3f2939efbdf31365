//! Triangle mesh with named per-vertex attributes.

use crate::attributes::{self, AttributeRegistry, VERTEX_CHARGE, VERTEX_X, VERTEX_Y, VERTEX_Z};
use crate::error::{MeshError, Result};
use crate::ply::{self, LoadOptions, SaveOptions};
use glam::Vec3;
use std::path::Path;
use tracing::{debug, info};

/// Vertices, faces and per-vertex float attributes.
///
/// `vertices` is the only store of positions: `vertex_x`, `vertex_y` and
/// `vertex_z` are views over it. Every other attribute holds exactly one
/// value per vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    /// Vertex index lists, normally triangles.
    pub faces: Vec<Vec<u32>>,
    pub(crate) attributes: AttributeRegistry,
}

impl Mesh {
    /// A mesh with no vertices, faces or attributes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a mesh from positions and triangles.
    ///
    /// With at least one vertex this registers `vertex_x`, `vertex_y`,
    /// `vertex_z` and a zero-filled `vertex_charge`, in that order.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<[u32; 3]>) -> Self {
        Self::from_polygons(vertices, faces.into_iter().map(Vec::from).collect())
    }

    /// Like [`Mesh::new`], but faces may have any number of indices.
    pub fn from_polygons(vertices: Vec<Vec3>, faces: Vec<Vec<u32>>) -> Self {
        let mut attributes = AttributeRegistry::new();
        if !vertices.is_empty() {
            for name in [VERTEX_X, VERTEX_Y, VERTEX_Z] {
                attributes.register(name);
            }
            attributes.insert(VERTEX_CHARGE, vec![0.0; vertices.len()]);
        }
        Self {
            vertices,
            faces,
            attributes,
        }
    }

    pub(crate) fn from_parts(
        vertices: Vec<Vec3>,
        faces: Vec<Vec<u32>>,
        attributes: AttributeRegistry,
    ) -> Self {
        Self {
            vertices,
            faces,
            attributes,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Store `values` under `name`, registering the name on first use.
    ///
    /// `name` must be a single whitespace-free token other than the bare
    /// `vertex_` prefix, and `values` must hold one entry per vertex. Setting a position
    /// attribute rewrites that coordinate of every vertex.
    pub fn set_attribute(&mut self, name: &str, values: Vec<f32>) -> Result<()> {
        if !attributes::is_valid_name(name) {
            return Err(MeshError::InvalidAttributeName(name.to_string()));
        }
        if values.len() != self.vertices.len() {
            return Err(MeshError::LengthMismatch {
                name: name.to_string(),
                expected: self.vertices.len(),
                actual: values.len(),
            });
        }

        if let Some(axis) = attributes::position_axis(name) {
            for (vertex, value) in self.vertices.iter_mut().zip(values) {
                vertex[axis] = value;
            }
            self.attributes.register(name);
        } else {
            self.attributes.insert(name, values);
        }
        Ok(())
    }

    /// Attribute names in registration order.
    pub fn get_attribute_names(&self) -> Vec<String> {
        self.attributes.names().map(str::to_string).collect()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }

    /// Copy of the values stored under `name`.
    pub fn get_attribute(&self, name: &str) -> Result<Vec<f32>> {
        if !self.attributes.contains(name) {
            return Err(MeshError::KeyNotFound(name.to_string()));
        }
        if let Some(axis) = attributes::position_axis(name) {
            return Ok(self.vertices.iter().map(|v| v[axis]).collect());
        }
        self.attributes
            .get(name)
            .map(<[f32]>::to_vec)
            .ok_or_else(|| MeshError::KeyNotFound(name.to_string()))
    }

    /// Faces as triangles; fails on the first face that is not one.
    pub fn triangles(&self) -> Result<Vec<[u32; 3]>> {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, face)| match face.as_slice() {
                [a, b, c] => Ok([*a, *b, *c]),
                _ => Err(MeshError::UnsupportedArity {
                    face: i,
                    arity: face.len(),
                }),
            })
            .collect()
    }

    /// Axis-aligned bounds `(min, max)`, or `None` without vertices.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        if self.vertices.is_empty() {
            return None;
        }
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for v in &self.vertices {
            min = min.min(*v);
            max = max.max(*v);
        }
        Some((min, max))
    }

    /// Parse ASCII PLY text.
    pub fn from_ply_str(content: &str, options: &LoadOptions) -> Result<Self> {
        ply::parse_mesh(content, options)
    }

    /// Render as ASCII PLY text.
    pub fn to_ply_string(&self, options: &SaveOptions) -> Result<String> {
        ply::write_mesh(self, options)
    }

    /// Read a mesh from an ASCII PLY file.
    pub fn from_ply(path: impl AsRef<Path>) -> Result<Self> {
        let mut mesh = Self::empty();
        mesh.load(path)?;
        Ok(mesh)
    }

    /// Replace this mesh with the contents of an ASCII PLY file.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.load_with(path, &LoadOptions::default())
    }

    /// [`Mesh::load`] with explicit options. On error `self` is unchanged.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_with(&mut self, path: impl AsRef<Path>, options: &LoadOptions) -> Result<()> {
        let path = path.as_ref();
        debug!("Loading PLY mesh from: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| MeshError::from_io(path, e))?;

        *self = Self::from_ply_str(&content, options)?;
        info!(
            "PLY mesh loaded: {} vertices, {} faces, {} attributes",
            self.vertex_count(),
            self.face_count(),
            self.attributes.len()
        );
        Ok(())
    }

    /// Write this mesh to an ASCII PLY file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_with(path, &SaveOptions::default())
    }

    /// [`Mesh::save`] with explicit options.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save_with(&self, path: impl AsRef<Path>, options: &SaveOptions) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_ply_string(options)?;
        std::fs::write(path, content).map_err(|e| MeshError::from_io(path, e))?;
        info!(
            "PLY mesh saved: {} vertices, {} faces",
            self.vertex_count(),
            self.face_count()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ply::FacePolicy;

    fn triangle() -> Mesh {
        Mesh::new(
            vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn test_new_registers_default_attributes() {
        let mesh = triangle();

        assert_eq!(
            mesh.get_attribute_names(),
            vec!["vertex_x", "vertex_y", "vertex_z", "vertex_charge"]
        );
        assert_eq!(mesh.get_attribute("vertex_charge").unwrap(), vec![0.0, 0.0, 0.0]);
        assert_eq!(mesh.get_attribute("vertex_x").unwrap(), vec![0.0, 1.0, 0.0]);
        assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_new_without_vertices_has_no_attributes() {
        let mesh = Mesh::new(vec![], vec![]);
        assert!(mesh.get_attribute_names().is_empty());
        assert!(mesh.is_empty());
        assert_eq!(mesh, Mesh::empty());
    }

    #[test]
    fn test_get_attribute_returns_copy() {
        let mesh = triangle();
        let mut charge = mesh.get_attribute("vertex_charge").unwrap();
        charge[0] = 42.0;
        let mut xs = mesh.get_attribute("vertex_x").unwrap();
        xs[1] = -1.0;

        assert_eq!(mesh.get_attribute("vertex_charge").unwrap(), vec![0.0; 3]);
        assert_eq!(mesh.vertices[1], Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_unknown_attribute() {
        let err = triangle().get_attribute("nonexistent").unwrap_err();
        assert!(matches!(err, MeshError::KeyNotFound(name) if name == "nonexistent"));
    }

    #[test]
    fn test_set_attribute_twice_keeps_single_name() {
        let mut mesh = triangle();
        mesh.set_attribute("vertex_hphob", vec![1.0, 2.0, 3.0]).unwrap();
        mesh.set_attribute("vertex_hphob", vec![4.0, 5.0, 6.0]).unwrap();

        let names = mesh.get_attribute_names();
        assert_eq!(names.iter().filter(|n| *n == "vertex_hphob").count(), 1);
        assert_eq!(names.last().map(String::as_str), Some("vertex_hphob"));
        assert_eq!(mesh.get_attribute("vertex_hphob").unwrap(), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_overwrite_keeps_registration_order() {
        let mut mesh = triangle();
        mesh.set_attribute("vertex_a", vec![0.0; 3]).unwrap();
        mesh.set_attribute("vertex_charge", vec![1.0; 3]).unwrap();

        assert_eq!(
            mesh.get_attribute_names(),
            vec!["vertex_x", "vertex_y", "vertex_z", "vertex_charge", "vertex_a"]
        );
    }

    #[test]
    fn test_set_attribute_length_checked() {
        let mut mesh = triangle();
        let err = mesh.set_attribute("vertex_charge", vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::LengthMismatch { expected: 3, actual: 1, .. }
        ));
        assert_eq!(mesh.get_attribute("vertex_charge").unwrap(), vec![0.0; 3]);
    }

    #[test]
    fn test_unwritable_attribute_names_rejected() {
        let mut mesh = triangle();
        for name in ["vertex_", "vertex_a b", "", "vertex_\tc"] {
            let err = mesh.set_attribute(name, vec![0.0; 3]).unwrap_err();
            assert!(matches!(err, MeshError::InvalidAttributeName(n) if n == name));
        }
        assert_eq!(mesh.get_attribute_names().len(), 4);
    }

    #[test]
    fn test_set_position_attribute_moves_vertices() {
        let mut mesh = triangle();
        mesh.set_attribute("vertex_z", vec![5.0, 6.0, 7.0]).unwrap();

        assert_eq!(mesh.vertices[2], Vec3::new(0.0, 1.0, 7.0));
        assert_eq!(mesh.get_attribute_names().len(), 4);
    }

    #[test]
    fn test_triangles_view() {
        assert_eq!(triangle().triangles().unwrap(), vec![[0, 1, 2]]);

        let quad = Mesh::from_polygons(vec![Vec3::ZERO; 4], vec![vec![0, 1, 2, 3]]);
        assert!(matches!(
            quad.triangles(),
            Err(MeshError::UnsupportedArity { face: 0, arity: 4 })
        ));
    }

    #[test]
    fn test_bounds() {
        assert_eq!(Mesh::empty().bounds(), None);
        let mesh = Mesh::new(
            vec![Vec3::new(-1.0, 2.0, 0.5), Vec3::new(3.0, -2.0, 0.0)],
            vec![],
        );
        assert_eq!(
            mesh.bounds(),
            Some((Vec3::new(-1.0, -2.0, 0.0), Vec3::new(3.0, 2.0, 0.5)))
        );
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.ply");

        let mut mesh = Mesh::new(
            vec![
                Vec3::new(0.123, 4.567, -8.9),
                Vec3::new(1.0, 0.25, 0.0),
                Vec3::new(-0.5, 1.75, 2.004),
                Vec3::new(10.0, -3.333, 0.5),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        );
        mesh.set_attribute("vertex_charge", vec![0.3, -0.7, 1.0, 0.0])
            .unwrap();
        mesh.save(&path).unwrap();

        let loaded = Mesh::from_ply(&path).unwrap();
        assert_eq!(loaded.vertex_count(), 4);
        assert_eq!(loaded.faces, mesh.faces);
        assert_eq!(loaded.get_attribute_names(), mesh.get_attribute_names());
        for name in mesh.get_attribute_names() {
            let original = mesh.get_attribute(&name).unwrap();
            let reloaded = loaded.get_attribute(&name).unwrap();
            for (a, b) in original.iter().zip(&reloaded) {
                assert!((a - b).abs() <= 0.005 + 1e-6, "{name}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn test_load_scenario_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triangle.ply");
        std::fs::write(
            &path,
            "ply\nformat ascii 1.0\nelement vertex 3\nproperty float x\nproperty float y\nproperty float z\nelement face 1\nproperty list uchar int vertex_indices\nend_header\n0.00 0.00 0.00\n1.00 0.00 0.00\n0.00 1.00 0.00\n3 0 1 2\n",
        )
        .unwrap();

        let mut mesh = triangle();
        mesh.set_attribute("vertex_extra", vec![1.0; 3]).unwrap();
        mesh.load(&path).unwrap();

        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.vertices[2], Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);
        assert!(!mesh.has_attribute("vertex_extra"));
        assert!(!mesh.has_attribute("vertex_charge"));
    }

    #[test]
    fn test_failed_load_leaves_mesh_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ply");
        std::fs::write(&path, "ply\nformat ascii 1.0\nelement vertex 2\n").unwrap();

        let mut mesh = triangle();
        let before = mesh.clone();
        let err = mesh.load(&path).unwrap_err();

        assert!(matches!(err, MeshError::MalformedHeader { .. }));
        assert_eq!(mesh, before);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Mesh::from_ply(dir.path().join("absent.ply")).unwrap_err();
        assert!(matches!(err, MeshError::FileNotFound(_)));
    }

    #[test]
    fn test_save_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.ply");
        let err = triangle().save(&path).unwrap_err();
        assert!(matches!(err, MeshError::FileNotFound(_) | MeshError::FileAccess { .. }));
    }

    #[test]
    fn test_strict_load_with_options() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.ply");
        let quad = Mesh::from_polygons(
            vec![Vec3::ZERO, Vec3::X, Vec3::ONE, Vec3::Y],
            vec![vec![0, 1, 2], vec![0, 2, 3]],
        );
        quad.save(&path).unwrap();

        let strict = LoadOptions::default().with_face_policy(FacePolicy::Strict);
        let mut mesh = Mesh::empty();
        mesh.load_with(&path, &strict).unwrap();
        assert_eq!(mesh.triangles().unwrap(), vec![[0, 1, 2], [0, 2, 3]]);
    }
}
