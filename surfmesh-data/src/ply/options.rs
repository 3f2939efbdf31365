//! Load and save configuration.

/// How faces that are not triangles are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FacePolicy {
    /// Load faces of any arity as read; on save, emit the first three
    /// indices of longer faces.
    #[default]
    Lenient,
    /// Reject any face that is not a triangle with `UnsupportedArity`.
    Strict,
}

/// Options for parsing a PLY file into a mesh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub face_policy: FacePolicy,
}

impl LoadOptions {
    pub fn with_face_policy(mut self, face_policy: FacePolicy) -> Self {
        self.face_policy = face_policy;
        self
    }
}

/// Options for serialising a mesh as ASCII PLY.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOptions {
    /// Decimal places written for every float value.
    pub precision: usize,
    /// Text of the generator `comment` header line. Empty omits the line.
    pub comment: String,
    pub face_policy: FacePolicy,
}

impl SaveOptions {
    pub const DEFAULT_PRECISION: usize = 2;
    pub const DEFAULT_COMMENT: &'static str = "Generated by surfmesh";

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_face_policy(mut self, face_policy: FacePolicy) -> Self {
        self.face_policy = face_policy;
        self
    }
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            precision: Self::DEFAULT_PRECISION,
            comment: Self::DEFAULT_COMMENT.to_string(),
            face_policy: FacePolicy::default(),
        }
    }
}
