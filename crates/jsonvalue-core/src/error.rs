//! Error types for value construction, encoding, access and structured decode.

use std::fmt;

use thiserror::Error;

/// One step of a path into a value tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// An object key.
    Key(String),
    /// An array index.
    Index(usize),
}

/// Location of a field inside a value tree, e.g. `friends[1].name`.
///
/// Built from the leaf outward while a structured decode unwinds, so the
/// segments are always stored root-first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The empty path, pointing at the root value.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    fn prepend(&mut self, segment: PathSegment) {
        self.0.insert(0, segment);
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl From<Vec<PathSegment>> for FieldPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

/// Errors raised while building, encoding, mutating or decoding a [`Value`](crate::Value).
///
/// Scalar coercions ([`FromJson`](crate::FromJson)) never produce this type; they
/// report a mismatch as `None` so callers can try another target type.
#[derive(Error, Debug)]
pub enum JsonError {
    /// A native value has no JSON representation (raised during construction).
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// A required field was absent during structured decode.
    #[error("Missing field `{field}` at {path}")]
    MissingField { path: FieldPath, field: String },

    /// A field was present but held an incompatible variant.
    #[error("Type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: FieldPath,
        expected: String,
        found: String,
    },

    /// Any other structured decode failure reported by a `Deserialize` impl.
    #[error("Decode error at {path}: {message}")]
    Message { path: FieldPath, message: String },

    /// An index `set`/`remove` outside the array bounds.
    #[error("Index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The value cannot be written as JSON text (non-finite fraction).
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The input text was not valid JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl JsonError {
    /// The field path carried by structured-decode errors, if any.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            JsonError::MissingField { path, .. }
            | JsonError::TypeMismatch { path, .. }
            | JsonError::Message { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Record that this error happened underneath `segment`.
    pub(crate) fn within(mut self, segment: PathSegment) -> Self {
        match &mut self {
            JsonError::MissingField { path, .. }
            | JsonError::TypeMismatch { path, .. }
            | JsonError::Message { path, .. } => path.prepend(segment),
            _ => {}
        }
        self
    }

    pub(crate) fn within_key(self, key: &str) -> Self {
        self.within(PathSegment::Key(key.to_string()))
    }

    pub(crate) fn within_index(self, index: usize) -> Self {
        self.within(PathSegment::Index(index))
    }
}

/// Convenience alias used throughout jsonvalue-core.
pub type Result<T> = std::result::Result<T, JsonError>;
