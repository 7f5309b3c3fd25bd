//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Snapshot parsing error.
    #[error("snapshot parse error: {0}")]
    Parse(#[from] shapegen_schema::ParseError),

    /// Schema graph error.
    #[error("schema error: {0}")]
    Schema(#[from] shapegen_schema::SchemaError),

    /// Schema source error.
    #[error("source error: {0}")]
    Source(#[from] shapegen_schema::SourceError),

    /// Nested union-of-intersection or intersection-of-union target.
    #[error("unsupported shape for type '{type_name}': {reason}")]
    ShapeUnsupported {
        /// Offending type name.
        type_name: String,
        /// What made the shape unsupported.
        reason: String,
    },

    /// An output unit could not be persisted.
    #[error("failed to persist '{path}': {source}")]
    Persist {
        /// Output unit path.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodegenError {
    /// Creates an unsupported shape error.
    pub fn shape_unsupported(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ShapeUnsupported {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}

impl From<shapegen_core::NameError> for CodegenError {
    fn from(err: shapegen_core::NameError) -> Self {
        Self::Schema(err.into())
    }
}
