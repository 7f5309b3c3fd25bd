//! Error types for snapshot parsing, graph validation and schema sources.

use thiserror::Error;

/// Error type for snapshot parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on type '{element}'")]
    InvalidAttribute {
        /// Type (or pointer) the attribute belongs to.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// Missing attribute required by the record's kind.
    #[error("missing required attribute '{attribute}' on type '{element}'")]
    MissingAttribute {
        /// Type the attribute belongs to.
        element: String,
        /// Attribute name.
        attribute: String,
    },
}

impl ParseError {
    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }
}

/// Error type for type graph construction and ordering.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A record references an id absent from the snapshot.
    #[error("type '{referencing_type}' references unknown type id '{missing_id}'")]
    UnknownReference {
        /// Name of the referencing type.
        referencing_type: String,
        /// The id that could not be resolved.
        missing_id: String,
    },

    /// Structural self-reference among bases.
    #[error("dependency cycle between '{type_name}' and '{conflicting_type_name}'")]
    DependencyCycle {
        /// Type reached again while still in progress.
        type_name: String,
        /// Type whose base edge closed the cycle.
        conflicting_type_name: String,
    },

    /// Duplicate definition.
    #[error("duplicate definition of type id '{id}' ('{name}')")]
    DuplicateDefinition {
        /// Duplicated id.
        id: String,
        /// Name of the second record.
        name: String,
    },

    /// Name is not `module::local`.
    #[error("invalid qualified name '{name}'")]
    InvalidName {
        /// The offending name.
        name: String,
    },

    /// Type not found.
    #[error("type '{name}' not found")]
    TypeNotFound {
        /// Type name.
        name: String,
    },

    /// A reference resolved to a record of the wrong kind.
    #[error("type '{name}' is a {actual}, expected {expected}")]
    UnexpectedKind {
        /// Type name.
        name: String,
        /// Expected kind.
        expected: &'static str,
        /// Actual kind.
        actual: &'static str,
    },
}

impl SchemaError {
    /// Creates an unknown reference error.
    pub fn unknown_reference(
        referencing_type: impl Into<String>,
        missing_id: impl Into<String>,
    ) -> Self {
        Self::UnknownReference {
            referencing_type: referencing_type.into(),
            missing_id: missing_id.into(),
        }
    }

    /// Creates a dependency cycle error.
    pub fn cycle(type_name: impl Into<String>, conflicting_type_name: impl Into<String>) -> Self {
        Self::DependencyCycle {
            type_name: type_name.into(),
            conflicting_type_name: conflicting_type_name.into(),
        }
    }
}

impl From<shapegen_core::NameError> for SchemaError {
    fn from(err: shapegen_core::NameError) -> Self {
        match err {
            shapegen_core::NameError::InvalidName { name } => Self::InvalidName { name },
        }
    }
}

/// Error type reported by a schema source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be reached.
    #[error("schema source unavailable: {message}")]
    Unavailable {
        /// Error message.
        message: String,
    },

    /// The introspection query failed or returned malformed rows.
    #[error("schema query failed: {message}")]
    Query {
        /// Error message.
        message: String,
    },
}

impl SourceError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a query error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}
