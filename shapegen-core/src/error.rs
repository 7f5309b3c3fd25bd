//! Error types for shapegen core operations.

use thiserror::Error;

/// Error type for qualified-name handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameError {
    /// Name is missing its `module::` qualifier.
    #[error("invalid qualified name '{name}': expected 'module::local'")]
    InvalidName {
        /// The offending name.
        name: String,
    },
}

/// Result type alias for shapegen core operations.
pub type Result<T> = std::result::Result<T, NameError>;
