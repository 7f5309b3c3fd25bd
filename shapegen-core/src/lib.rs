//! # shapegen Core
//!
//! Vocabulary shared by the schema and code generation crates.
//!
//! This crate provides:
//! - Cardinality and pointer kind markers understood by the runtime library
//! - Scalar representations used for generated property types
//! - Qualified-name splitting and identifier sanitizing
//! - Error types for name handling

pub mod error;
pub mod names;
pub mod runtime;
pub mod types;

pub use error::{NameError, Result};
pub use names::{MODULE_SEPARATOR, QualifiedName, quote, to_ident};
pub use runtime::RuntimeTypeLibrary;
pub use types::{Cardinality, PointerKind, ScalarRepr};
