//! # shapegen
//!
//! Generate statically typed TypeScript query builders from a database
//! schema snapshot.
//!
//! shapegen reads the type catalogue of a database (scalars, object types,
//! arrays, tuples, unions and intersections, implicit casts), validates and
//! orders it, and emits TypeScript units mirroring the schema for a runtime
//! query library.
//!
//! ## Features
//!
//! - **Validated type graph** - Every reference checked before generation starts
//! - **Dependency ordering** - Bases always precede the types built from them
//! - **Enum mirrors** - One `export enum` per enum scalar
//! - **Shape builders** - Pointer descriptors and a `shape` builder per object type
//! - **Cast maps** - Type-level tables of implicit cast compatibility
//!
//! ## Quick Start
//!
//! ```ignore
//! use shapegen::prelude::*;
//!
//! let source = JsonSnapshotSource::new("schema.json");
//! let mut sink = DirectorySink::new("dbschema/edgeql");
//!
//! let summary = Pipeline::new(GeneratorConfig::default())
//!     .run(&source, &mut sink)
//!     .await?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Runtime vocabulary and name helpers
//! - [`schema`] - Type records, snapshot parsing, type graph and ordering
//! - [`codegen`] - TypeScript generation and output units

pub mod pipeline;
pub mod prelude;

/// Runtime vocabulary and name helpers.
pub mod core {
    pub use shapegen_core::*;
}

/// Type records, snapshot parsing, type graph and ordering.
pub mod schema {
    pub use shapegen_schema::*;
}

/// TypeScript generation and output units.
pub mod codegen {
    pub use shapegen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use pipeline::{Pipeline, RunSummary};
pub use shapegen_codegen::{
    CodegenError, DirectorySink, GeneratorBuilder, GeneratorConfig, MemorySink, OutputSink,
};
pub use shapegen_schema::{JsonSnapshotSource, SchemaSource, StaticSource};
