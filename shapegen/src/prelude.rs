//! Prelude module for convenient imports.
//!
//! ```ignore
//! use shapegen::prelude::*;
//! ```

// Core types
pub use shapegen_core::{Cardinality, PointerKind, QualifiedName, RuntimeTypeLibrary};

// Schema types
pub use shapegen_schema::{
    CastMap, CastRecord, JsonSnapshotSource, ObjectType, PointerRecord, ScalarType, SchemaError,
    SchemaSnapshot, SchemaSource, SourceError, StaticSource, TopologicalOrderer, TypeGraph,
    TypeId, TypeRecord,
};

// Codegen types
pub use shapegen_codegen::{
    CastMatrixBuilder, CastOutcome, CodegenError, DirectorySink, Generation, Generator,
    GeneratorBuilder, GeneratorConfig, MemorySink, OutputSink, OutputTree,
};

// Pipeline
pub use crate::pipeline::{Pipeline, RunSummary};
