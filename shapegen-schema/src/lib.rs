//! # shapegen Schema
//!
//! In-memory model of an introspected database type catalogue.
//!
//! This crate provides:
//! - Type and pointer records as reported by the schema source
//! - Parsing of introspection snapshots
//! - A validated, insertion-ordered type graph
//! - Dependency-first ordering with cycle detection
//! - The implicit cast catalogue
//! - The `SchemaSource` collaborator interface

pub mod casts;
pub mod error;
pub mod graph;
pub mod order;
pub mod parser;
pub mod source;
pub mod types;
pub mod validation;

pub use casts::CastMap;
pub use error::{ParseError, SchemaError, SourceError};
pub use graph::TypeGraph;
pub use order::{TopologicalOrderer, TypeOrder};
pub use parser::{parse_snapshot, parse_types};
pub use source::{JsonSnapshotSource, SchemaSource, StaticSource};
pub use types::{
    ArrayType, CastRecord, LinkProperty, ObjectType, PointerRecord, ScalarType, SchemaSnapshot,
    TupleElement, TupleType, TypeId, TypeKind, TypeRecord,
};
