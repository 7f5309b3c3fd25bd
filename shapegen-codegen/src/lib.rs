//! # shapegen Codegen
//!
//! TypeScript generation from an introspected type graph.
//!
//! This crate provides:
//! - An indentation-aware text emitter and an output tree of units
//! - The pairwise cast-compatibility matrix
//! - Enum mirrors, composite pointer descriptors and shape builders
//! - Module index and cast-map generation

pub mod cast_matrix;
pub mod config;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod output;
pub mod scope;
pub mod ts;

pub use cast_matrix::{
    CastAmbiguity, CastDecision, CastMatrix, CastMatrixBuilder, CastOutcome, CastRule,
};
pub use config::{GeneratorBuilder, GeneratorConfig};
pub use emitter::TextEmitter;
pub use error::CodegenError;
pub use generator::{Generation, GenerationSummary, Generator};
pub use output::{DirectorySink, MemorySink, OutputSink, OutputTree, OutputUnit};
pub use scope::GenerationScope;

use shapegen_schema::{CastMap, SchemaSnapshot, TopologicalOrderer, TypeGraph};

/// Generates TypeScript units from a schema snapshot.
///
/// # Arguments
/// * `snapshot` - Type and cast records
/// * `config` - Generator settings
///
/// # Returns
/// The generated, unpersisted output tree and its summary.
///
/// # Errors
/// Returns `CodegenError` if validation, ordering or generation fails.
pub fn generate_from_snapshot(
    snapshot: SchemaSnapshot,
    config: &GeneratorConfig,
) -> Result<Generation, CodegenError> {
    let casts = CastMap::from_implicit_casts(&snapshot.casts);
    let graph = TypeGraph::build(snapshot.types)?;
    tracing::info!("Validated {} types", graph.len());
    let order = TopologicalOrderer::new(&graph).order()?;
    tracing::info!("Ordered {} scalar and object types", order.len());
    Generator::new(&graph, &order, config)
        .with_casts(casts)
        .generate()
}

/// Generates TypeScript units from a snapshot JSON document.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation, ordering or generation fails.
pub fn generate_from_json(json: &str, config: &GeneratorConfig) -> Result<Generation, CodegenError> {
    let snapshot = shapegen_schema::parse_snapshot(json)?;
    generate_from_snapshot(snapshot, config)
}

/// Generates TypeScript units from a snapshot JSON file.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    config: &GeneratorConfig,
) -> Result<Generation, CodegenError> {
    let json = std::fs::read_to_string(path)?;
    generate_from_json(&json, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "types": [
            {"id": "i16", "name": "std::int16", "kind": "scalar"},
            {"id": "i32", "name": "std::int32", "kind": "scalar"},
            {"id": "obj", "name": "std::Object", "kind": "object"}
        ],
        "casts": [
            {"source": {"id": "i16"}, "target": {"id": "i32"}, "allow_implicit": true}
        ]
    }"#;

    #[test]
    fn test_generate_from_json() {
        let generation =
            generate_from_json(SNAPSHOT, &GeneratorConfig::default()).expect("generate");
        let typeutil = generation
            .tree
            .render(ts::TYPEUTIL_UNIT)
            .expect("typeutil");
        assert!(typeutil.contains("    B extends \"std::int16\" ? A :\n"));
    }

    #[test]
    fn test_generate_from_json_malformed() {
        let err = generate_from_json("{", &GeneratorConfig::default()).expect_err("should fail");
        assert!(matches!(err, CodegenError::Parse(_)));
    }

    #[test]
    fn test_generate_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "{}", SNAPSHOT).expect("write");

        let generation =
            generate_from_file(file.path(), &GeneratorConfig::default()).expect("generate");
        assert_eq!(generation.summary.objects, 1);
    }

    #[test]
    fn test_generate_from_missing_file() {
        let err = generate_from_file(
            std::path::Path::new("/nonexistent/shapegen.json"),
            &GeneratorConfig::default(),
        )
        .expect_err("should fail");
        assert!(matches!(err, CodegenError::Io(_)));
    }
}
