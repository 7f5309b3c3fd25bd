//! Main code generator orchestrating the TypeScript emitters.

use crate::cast_matrix::CastAmbiguity;
use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::output::OutputTree;
use crate::scope::GenerationScope;
use crate::ts::{CastMapEmitter, EnumEmitter, IndexEmitter, ObjectEmitter};
use shapegen_schema::{CastMap, TypeGraph, TypeOrder};

/// Counts reported by one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Number of output units.
    pub units: usize,
    /// Number of mirrored enums.
    pub enums: usize,
    /// Number of composite object definitions.
    pub objects: usize,
    /// Cast pairs without a most specific shared target.
    pub ambiguities: Vec<CastAmbiguity>,
}

/// Output of [`Generator::generate`].
#[derive(Debug)]
pub struct Generation {
    /// The generated units, not yet persisted.
    pub tree: OutputTree,
    /// What was generated.
    pub summary: GenerationSummary,
}

/// Code generator for a validated, ordered type graph.
pub struct Generator<'a> {
    graph: &'a TypeGraph,
    order: &'a TypeOrder,
    config: &'a GeneratorConfig,
    casts: CastMap,
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(graph: &'a TypeGraph, order: &'a TypeOrder, config: &'a GeneratorConfig) -> Self {
        Self {
            graph,
            order,
            config,
            casts: CastMap::new(),
        }
    }

    /// Sets the implicit cast edges between scalars.
    #[must_use]
    pub fn with_casts(mut self, casts: CastMap) -> Self {
        self.casts = casts;
        self
    }

    /// Generates every unit into a fresh tree.
    ///
    /// Nothing is persisted; a failure discards the partial tree.
    ///
    /// # Errors
    /// Returns `CodegenError` if the root object type is missing or a
    /// pointer target cannot be represented.
    pub fn generate(&self) -> Result<Generation, CodegenError> {
        let scope = GenerationScope::new(self.graph, self.order, self.config)?;
        let mut tree = OutputTree::new();

        let mut modules = EnumEmitter::new(&scope).emit(&mut tree)?;
        let enum_modules = modules.clone();
        let objects = ObjectEmitter::new(&scope).emit(&mut tree, &enum_modules)?;
        modules.extend(objects.modules.iter().cloned());

        IndexEmitter::new(&modules).emit(&mut tree);
        let ambiguities = CastMapEmitter::new(&scope, &self.casts).emit(&mut tree);

        let summary = GenerationSummary {
            units: tree.len(),
            enums: scope.enum_types().len(),
            objects: objects.symbols.len(),
            ambiguities,
        };
        tracing::info!(
            "Generated {} units ({} enums, {} objects, {} modules)",
            summary.units,
            summary.enums,
            summary.objects,
            modules.len()
        );

        Ok(Generation { tree, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ts::{BASE_UNIT, INDEX_UNIT, TYPEUTIL_UNIT};
    use shapegen_core::Cardinality;
    use shapegen_schema::{
        ObjectType, PointerRecord, ScalarType, SchemaError, TopologicalOrderer, TypeId,
        TypeRecord,
    };

    fn object(id: &str, name: &str, bases: &[&str], pointers: Vec<PointerRecord>) -> TypeRecord {
        TypeRecord::object(
            id,
            name,
            ObjectType {
                bases: bases.iter().map(|b| TypeId::new(*b)).collect(),
                pointers,
                ..ObjectType::default()
            },
        )
    }

    fn fixture() -> Vec<TypeRecord> {
        vec![
            TypeRecord::scalar("i64", "std::int64", ScalarType::default()),
            TypeRecord::scalar(
                "color",
                "default::Color",
                ScalarType {
                    enum_values: vec!["red".into(), "green".into()],
                    ..ScalarType::default()
                },
            ),
            object("obj", "std::Object", &[], vec![]),
            object("named", "default::Named", &["obj"], vec![]),
            object(
                "user",
                "default::User",
                &["named"],
                vec![
                    PointerRecord::property("age", Cardinality::AtMostOne, "i64"),
                    PointerRecord::property("color", Cardinality::One, "color"),
                ],
            ),
            object("cfg", "cfg::Config", &["obj"], vec![]),
        ]
    }

    fn generate(records: Vec<TypeRecord>, config: &GeneratorConfig) -> Result<Generation, CodegenError> {
        let graph = TypeGraph::build(records).expect("valid graph");
        let order = TopologicalOrderer::new(&graph).order().expect("order");
        Generator::new(&graph, &order, config).generate()
    }

    #[test]
    fn test_generate_layout() {
        let generation = generate(fixture(), &GeneratorConfig::default()).expect("generate");
        let paths: Vec<&str> = generation.tree.paths().collect();

        assert_eq!(
            paths,
            vec![
                "modules/default.ts",
                BASE_UNIT,
                "modules/std.ts",
                INDEX_UNIT,
                TYPEUTIL_UNIT
            ]
        );
        assert_eq!(generation.summary.units, 5);
        assert_eq!(generation.summary.enums, 1);
        assert_eq!(generation.summary.objects, 3);
    }

    #[test]
    fn test_enum_property_uses_enum_import() {
        let generation = generate(fixture(), &GeneratorConfig::default()).expect("generate");
        let base = generation.tree.render(BASE_UNIT).expect("base");

        assert!(base.contains("import type * as defaultTypes from \"./modules/default\";\n"));
        assert!(base.contains("model.Property<defaultTypes.Color, model.Cardinality.One>"));
    }

    #[test]
    fn test_index_lists_enum_modules_first() {
        let generation = generate(fixture(), &GeneratorConfig::default()).expect("generate");
        let index = generation.tree.render(INDEX_UNIT).expect("index");

        let default = index.find("default: _default").expect("default");
        let std = index.find("std: _std").expect("std");
        assert!(default < std);
    }

    #[test]
    fn test_excluded_everywhere() {
        let generation = generate(fixture(), &GeneratorConfig::default()).expect("generate");
        assert!(!generation.tree.render_debug().contains("cfg"));
    }

    #[test]
    fn test_missing_root_aborts() {
        let config = GeneratorConfig::builder().root_object("std::Nope").build();
        let err = generate(fixture(), &config).expect_err("should fail");
        assert!(matches!(
            err,
            CodegenError::Schema(SchemaError::TypeNotFound { .. })
        ));
    }

    #[test]
    fn test_unsupported_target_aborts() {
        let mut records = fixture();
        records.push(TypeRecord::object(
            "and",
            "default::Named & default::User",
            ObjectType {
                intersection_of: vec![TypeId::new("named"), TypeId::new("or")],
                ..ObjectType::default()
            },
        ));
        records.push(TypeRecord::object(
            "or",
            "default::Named | default::User",
            ObjectType {
                union_of: vec![TypeId::new("named"), TypeId::new("user")],
                ..ObjectType::default()
            },
        ));
        records.push(object(
            "post",
            "default::Post",
            &["obj"],
            vec![PointerRecord::link("author", Cardinality::One, "and")],
        ));

        let err = generate(records, &GeneratorConfig::default()).expect_err("should fail");
        assert!(matches!(err, CodegenError::ShapeUnsupported { .. }));
    }
}
