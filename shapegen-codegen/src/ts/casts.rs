//! Implicit-cast compatibility maps.

use super::TYPEUTIL_UNIT;
use crate::cast_matrix::{CastAmbiguity, CastMatrix, CastMatrixBuilder, CastOutcome, CastRule};
use crate::emitter::TextEmitter;
use crate::output::OutputTree;
use crate::scope::GenerationScope;
use shapegen_core::quote;
use shapegen_schema::CastMap;

/// Name of the scalar cast map type.
pub const SCALAR_MAP: &str = "getSharedParentScalar";

/// Name of the object cast map type.
pub const OBJECT_MAP: &str = "getSharedParentObject";

/// Writes both cast maps into `modules/__typeutil__.ts`.
pub struct CastMapEmitter<'a> {
    scope: &'a GenerationScope<'a>,
    implicit_casts: &'a CastMap,
}

impl<'a> CastMapEmitter<'a> {
    /// Creates a new cast map emitter.
    #[must_use]
    pub fn new(scope: &'a GenerationScope<'a>, implicit_casts: &'a CastMap) -> Self {
        Self {
            scope,
            implicit_casts,
        }
    }

    /// Builds the scalar matrix over material scalars.
    #[must_use]
    pub fn scalar_matrix(&self) -> CastMatrix {
        CastMatrixBuilder::new(CastOutcome::Never)
            .candidates(
                self.scope
                    .material_scalars()
                    .into_iter()
                    .map(|r| (r.id.clone(), r.name.clone())),
            )
            .edges(self.implicit_casts)
            .build()
    }

    /// Builds the object matrix over user object types, castable along ancestry.
    #[must_use]
    pub fn object_matrix(&self) -> CastMatrix {
        let types = self.scope.user_object_types();
        let edges = CastMap::from_ancestors(self.scope.graph(), types.iter().map(|r| &r.id));
        let fallback = match self.scope.root() {
            Some(root) => CastOutcome::of(root.name.clone()),
            None => CastOutcome::Never,
        };

        CastMatrixBuilder::new(fallback)
            .candidates(types.into_iter().map(|r| (r.id.clone(), r.name.clone())))
            .edges(&edges)
            .build()
    }

    /// Emits both maps.
    ///
    /// # Returns
    /// Every ambiguity found while building the matrices.
    pub fn emit(&self, tree: &mut OutputTree) -> Vec<CastAmbiguity> {
        let scalars = self.scalar_matrix();
        let objects = self.object_matrix();

        let body = &mut tree.unit(TYPEUTIL_UNIT).body;
        write_map(body, SCALAR_MAP, &scalars);
        body.newline();
        write_map(body, OBJECT_MAP, &objects);

        tracing::debug!(
            "Emitted cast maps ({} scalars, {} object types)",
            scalars.len(),
            objects.len()
        );

        let mut ambiguities = scalars.ambiguities().to_vec();
        ambiguities.extend_from_slice(objects.ambiguities());
        ambiguities
    }
}

fn outcome_expr(outcome: &CastOutcome) -> String {
    match outcome {
        CastOutcome::Type(name) => quote(name),
        CastOutcome::Never => "never".to_string(),
    }
}

/// Writes one matrix as nested conditional types keyed on name literals.
///
/// Pairs decided by the fallback are left to the default branch. A matrix
/// with a named base case constrains both parameters to its keys, written
/// as a `<map_name>Key` union.
pub fn write_map(out: &mut TextEmitter, map_name: &str, matrix: &CastMatrix) {
    let fallback = outcome_expr(matrix.fallback());

    let rooted = matches!(matrix.fallback(), CastOutcome::Type(_)) && !matrix.is_empty();
    if rooted {
        let key = format!("{}Key", map_name);
        out.write_line(format!("export type {} =", key));
        out.scoped_indent(|out| {
            let mut names = matrix.types().iter().peekable();
            while let Some(name) = names.next() {
                let end = if names.peek().is_some() { "" } else { ";" };
                out.write_line(format!("| {}{}", quote(name), end));
            }
        });
        out.newline();
        out.write_line(format!(
            "export type {}<A extends {}, B extends {}> =",
            map_name, key, key
        ));
    } else {
        out.write_line(format!("export type {}<A, B> =", map_name));
    }
    out.scoped_indent(|out| {
        for outer in matrix.types() {
            out.write_line(format!("A extends {} ?", quote(outer)));
            out.scoped_indent(|out| {
                for (inner, decision) in matrix.row(outer) {
                    let result = match decision.rule {
                        CastRule::SameType | CastRule::SourceToTarget => "B".to_string(),
                        CastRule::TargetToSource => "A".to_string(),
                        CastRule::SharedTarget => outcome_expr(&decision.outcome),
                        CastRule::Fallback => continue,
                    };
                    out.write_line(format!("B extends {} ? {} :", quote(inner), result));
                }
                out.write_line(format!("{} :", fallback));
            });
        }
        out.write_line(format!("{};", fallback));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use shapegen_schema::{
        CastRecord, ObjectType, ScalarType, TopologicalOrderer, TypeGraph, TypeId, TypeRecord,
    };

    fn object(id: &str, name: &str, bases: &[&str]) -> TypeRecord {
        TypeRecord::object(
            id,
            name,
            ObjectType {
                bases: bases.iter().map(|b| TypeId::new(*b)).collect(),
                ..ObjectType::default()
            },
        )
    }

    fn fixture() -> Vec<TypeRecord> {
        vec![
            TypeRecord::scalar("i16", "std::int16", ScalarType::default()),
            TypeRecord::scalar("i32", "std::int32", ScalarType::default()),
            TypeRecord::scalar("i64", "std::int64", ScalarType::default()),
            TypeRecord::scalar("str", "std::str", ScalarType::default()),
            TypeRecord::scalar(
                "anyint",
                "std::anyint",
                ScalarType {
                    is_abstract: true,
                    ..ScalarType::default()
                },
            ),
            object("obj", "std::Object", &[]),
            object("user", "default::User", &["obj"]),
            object("post", "default::Post", &["obj"]),
            object("cfg", "cfg::Config", &["obj"]),
        ]
    }

    fn emit() -> (OutputTree, Vec<CastAmbiguity>) {
        let graph = TypeGraph::build(fixture()).expect("valid graph");
        let order = TopologicalOrderer::new(&graph).order().expect("order");
        let config = GeneratorConfig::default();
        let scope = GenerationScope::new(&graph, &order, &config).expect("scope");
        let casts = CastMap::from_implicit_casts(&[
            CastRecord::implicit("i16", "i32"),
            CastRecord::implicit("i32", "i64"),
        ]);

        let mut tree = OutputTree::new();
        let ambiguities = CastMapEmitter::new(&scope, &casts).emit(&mut tree);
        (tree, ambiguities)
    }

    #[test]
    fn test_scalar_map() {
        let (tree, ambiguities) = emit();
        let text = tree.render(TYPEUTIL_UNIT).expect("typeutil");

        assert!(ambiguities.is_empty());
        assert!(text.contains("export type getSharedParentScalar<A, B> =\n"));
        assert!(text.contains(
            "  A extends \"std::int16\" ?\n    B extends \"std::int64\" ? B :\n    B extends \"std::int32\" ? B :\n    B extends \"std::int16\" ? B :\n    never :\n"
        ));
        assert!(text.contains("  A extends \"std::int64\" ?\n"));
        assert!(text.contains("    B extends \"std::int16\" ? A :\n"));
        assert!(!text.contains("std::anyint"));
        assert!(text.contains("  A extends \"std::str\" ?\n    B extends \"std::str\" ? B :\n    never :\n"));
    }

    #[test]
    fn test_object_map_fallback_omitted() {
        let (tree, _) = emit();
        let text = tree.render(TYPEUTIL_UNIT).expect("typeutil");

        assert!(text.contains(
            "export type getSharedParentObject<A extends getSharedParentObjectKey, B extends getSharedParentObjectKey> =\n"
        ));
        assert!(text.contains("export type getSharedParentObjectKey =\n"));
        assert!(text.contains("  | \"std::Object\";\n\n"));
        assert!(text.contains("  | \"default::User\"\n"));
        assert!(text.contains(
            "  A extends \"default::User\" ?\n    B extends \"default::User\" ? B :\n    B extends \"std::Object\" ? B :\n    \"std::Object\" :\n"
        ));
        assert!(!text.contains("B extends \"default::Post\" ? \"std::Object\""));
        assert!(!text.contains("cfg::Config"));
        assert!(text.ends_with("  \"std::Object\";\n"));
    }
}
