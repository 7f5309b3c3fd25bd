//! Which types of a graph reach the output, and in which order.

use crate::config::GeneratorConfig;
use shapegen_core::QualifiedName;
use shapegen_schema::{SchemaError, TypeGraph, TypeId, TypeOrder, TypeRecord};

/// A validated graph, its order and the exclusion filter for one run.
#[derive(Debug)]
pub struct GenerationScope<'a> {
    graph: &'a TypeGraph,
    order: &'a TypeOrder,
    config: &'a GeneratorConfig,
    root_id: Option<TypeId>,
}

impl<'a> GenerationScope<'a> {
    /// Creates a scope.
    ///
    /// # Errors
    /// Returns `SchemaError::TypeNotFound` if the configured root object type
    /// is not in the graph, and `SchemaError::UnexpectedKind` if it is not an
    /// object type.
    pub fn new(
        graph: &'a TypeGraph,
        order: &'a TypeOrder,
        config: &'a GeneratorConfig,
    ) -> Result<Self, SchemaError> {
        let root_id = match &config.root_object {
            Some(name) => {
                let root = graph
                    .get_by_name(name)
                    .ok_or_else(|| SchemaError::TypeNotFound { name: name.clone() })?;
                if root.as_object().is_none() {
                    return Err(SchemaError::UnexpectedKind {
                        name: name.clone(),
                        expected: "object",
                        actual: root.kind.label(),
                    });
                }
                Some(root.id.clone())
            }
            None => None,
        };

        Ok(Self {
            graph,
            order,
            config,
            root_id,
        })
    }

    /// Returns the type graph.
    #[must_use]
    pub fn graph(&self) -> &'a TypeGraph {
        self.graph
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &'a GeneratorConfig {
        self.config
    }

    /// Returns the root object type, if one is configured.
    #[must_use]
    pub fn root(&self) -> Option<&'a TypeRecord> {
        self.root_id.as_ref().and_then(|id| self.graph.get(id))
    }

    /// Returns true if `name` lives in an excluded module.
    #[must_use]
    pub fn is_excluded_name(&self, name: &str) -> bool {
        match QualifiedName::parse(name) {
            Ok(qualified) => self
                .config
                .excluded_modules
                .iter()
                .any(|module| qualified.in_module(module)),
            Err(_) => false,
        }
    }

    /// Returns true if an object type passes the exclusion filter.
    #[must_use]
    pub fn keeps_object(&self, record: &TypeRecord) -> bool {
        if record.as_object().is_none() || self.is_excluded_name(&record.name) {
            return false;
        }
        match &self.root_id {
            Some(root) => &record.id == root || self.graph.is_descendant_of(&record.id, root),
            None => true,
        }
    }

    /// Returns true if an object type gets its own shape definition.
    #[must_use]
    pub fn keeps_shape(&self, record: &TypeRecord) -> bool {
        record.as_object().is_some_and(|o| o.is_concrete()) && self.keeps_object(record)
    }

    /// Returns true if an enum scalar is mirrored.
    #[must_use]
    pub fn keeps_enum(&self, record: &TypeRecord) -> bool {
        record.as_scalar().is_some_and(|s| s.is_enum()) && !self.is_excluded_name(&record.name)
    }

    /// Kept enum scalars in dependency order.
    #[must_use]
    pub fn enum_types(&self) -> Vec<&'a TypeRecord> {
        self.order
            .records(self.graph)
            .filter(|r| self.keeps_enum(r))
            .collect()
    }

    /// Kept concrete object types in dependency order.
    #[must_use]
    pub fn object_types(&self) -> Vec<&'a TypeRecord> {
        self.order
            .records(self.graph)
            .filter(|r| self.keeps_shape(r))
            .collect()
    }

    /// Material scalars, dependents first.
    #[must_use]
    pub fn material_scalars(&self) -> Vec<&'a TypeRecord> {
        self.order
            .records_rev(self.graph)
            .filter(|r| r.as_scalar().is_some_and(|s| s.is_material()))
            .collect()
    }

    /// Kept concrete object types, dependents first.
    #[must_use]
    pub fn user_object_types(&self) -> Vec<&'a TypeRecord> {
        self.order
            .records_rev(self.graph)
            .filter(|r| self.keeps_shape(r))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapegen_schema::{ObjectType, ScalarType, TopologicalOrderer};

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

    fn fixture() -> TypeGraph {
        TypeGraph::build(vec![
            object("base", "std::BaseObject", &[]),
            object("obj", "std::Object", &["base"]),
            object("named", "default::Named", &["obj"]),
            object("user", "default::User", &["named"]),
            object("cfg", "cfg::Config", &["obj"]),
            object("free", "ext::Free", &["base"]),
            TypeRecord::scalar("int", "std::int64", ScalarType::default()),
            TypeRecord::scalar(
                "color",
                "default::Color",
                ScalarType {
                    enum_values: vec!["red".into()],
                    ..ScalarType::default()
                },
            ),
            TypeRecord::scalar(
                "level",
                "sys::Level",
                ScalarType {
                    enum_values: vec!["low".into()],
                    ..ScalarType::default()
                },
            ),
        ])
        .expect("valid graph")
    }

    fn names(records: &[&TypeRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_exclusion_filter() {
        let graph = fixture();
        let order = TopologicalOrderer::new(&graph).order().expect("order");
        let config = GeneratorConfig::default();
        let scope = GenerationScope::new(&graph, &order, &config).expect("scope");

        let kept = names(&scope.object_types());
        assert_eq!(kept, vec!["std::Object", "default::Named", "default::User"]);
        assert_eq!(names(&scope.enum_types()), vec!["default::Color"]);
        assert_eq!(
            names(&scope.user_object_types()),
            vec!["default::User", "default::Named", "std::Object"]
        );
        assert_eq!(names(&scope.material_scalars()), vec!["std::int64"]);
    }

    #[test]
    fn test_without_root_keeps_unrooted() {
        let graph = fixture();
        let order = TopologicalOrderer::new(&graph).order().expect("order");
        let config = GeneratorConfig::builder().without_root_object().build();
        let scope = GenerationScope::new(&graph, &order, &config).expect("scope");

        let kept = names(&scope.object_types());
        assert!(kept.contains(&"ext::Free".to_string()));
        assert!(kept.contains(&"std::BaseObject".to_string()));
        assert!(!kept.contains(&"cfg::Config".to_string()));
    }

    #[test]
    fn test_missing_root() {
        let graph = fixture();
        let order = TopologicalOrderer::new(&graph).order().expect("order");
        let config = GeneratorConfig::builder().root_object("std::Missing").build();

        let err = GenerationScope::new(&graph, &order, &config).expect_err("should fail");
        assert_eq!(
            err,
            SchemaError::TypeNotFound {
                name: "std::Missing".to_string()
            }
        );
    }

    #[test]
    fn test_root_must_be_object() {
        let graph = fixture();
        let order = TopologicalOrderer::new(&graph).order().expect("order");
        let config = GeneratorConfig::builder().root_object("std::int64").build();

        let err = GenerationScope::new(&graph, &order, &config).expect_err("should fail");
        assert!(matches!(err, SchemaError::UnexpectedKind { expected: "object", .. }));
    }
}
