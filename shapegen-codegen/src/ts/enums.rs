//! Enum mirror generation.

use super::module_unit;
use crate::error::CodegenError;
use crate::output::OutputTree;
use crate::scope::GenerationScope;
use indexmap::IndexSet;
use shapegen_core::{QualifiedName, quote, to_ident};

/// Writes one `export enum` per kept enum scalar into its module unit.
pub struct EnumEmitter<'a> {
    scope: &'a GenerationScope<'a>,
}

impl<'a> EnumEmitter<'a> {
    /// Creates a new enum emitter.
    #[must_use]
    pub fn new(scope: &'a GenerationScope<'a>) -> Self {
        Self { scope }
    }

    /// Emits every kept enum.
    ///
    /// # Returns
    /// The modules that received at least one enum, in first-seen order.
    ///
    /// # Errors
    /// Returns `CodegenError::Schema` for an unqualified enum name.
    pub fn emit(&self, tree: &mut OutputTree) -> Result<IndexSet<String>, CodegenError> {
        let mut modules = IndexSet::new();

        for record in self.scope.enum_types() {
            let Some(scalar) = record.as_scalar() else {
                continue;
            };
            let name = QualifiedName::parse(&record.name)?;
            let body = &mut tree.unit(&module_unit(&name.module)).body;

            body.write_line(format!("export enum {} {{", name.local_ident()));
            body.scoped_indent(|body| {
                for (member, value) in member_names(&scalar.enum_values)
                    .iter()
                    .zip(&scalar.enum_values)
                {
                    body.write_line(format!("{} = {},", member, quote(value)));
                }
            });
            body.write_line("}");
            body.newline();

            tracing::debug!(
                "Emitted enum {} ({} values)",
                record.name,
                scalar.enum_values.len()
            );
            modules.insert(name.module);
        }

        Ok(modules)
    }
}

/// Sanitizes enum values into unique member identifiers.
///
/// A value whose identifier is already taken gets `_2`, `_3`, ... appended.
#[must_use]
pub fn member_names(values: &[String]) -> Vec<String> {
    let mut taken: IndexSet<String> = IndexSet::with_capacity(values.len());
    let mut names = Vec::with_capacity(values.len());

    for value in values {
        let ident = to_ident(value);
        let mut candidate = ident.clone();
        let mut suffix = 2;
        while taken.contains(&candidate) {
            candidate = format!("{}_{}", ident, suffix);
            suffix += 1;
        }
        taken.insert(candidate.clone());
        names.push(candidate);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use shapegen_schema::{ScalarType, TopologicalOrderer, TypeGraph, TypeRecord};

    fn enum_record(id: &str, name: &str, values: &[&str]) -> TypeRecord {
        TypeRecord::scalar(
            id,
            name,
            ScalarType {
                enum_values: values.iter().map(|v| (*v).to_string()).collect(),
                ..ScalarType::default()
            },
        )
    }

    fn emit(records: Vec<TypeRecord>) -> (OutputTree, IndexSet<String>) {
        let graph = TypeGraph::build(records).expect("valid graph");
        let order = TopologicalOrderer::new(&graph).order().expect("order");
        let config = GeneratorConfig::builder().without_root_object().build();
        let scope = GenerationScope::new(&graph, &order, &config).expect("scope");

        let mut tree = OutputTree::new();
        let modules = EnumEmitter::new(&scope).emit(&mut tree).expect("emit");
        (tree, modules)
    }

    #[test]
    fn test_enum_members() {
        let (tree, modules) = emit(vec![enum_record(
            "c",
            "module::Color",
            &["red", "green", "blue"],
        )]);

        assert_eq!(modules.len(), 1);
        let text = tree.render("modules/module.ts").expect("unit");
        assert!(text.contains(
            "export enum Color {\n  red = \"red\",\n  green = \"green\",\n  blue = \"blue\",\n}\n"
        ));
    }

    #[test]
    fn test_enums_grouped_by_module() {
        let (tree, modules) = emit(vec![
            enum_record("a", "default::A", &["x"]),
            enum_record("b", "app::billing::B", &["y"]),
            enum_record("c", "default::C", &["z"]),
        ]);

        let order: Vec<&str> = modules.iter().map(String::as_str).collect();
        assert_eq!(order, vec!["default", "app::billing"]);
        let default = tree.render("modules/default.ts").expect("default");
        assert!(default.contains("export enum A"));
        assert!(default.contains("export enum C"));
        assert!(tree.contains("modules/app/billing.ts"));
    }

    #[test]
    fn test_excluded_enum_module() {
        let (tree, modules) = emit(vec![enum_record("l", "sys::Level", &["low"])]);
        assert!(modules.is_empty());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_member_names_sanitized_and_unique() {
        let values: Vec<String> = ["dark blue", "dark-blue", "9", "ok"]
            .iter()
            .map(|v| (*v).to_string())
            .collect();
        assert_eq!(
            member_names(&values),
            vec!["dark_blue", "dark_blue_2", "_9", "ok"]
        );
    }
}
