//! Runtime library vocabulary.
//!
//! Generated code imports a single namespace from the runtime library and
//! references its markers and helpers by name. Nothing here defines those
//! symbols; it only spells references to them.

use crate::names::quote;
use crate::types::{Cardinality, PointerKind};

/// Default module specifier of the runtime library.
pub const DEFAULT_RUNTIME_MODULE: &str = "edgedb";

/// Default namespace the runtime library exports its model under.
pub const DEFAULT_RUNTIME_NAMESPACE: &str = "model";

/// Spells references into the runtime library used by generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeTypeLibrary {
    module: String,
    namespace: String,
}

impl RuntimeTypeLibrary {
    /// Creates a vocabulary for the given module specifier and namespace.
    #[must_use]
    pub fn new(module: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            namespace: namespace.into(),
        }
    }

    /// Returns the module specifier.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Returns the namespace identifier.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the import statement for the runtime namespace.
    #[must_use]
    pub fn import_statement(&self) -> String {
        format!("import {{{}}} from {};", self.namespace, quote(&self.module))
    }

    /// Returns a reference to a cardinality marker.
    #[must_use]
    pub fn cardinality(&self, cardinality: Cardinality) -> String {
        format!("{}.Cardinality.{}", self.namespace, cardinality.marker())
    }

    /// Returns a reference to a descriptor kind marker.
    #[must_use]
    pub fn kind(&self, kind: PointerKind) -> String {
        format!("{}.Kind.{}", self.namespace, kind.marker())
    }

    /// Returns the link descriptor type.
    #[must_use]
    pub fn link_type(&self, target: &str, cardinality: Cardinality) -> String {
        format!(
            "{}.Link<{}, {}>",
            self.namespace,
            target,
            self.cardinality(cardinality)
        )
    }

    /// Returns the property descriptor type.
    #[must_use]
    pub fn property_type(&self, repr: &str, cardinality: Cardinality) -> String {
        format!(
            "{}.Property<{}, {}>",
            self.namespace,
            repr,
            self.cardinality(cardinality)
        )
    }

    /// Returns the selection argument helper applied to a shape.
    #[must_use]
    pub fn make_select_args(&self, shape: &str) -> String {
        format!("{}.MakeSelectArgs<{}>", self.namespace, shape)
    }

    /// Returns the query type produced by selecting `spec` on `shape`.
    #[must_use]
    pub fn query_of(&self, spec: &str, shape: &str) -> String {
        format!(
            "{ns}.Query<{ns}.Result<{spec}, {shape}>>",
            ns = self.namespace
        )
    }

    /// Returns a call to the runtime's shape builder.
    #[must_use]
    pub fn shape_call(&self, base: &str, spec: &str) -> String {
        format!("{}.shape({}, {})", self.namespace, base, spec)
    }
}

impl Default for RuntimeTypeLibrary {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME_MODULE, DEFAULT_RUNTIME_NAMESPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_import() {
        let lib = RuntimeTypeLibrary::default();
        assert_eq!(lib.import_statement(), "import {model} from \"edgedb\";");
    }

    #[test]
    fn test_markers() {
        let lib = RuntimeTypeLibrary::default();
        assert_eq!(
            lib.cardinality(Cardinality::AtMostOne),
            "model.Cardinality.AtMostOne"
        );
        assert_eq!(lib.kind(PointerKind::Link), "model.Kind.link");
        assert_eq!(
            lib.property_type("number", Cardinality::One),
            "model.Property<number, model.Cardinality.One>"
        );
    }

    #[test]
    fn test_custom_namespace() {
        let lib = RuntimeTypeLibrary::new("@acme/runtime", "rt");
        assert_eq!(lib.import_statement(), "import {rt} from \"@acme/runtime\";");
        assert_eq!(
            lib.query_of("Spec", "typeof base.x"),
            "rt.Query<rt.Result<Spec, typeof base.x>>"
        );
        assert_eq!(lib.shape_call("base.x", "spec"), "rt.shape(base.x, spec)");
    }
}
