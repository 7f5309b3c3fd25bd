//! Generator configuration.

use shapegen_core::RuntimeTypeLibrary;

/// Universal object base every kept object type descends from.
pub const DEFAULT_ROOT_OBJECT: &str = "std::Object";

/// Modules whose object types and enums never reach the output.
pub const DEFAULT_EXCLUDED_MODULES: &[&str] = &["schema", "sys", "cfg", "seq", "stdgraphql"];

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Vocabulary of the runtime library generated code imports.
    pub runtime: RuntimeTypeLibrary,
    /// Root object type; `None` keeps every object outside excluded modules.
    pub root_object: Option<String>,
    /// Excluded module prefixes.
    pub excluded_modules: Vec<String>,
}

impl GeneratorConfig {
    /// Returns a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeTypeLibrary::default(),
            root_object: Some(DEFAULT_ROOT_OBJECT.to_string()),
            excluded_modules: DEFAULT_EXCLUDED_MODULES
                .iter()
                .map(|m| (*m).to_string())
                .collect(),
        }
    }
}

/// Builder for [`GeneratorConfig`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorBuilder {
    config: GeneratorConfig,
}

impl GeneratorBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the runtime library module specifier and namespace.
    #[must_use]
    pub fn runtime(mut self, module: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.config.runtime = RuntimeTypeLibrary::new(module, namespace);
        self
    }

    /// Sets the root object type.
    #[must_use]
    pub fn root_object(mut self, name: impl Into<String>) -> Self {
        self.config.root_object = Some(name.into());
        self
    }

    /// Keeps object types regardless of ancestry.
    #[must_use]
    pub fn without_root_object(mut self) -> Self {
        self.config.root_object = None;
        self
    }

    /// Adds an excluded module.
    #[must_use]
    pub fn exclude_module(mut self, module: impl Into<String>) -> Self {
        let module = module.into();
        if !self.config.excluded_modules.contains(&module) {
            self.config.excluded_modules.push(module);
        }
        self
    }

    /// Replaces the excluded module set.
    #[must_use]
    pub fn excluded_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.excluded_modules = modules.into_iter().map(Into::into).collect();
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.root_object.as_deref(), Some("std::Object"));
        assert_eq!(config.excluded_modules.len(), 5);
        assert_eq!(config.runtime.module(), "edgedb");
    }

    #[test]
    fn test_builder() {
        let config = GeneratorConfig::builder()
            .runtime("@acme/runtime", "rt")
            .exclude_module("audit")
            .exclude_module("audit")
            .without_root_object()
            .build();

        assert_eq!(config.runtime.namespace(), "rt");
        assert!(config.root_object.is_none());
        assert_eq!(
            config.excluded_modules.iter().filter(|m| *m == "audit").count(),
            1
        );
    }

    #[test]
    fn test_replace_excluded() {
        let config = GeneratorBuilder::new().excluded_modules(["sys"]).build();
        assert_eq!(config.excluded_modules, vec!["sys"]);
    }
}
