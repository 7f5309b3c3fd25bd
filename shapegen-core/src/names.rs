//! Qualified names and identifier helpers.

use crate::error::{NameError, Result};
use std::fmt;

/// Separator between a schema module and the local name.
pub const MODULE_SEPARATOR: &str = "::";

/// A schema name split into its module and local parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    /// Module path (may itself contain separators for nested modules).
    pub module: String,
    /// Local name inside the module.
    pub local: String,
}

impl QualifiedName {
    /// Splits `module::local` on its last separator.
    ///
    /// # Errors
    /// Returns `NameError::InvalidName` if either part is empty or the
    /// separator is missing.
    pub fn parse(name: &str) -> Result<Self> {
        match name.rsplit_once(MODULE_SEPARATOR) {
            Some((module, local)) if !module.is_empty() && !local.is_empty() => Ok(Self {
                module: module.to_string(),
                local: local.to_string(),
            }),
            _ => Err(NameError::InvalidName {
                name: name.to_string(),
            }),
        }
    }

    /// Returns the identifier used for the module in generated code.
    #[must_use]
    pub fn module_ident(&self) -> String {
        to_ident(&self.module)
    }

    /// Returns the identifier used for the local name in generated code.
    #[must_use]
    pub fn local_ident(&self) -> String {
        to_ident(&self.local)
    }

    /// Returns a module-unique identifier for the whole name (`default_User`).
    #[must_use]
    pub fn symbol_ident(&self) -> String {
        to_ident(&format!("{}{}{}", self.module, MODULE_SEPARATOR, self.local))
    }

    /// Returns true if the name belongs to `module` or one of its submodules.
    #[must_use]
    pub fn in_module(&self, module: &str) -> bool {
        self.module == module
            || self
                .module
                .strip_prefix(module)
                .is_some_and(|rest| rest.starts_with(MODULE_SEPARATOR))
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.module, MODULE_SEPARATOR, self.local)
    }
}

/// Converts an arbitrary string into an identifier.
///
/// Every run of characters outside `[A-Za-z0-9_]` becomes a single `_`.
/// A leading digit is prefixed with `_`.
#[must_use]
pub fn to_ident(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 1);
    let mut in_run = false;

    for c in s.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            result.push(c);
            in_run = false;
        } else if !in_run {
            result.push('_');
            in_run = true;
        }
    }

    if result.is_empty() || result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}

/// Quotes a string as a double-quoted literal with JSON escaping.
#[must_use]
pub fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qualified_name() {
        let name = QualifiedName::parse("default::User").expect("valid name");
        assert_eq!(name.module, "default");
        assert_eq!(name.local, "User");
        assert_eq!(name.to_string(), "default::User");
        assert_eq!(name.symbol_ident(), "default_User");
    }

    #[test]
    fn test_parse_nested_module() {
        let name = QualifiedName::parse("app::billing::Invoice").expect("valid name");
        assert_eq!(name.module, "app::billing");
        assert_eq!(name.local, "Invoice");
        assert_eq!(name.module_ident(), "app_billing");
        assert!(name.in_module("app"));
        assert!(name.in_module("app::billing"));
        assert!(!name.in_module("ap"));
    }

    #[test]
    fn test_parse_invalid_name() {
        assert!(QualifiedName::parse("User").is_err());
        assert!(QualifiedName::parse("::User").is_err());
        assert!(QualifiedName::parse("default::").is_err());
    }

    #[test]
    fn test_to_ident() {
        assert_eq!(to_ident("red"), "red");
        assert_eq!(to_ident("dark blue"), "dark_blue");
        assert_eq!(to_ident("a--b  c"), "a_b_c");
        assert_eq!(to_ident("9lives"), "_9lives");
        assert_eq!(to_ident(""), "_");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("red"), "\"red\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
    }
}
