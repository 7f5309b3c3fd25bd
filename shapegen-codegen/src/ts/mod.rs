//! TypeScript emission.

pub mod casts;
pub mod descriptors;
pub mod enums;
pub mod index;
pub mod objects;

pub use casts::CastMapEmitter;
pub use descriptors::{DescriptorResolver, PointerDescriptor, TargetRepr};
pub use enums::EnumEmitter;
pub use index::IndexEmitter;
pub use objects::ObjectEmitter;

use shapegen_core::MODULE_SEPARATOR;

/// Path of the composite-definition unit.
pub const BASE_UNIT: &str = "__base__.ts";

/// Path of the module index unit.
pub const INDEX_UNIT: &str = "index.ts";

/// Path of the cast-map unit.
pub const TYPEUTIL_UNIT: &str = "modules/__typeutil__.ts";

/// Flag set on a module unit once its imports are written.
pub(crate) const BASE_IMPORT_FLAG: &str = "base-import";

/// Returns the import specifier of a module unit, relative to the output root.
#[must_use]
pub fn module_specifier(module: &str) -> String {
    format!("modules/{}", module.replace(MODULE_SEPARATOR, "/"))
}

/// Returns the unit path of a module.
#[must_use]
pub fn module_unit(module: &str) -> String {
    format!("{}.ts", module_specifier(module))
}

/// Returns the relative path from a module unit back to the output root.
#[must_use]
pub fn root_prefix(module: &str) -> String {
    "../".repeat(module.split(MODULE_SEPARATOR).count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_paths() {
        assert_eq!(module_unit("default"), "modules/default.ts");
        assert_eq!(module_unit("app::billing"), "modules/app/billing.ts");
        assert_eq!(module_specifier("app::billing"), "modules/app/billing");
        assert_eq!(root_prefix("default"), "../");
        assert_eq!(root_prefix("app::billing"), "../../");
    }
}
