//! Module index generation.

use super::{INDEX_UNIT, module_specifier};
use crate::output::OutputTree;
use indexmap::IndexSet;
use shapegen_core::to_ident;

/// Writes `index.ts`, re-exporting every generated module unit.
pub struct IndexEmitter<'a> {
    modules: &'a IndexSet<String>,
}

impl<'a> IndexEmitter<'a> {
    /// Creates an index over the given modules.
    #[must_use]
    pub fn new(modules: &'a IndexSet<String>) -> Self {
        Self { modules }
    }

    /// Emits the index unit.
    pub fn emit(&self, tree: &mut OutputTree) {
        let unit = tree.unit(INDEX_UNIT);

        for module in self.modules {
            unit.head.write_line(format!(
                "import * as _{} from \"./{}\";",
                to_ident(module),
                module_specifier(module)
            ));
        }

        unit.body.write_line("const modules = {");
        unit.body.scoped_indent(|body| {
            for module in self.modules {
                let ident = to_ident(module);
                body.write_line(format!("{}: _{},", ident, ident));
            }
        });
        unit.body.write_line("} as const;");
        unit.body.write_line("export default modules;");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index() {
        let modules: IndexSet<String> = ["default", "app::billing"]
            .iter()
            .map(|m| (*m).to_string())
            .collect();
        let mut tree = OutputTree::new();
        IndexEmitter::new(&modules).emit(&mut tree);

        let text = tree.render(INDEX_UNIT).expect("index");
        assert_eq!(
            text,
            "import * as _default from \"./modules/default\";\n\
             import * as _app_billing from \"./modules/app/billing\";\n\
             \n\
             const modules = {\n  \
             default: _default,\n  \
             app_billing: _app_billing,\n\
             } as const;\n\
             export default modules;\n"
        );
    }
}
