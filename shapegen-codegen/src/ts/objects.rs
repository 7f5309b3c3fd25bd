//! Composite definitions and per-module shape builders.
//!
//! Every kept object type gets one composite in `__base__.ts`: spreads of
//! its kept bases interleaved, in base order, with accessors inherited from
//! elided bases, then one getter per own pointer. Its module unit re-exports the composite with a `shape`
//! builder delegating to the runtime library.

use super::descriptors::{DescriptorResolver, PointerDescriptor};
use super::{BASE_IMPORT_FLAG, BASE_UNIT, module_specifier, module_unit, root_prefix};
use crate::emitter::TextEmitter;
use crate::error::CodegenError;
use crate::output::OutputTree;
use crate::scope::GenerationScope;
use indexmap::IndexSet;
use shapegen_core::{QualifiedName, RuntimeTypeLibrary};
use shapegen_schema::{TypeId, TypeRecord};
use std::collections::HashSet;

/// Symbols and modules produced by [`ObjectEmitter::emit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectSummary {
    /// Composite symbols in emission order.
    pub symbols: Vec<String>,
    /// Modules that received an object export, in first-seen order.
    pub modules: IndexSet<String>,
}

/// Inherited member of a composite.
#[derive(Debug)]
enum Member {
    Spread(String),
    Getter(PointerDescriptor),
}

/// Resolved members of one composite.
///
/// `inherited` is in base order, so a later member overrides an earlier one
/// of the same name when the object literal is evaluated.
#[derive(Debug, Default)]
struct Composite {
    inherited: Vec<Member>,
    own: Vec<PointerDescriptor>,
}

impl Composite {
    fn spread(&mut self, symbol: String) {
        self.inherited
            .retain(|m| !matches!(m, Member::Spread(s) if *s == symbol));
        self.inherited.push(Member::Spread(symbol));
    }

    fn getter(&mut self, descriptor: PointerDescriptor) {
        self.forget(&descriptor.name);
        self.inherited.push(Member::Getter(descriptor));
    }

    fn forget(&mut self, name: &str) {
        self.inherited
            .retain(|m| !matches!(m, Member::Getter(d) if d.name == name));
    }
}

/// Generator for `__base__.ts` and the object exports of module units.
pub struct ObjectEmitter<'a> {
    scope: &'a GenerationScope<'a>,
    resolver: DescriptorResolver<'a>,
}

impl<'a> ObjectEmitter<'a> {
    /// Creates a new object emitter.
    #[must_use]
    pub fn new(scope: &'a GenerationScope<'a>) -> Self {
        Self {
            scope,
            resolver: DescriptorResolver::new(scope),
        }
    }

    /// Emits the composite unit and every object export.
    ///
    /// # Arguments
    /// * `tree` - Output tree receiving the units
    /// * `enum_modules` - Modules whose enums property types refer to
    ///
    /// # Errors
    /// Returns the first descriptor resolution failure.
    pub fn emit(
        &self,
        tree: &mut OutputTree,
        enum_modules: &IndexSet<String>,
    ) -> Result<ObjectSummary, CodegenError> {
        let runtime = &self.scope.config().runtime;
        let mut summary = ObjectSummary::default();

        {
            let head = &mut tree.unit(BASE_UNIT).head;
            head.write_line(runtime.import_statement());
            head.newline();
            for module in enum_modules {
                head.write_line(format!(
                    "import type * as {}Types from \"./{}\";",
                    shapegen_core::to_ident(module),
                    module_specifier(module)
                ));
            }
        }

        let mut body = TextEmitter::new();
        body.write_line("const base = (function() {");
        body.scoped_indent(|body| -> Result<(), CodegenError> {
            for record in self.scope.object_types() {
                let name = QualifiedName::parse(&record.name)?;
                let symbol = name.symbol_ident();
                let composite = self.composite(record)?;

                write_composite(body, &symbol, &composite, runtime);
                write_module_export(tree, &name, &symbol, runtime);

                tracing::debug!(
                    "Emitted object {} ({} pointers)",
                    record.name,
                    composite.inherited.len() + composite.own.len()
                );
                summary.symbols.push(symbol);
                summary.modules.insert(name.module);
            }

            body.write_line("return {");
            body.scoped_indent(|body| {
                for symbol in &summary.symbols {
                    body.write_line(format!("{},", symbol));
                }
            });
            body.write_line("};");
            Ok(())
        })?;
        body.write_line("})();");
        body.newline();
        body.write_line("export default base;");

        tree.unit(BASE_UNIT).body = body;
        Ok(summary)
    }

    fn composite(&self, record: &'a TypeRecord) -> Result<Composite, CodegenError> {
        let mut composite = Composite::default();
        let mut seen = HashSet::new();
        self.collect_inherited(record, &mut composite, &mut seen)?;

        if let Some(object) = record.as_object() {
            for pointer in &object.pointers {
                composite.forget(&pointer.name);
                composite.own.push(self.resolver.pointer(record, pointer)?);
            }
        }
        Ok(composite)
    }

    fn collect_inherited(
        &self,
        record: &'a TypeRecord,
        composite: &mut Composite,
        seen: &mut HashSet<TypeId>,
    ) -> Result<(), CodegenError> {
        for base_id in record.bases() {
            let base = self.scope.graph().resolve(&record.name, base_id)?;
            if self.scope.keeps_shape(base) {
                composite.spread(QualifiedName::parse(&base.name)?.symbol_ident());
                continue;
            }
            if !seen.insert(base.id.clone()) {
                continue;
            }
            self.collect_inherited(base, composite, seen)?;
            if let Some(object) = base.as_object() {
                for pointer in &object.pointers {
                    composite.getter(self.resolver.pointer(base, pointer)?);
                }
            }
        }
        Ok(())
    }
}

fn write_composite(
    body: &mut TextEmitter,
    symbol: &str,
    composite: &Composite,
    runtime: &RuntimeTypeLibrary,
) {
    body.write_line(format!("const {} = {{", symbol));
    body.scoped_indent(|body| {
        for member in &composite.inherited {
            match member {
                Member::Spread(symbol) => body.write_line(format!("...{},", symbol)),
                Member::Getter(descriptor) => descriptor.write_getter(body, runtime),
            }
        }
        if !composite.inherited.is_empty() && !composite.own.is_empty() {
            body.newline();
        }
        for descriptor in &composite.own {
            descriptor.write_getter(body, runtime);
        }
    });
    body.write_line("} as const;");
    body.newline();
}

fn write_module_export(
    tree: &mut OutputTree,
    name: &QualifiedName,
    symbol: &str,
    runtime: &RuntimeTypeLibrary,
) {
    let unit = tree.unit(&module_unit(&name.module));
    if unit.mark(BASE_IMPORT_FLAG) {
        unit.head.write_line(runtime.import_statement());
        unit.head.write_line(format!(
            "import base from \"{}__base__\";",
            root_prefix(&name.module)
        ));
    }

    let shape = format!("typeof base.{}", symbol);
    let body = &mut unit.body;
    body.write_line(format!("export const {} = {{", name.local_ident()));
    body.scoped_indent(|body| {
        body.write_line(format!("...base.{},", symbol));
        body.write_line(format!(
            "shape: <Spec extends {}>(",
            runtime.make_select_args(&shape)
        ));
        body.scoped_indent(|body| body.write_line("spec: Spec"));
        body.write_line(format!("): {} =>", runtime.query_of("Spec", &shape)));
        body.scoped_indent(|body| {
            body.write_line(format!(
                "{},",
                runtime.shape_call(&format!("base.{}", symbol), "spec")
            ));
        });
    });
    body.write_line("} as const;");
    body.newline();
}
