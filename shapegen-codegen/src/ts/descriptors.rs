//! Pointer descriptors and their TypeScript representations.
//!
//! A descriptor is the intermediate form of one getter in the composite
//! definitions: the resolved type expression of the target plus, for
//! links, the runtime value naming the target composites.

use crate::emitter::TextEmitter;
use crate::error::CodegenError;
use crate::scope::GenerationScope;
use shapegen_core::{
    Cardinality, PointerKind, QualifiedName, RuntimeTypeLibrary, ScalarRepr, quote, to_ident,
};
use shapegen_schema::{PointerRecord, SchemaError, TypeId, TypeKind, TypeRecord};
use std::collections::HashSet;

/// Resolved target of a pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRepr {
    /// Type-level expression.
    pub type_expr: String,
    /// Value-level expression, present for links only.
    pub value_expr: Option<String>,
}

impl TargetRepr {
    /// Creates a property target.
    #[must_use]
    pub fn property(type_expr: impl Into<String>) -> Self {
        Self {
            type_expr: type_expr.into(),
            value_expr: None,
        }
    }

    /// Creates the target of a link into elided types.
    #[must_use]
    pub fn unknown_link() -> Self {
        Self {
            type_expr: ScalarRepr::Unknown.ts_type().to_string(),
            value_expr: Some("null".to_string()),
        }
    }

    /// Returns true for link targets.
    #[must_use]
    pub fn is_link(&self) -> bool {
        self.value_expr.is_some()
    }
}

/// One getter of a composite definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerDescriptor {
    /// Field name.
    pub name: String,
    /// Descriptor kind.
    pub kind: PointerKind,
    /// Cardinality.
    pub cardinality: Cardinality,
    /// Resolved target.
    pub target: TargetRepr,
    /// Link properties.
    pub properties: Vec<PointerDescriptor>,
}

impl PointerDescriptor {
    /// Returns the runtime descriptor type this value is asserted as.
    #[must_use]
    pub fn descriptor_type(&self, runtime: &RuntimeTypeLibrary) -> String {
        if self.target.is_link() {
            runtime.link_type(&self.target.type_expr, self.cardinality)
        } else {
            runtime.property_type(&self.target.type_expr, self.cardinality)
        }
    }

    /// Writes `get <name>() { return {...} as <descriptor type>; },`.
    pub fn write_getter(&self, out: &mut TextEmitter, runtime: &RuntimeTypeLibrary) {
        out.write_line(format!("get {}() {{", member_name(&self.name)));
        out.scoped_indent(|out| {
            out.write_line("return {");
            out.scoped_indent(|out| self.write_fields(out, runtime));
            out.write_line(format!("}} as {};", self.descriptor_type(runtime)));
        });
        out.write_line("},");
    }

    fn write_fields(&self, out: &mut TextEmitter, runtime: &RuntimeTypeLibrary) {
        out.write_line(format!("kind: {},", runtime.kind(self.kind)));
        out.write_line(format!("name: {},", quote(&self.name)));
        out.write_line(format!("cardinality: {},", runtime.cardinality(self.cardinality)));
        if let Some(value) = &self.target.value_expr {
            out.write_line(format!("target: {},", value));
        }
        if self.properties.is_empty() {
            return;
        }
        out.write_line("properties: {");
        out.scoped_indent(|out| {
            for property in &self.properties {
                out.write_line(format!("{}: {{", member_name(&property.name)));
                out.scoped_indent(|out| property.write_fields(out, runtime));
                out.write_line(format!("}} as {},", property.descriptor_type(runtime)));
            }
        });
        out.write_line("},");
    }
}

/// Spells an object member name, quoting it when it is not an identifier.
#[must_use]
pub fn member_name(name: &str) -> String {
    if to_ident(name) == name {
        name.to_string()
    } else {
        quote(name)
    }
}

/// Resolves pointer targets against a generation scope.
#[derive(Debug)]
pub struct DescriptorResolver<'a> {
    scope: &'a GenerationScope<'a>,
}

impl<'a> DescriptorResolver<'a> {
    /// Creates a resolver.
    #[must_use]
    pub fn new(scope: &'a GenerationScope<'a>) -> Self {
        Self { scope }
    }

    /// Builds the descriptor of a pointer declared on `owner`.
    ///
    /// # Errors
    /// Returns `CodegenError::ShapeUnsupported` for nested union and
    /// intersection targets, and `CodegenError::Schema` when a target is of
    /// the wrong kind.
    pub fn pointer(
        &self,
        owner: &TypeRecord,
        pointer: &PointerRecord,
    ) -> Result<PointerDescriptor, CodegenError> {
        let graph = self.scope.graph();
        let target_record = graph.resolve(&owner.name, &pointer.target_id)?;
        let is_link = pointer.is_link()
            || (pointer.kind == PointerKind::Computable && target_record.as_object().is_some());

        let target = if is_link {
            self.link_target(&owner.name, &pointer.target_id)?
        } else {
            TargetRepr::property(self.property_repr(&owner.name, &pointer.target_id)?)
        };

        let properties = pointer
            .link_properties
            .iter()
            .map(|property| {
                Ok(PointerDescriptor {
                    name: property.name.clone(),
                    kind: PointerKind::Property,
                    cardinality: Cardinality::AtMostOne,
                    target: TargetRepr::property(
                        self.property_repr(&owner.name, &property.target_id)?,
                    ),
                    properties: Vec::new(),
                })
            })
            .collect::<Result<Vec<_>, CodegenError>>()?;

        Ok(PointerDescriptor {
            name: pointer.name.clone(),
            kind: pointer.kind,
            cardinality: pointer.cardinality,
            target,
            properties,
        })
    }

    /// Returns the type expression of a property target.
    ///
    /// # Errors
    /// Returns `CodegenError::Schema` if the target is an object type.
    pub fn property_repr(&self, referencing: &str, id: &TypeId) -> Result<String, CodegenError> {
        let record = self.scope.graph().resolve(referencing, id)?;

        match &record.kind {
            TypeKind::Scalar(scalar) if scalar.is_enum() => {
                if !self.scope.keeps_enum(record) {
                    return Ok(ScalarRepr::String.ts_type().to_string());
                }
                let name = QualifiedName::parse(&record.name)?;
                Ok(format!("{}Types.{}", name.module_ident(), name.local_ident()))
            }
            TypeKind::Scalar(scalar) => match &scalar.material_id {
                Some(material) if material != &record.id => {
                    self.property_repr(&record.name, material)
                }
                _ => Ok(ScalarRepr::from_scalar_name(&record.name).ts_type().to_string()),
            },
            TypeKind::Array(array) => Ok(format!(
                "Array<{}>",
                self.property_repr(&record.name, &array.element_id)?
            )),
            TypeKind::Tuple(tuple) => {
                let elements = tuple
                    .elements
                    .iter()
                    .map(|e| self.property_repr(&record.name, &e.target_id))
                    .collect::<Result<Vec<_>, CodegenError>>()?;
                if tuple.is_named() {
                    let fields: Vec<String> = tuple
                        .elements
                        .iter()
                        .zip(&elements)
                        .map(|(e, repr)| format!("{}: {}", member_name(&e.name), repr))
                        .collect();
                    Ok(format!("{{{}}}", fields.join(", ")))
                } else {
                    Ok(format!("[{}]", elements.join(", ")))
                }
            }
            TypeKind::Object(_) => Err(SchemaError::UnexpectedKind {
                name: record.name.clone(),
                expected: "scalar",
                actual: record.kind.label(),
            }
            .into()),
        }
    }

    /// Returns the target of a link.
    ///
    /// Intersections become one conjunction group, unions one group per
    /// member. A target touching an elided type resolves to `unknown`.
    ///
    /// # Errors
    /// Returns `CodegenError::ShapeUnsupported` for an intersection with a
    /// union member or a union with an intersection member.
    pub fn link_target(&self, referencing: &str, id: &TypeId) -> Result<TargetRepr, CodegenError> {
        let target = self.expect_object(referencing, id)?;
        let Some(object) = target.as_object() else {
            return Ok(TargetRepr::unknown_link());
        };

        let mut seen = HashSet::new();
        let groups: Vec<Vec<&TypeRecord>> = if object.is_intersection() {
            vec![self.conjunction(target, &mut seen)?]
        } else if object.is_union() {
            self.disjunction(target, &mut seen)?
                .into_iter()
                .map(|member| vec![member])
                .collect()
        } else {
            vec![vec![target]]
        };

        if let Some(elided) = groups.iter().flatten().find(|m| !self.scope.keeps_shape(m)) {
            tracing::warn!(
                "Link target '{}' of '{}' is elided, emitting unknown",
                elided.name,
                referencing
            );
            return Ok(TargetRepr::unknown_link());
        }

        let mut symbols = Vec::with_capacity(groups.len());
        for group in &groups {
            let group_symbols = group
                .iter()
                .map(|m| Ok(QualifiedName::parse(&m.name)?.symbol_ident()))
                .collect::<Result<Vec<_>, CodegenError>>()?;
            symbols.push(group_symbols);
        }

        let render = |prefix: &str| {
            let groups: Vec<String> = symbols
                .iter()
                .map(|group| {
                    let members: Vec<String> = group
                        .iter()
                        .map(|s| format!("{}base.{}", prefix, s))
                        .collect();
                    format!("[{}]", members.join(","))
                })
                .collect();
            format!("[{}]", groups.join(","))
        };

        Ok(TargetRepr {
            type_expr: render("typeof "),
            value_expr: Some(render("")),
        })
    }

    fn expect_object(&self, referencing: &str, id: &TypeId) -> Result<&'a TypeRecord, CodegenError> {
        let record = self.scope.graph().resolve(referencing, id)?;
        if record.as_object().is_none() {
            return Err(SchemaError::UnexpectedKind {
                name: record.name.clone(),
                expected: "object",
                actual: record.kind.label(),
            }
            .into());
        }
        Ok(record)
    }

    fn conjunction(
        &self,
        target: &'a TypeRecord,
        seen: &mut HashSet<TypeId>,
    ) -> Result<Vec<&'a TypeRecord>, CodegenError> {
        let mut members = Vec::new();
        let Some(object) = target.as_object() else {
            return Ok(members);
        };
        for id in &object.intersection_of {
            if !seen.insert(id.clone()) {
                continue;
            }
            let member = self.expect_object(&target.name, id)?;
            match member.as_object() {
                Some(m) if m.is_union() => {
                    return Err(CodegenError::shape_unsupported(
                        &target.name,
                        format!("intersection member '{}' is a union", member.name),
                    ));
                }
                Some(m) if m.is_intersection() => members.extend(self.conjunction(member, seen)?),
                _ => members.push(member),
            }
        }
        Ok(members)
    }

    fn disjunction(
        &self,
        target: &'a TypeRecord,
        seen: &mut HashSet<TypeId>,
    ) -> Result<Vec<&'a TypeRecord>, CodegenError> {
        let mut members = Vec::new();
        let Some(object) = target.as_object() else {
            return Ok(members);
        };
        for id in &object.union_of {
            if !seen.insert(id.clone()) {
                continue;
            }
            let member = self.expect_object(&target.name, id)?;
            match member.as_object() {
                Some(m) if m.is_intersection() => {
                    return Err(CodegenError::shape_unsupported(
                        &target.name,
                        format!("union member '{}' is an intersection", member.name),
                    ));
                }
                Some(m) if m.is_union() => members.extend(self.disjunction(member, seen)?),
                _ => members.push(member),
            }
        }
        Ok(members)
    }
}
