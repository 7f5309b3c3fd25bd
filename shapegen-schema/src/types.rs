//! Schema type records.
//!
//! This module contains the immutable records describing one introspected
//! type each: scalars, object types, arrays and tuples, plus the pointers
//! declared on object types and the rows of the cast catalogue.

use serde::{Deserialize, Serialize};
use shapegen_core::{Cardinality, PointerKind};
use std::fmt;

/// Opaque unique identifier of a schema type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(String);

impl TypeId {
    /// Creates a type id from its textual form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the textual form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Immutable description of one schema type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRecord {
    /// Unique identifier.
    pub id: TypeId,
    /// Qualified name (`module::local` for scalars and objects).
    pub name: String,
    /// Kind-specific payload.
    pub kind: TypeKind,
}

impl TypeRecord {
    /// Creates a scalar record.
    #[must_use]
    pub fn scalar(id: impl Into<TypeId>, name: impl Into<String>, scalar: ScalarType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: TypeKind::Scalar(scalar),
        }
    }

    /// Creates an object record.
    #[must_use]
    pub fn object(id: impl Into<TypeId>, name: impl Into<String>, object: ObjectType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: TypeKind::Object(object),
        }
    }

    /// Creates an array record.
    #[must_use]
    pub fn array(id: impl Into<TypeId>, name: impl Into<String>, element_id: TypeId) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: TypeKind::Array(ArrayType { element_id }),
        }
    }

    /// Creates a tuple record.
    #[must_use]
    pub fn tuple(
        id: impl Into<TypeId>,
        name: impl Into<String>,
        elements: Vec<TupleElement>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: TypeKind::Tuple(TupleType { elements }),
        }
    }

    /// Returns the direct bases (empty for arrays and tuples).
    #[must_use]
    pub fn bases(&self) -> &[TypeId] {
        match &self.kind {
            TypeKind::Scalar(s) => &s.bases,
            TypeKind::Object(o) => &o.bases,
            TypeKind::Array(_) | TypeKind::Tuple(_) => &[],
        }
    }

    /// Returns the scalar payload, if any.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&ScalarType> {
        match &self.kind {
            TypeKind::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the object payload, if any.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectType> {
        match &self.kind {
            TypeKind::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Returns true for scalars and object types.
    #[must_use]
    pub const fn is_orderable(&self) -> bool {
        matches!(self.kind, TypeKind::Scalar(_) | TypeKind::Object(_))
    }

    /// Returns every type id this record references, in declaration order.
    #[must_use]
    pub fn references(&self) -> Vec<&TypeId> {
        match &self.kind {
            TypeKind::Scalar(s) => s.bases.iter().chain(s.material_id.iter()).collect(),
            TypeKind::Object(o) => {
                let mut refs: Vec<&TypeId> = o
                    .bases
                    .iter()
                    .chain(&o.union_of)
                    .chain(&o.intersection_of)
                    .collect();
                for ptr in &o.pointers {
                    refs.push(&ptr.target_id);
                    refs.extend(ptr.link_properties.iter().map(|p| &p.target_id));
                }
                refs
            }
            TypeKind::Array(a) => vec![&a.element_id],
            TypeKind::Tuple(t) => t.elements.iter().map(|e| &e.target_id).collect(),
        }
    }
}

/// Kind-specific payload of a [`TypeRecord`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Scalar type.
    Scalar(ScalarType),
    /// Object type.
    Object(ObjectType),
    /// Array type.
    Array(ArrayType),
    /// Tuple type.
    Tuple(TupleType),
}

impl TypeKind {
    /// Returns the source's name for this kind.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::Tuple(_) => "tuple",
        }
    }
}

/// Scalar type payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalarType {
    /// Whether the scalar is abstract.
    pub is_abstract: bool,
    /// Direct ancestors in declaration order.
    pub bases: Vec<TypeId>,
    /// Declared enum values, empty for non-enum scalars.
    pub enum_values: Vec<String>,
    /// The material scalar a domain scalar ultimately denotes.
    pub material_id: Option<TypeId>,
}

impl ScalarType {
    /// Returns true if the scalar declares enum values.
    #[must_use]
    pub fn is_enum(&self) -> bool {
        !self.enum_values.is_empty()
    }

    /// Returns true for concrete, non-enum, non-derived scalars.
    #[must_use]
    pub fn is_material(&self) -> bool {
        !self.is_abstract && !self.is_enum() && self.material_id.is_none()
    }
}

/// Object type payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectType {
    /// Whether the object type is abstract.
    pub is_abstract: bool,
    /// Direct ancestors; later bases shadow earlier ones.
    pub bases: Vec<TypeId>,
    /// Members of a union type.
    pub union_of: Vec<TypeId>,
    /// Members of an intersection type.
    pub intersection_of: Vec<TypeId>,
    /// Own pointers in declaration order.
    pub pointers: Vec<PointerRecord>,
}

impl ObjectType {
    /// Returns true if this is a union type.
    #[must_use]
    pub fn is_union(&self) -> bool {
        !self.union_of.is_empty()
    }

    /// Returns true if this is an intersection type.
    #[must_use]
    pub fn is_intersection(&self) -> bool {
        !self.intersection_of.is_empty()
    }

    /// Returns true if the type is neither a union nor an intersection.
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        !self.is_union() && !self.is_intersection()
    }
}

/// Array type payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    /// Element type.
    pub element_id: TypeId,
}

/// Tuple type payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleType {
    /// Elements in position order.
    pub elements: Vec<TupleElement>,
}

impl TupleType {
    /// Returns true if every element is named.
    #[must_use]
    pub fn is_named(&self) -> bool {
        !self.elements.is_empty() && self.elements.iter().all(|e| !e.name.is_empty())
    }
}

/// One tuple element.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleElement {
    /// Element name, empty for positional tuples.
    pub name: String,
    /// Element type.
    pub target_id: TypeId,
}

/// One field on an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerRecord {
    /// Field name.
    pub name: String,
    /// Property or link.
    pub kind: PointerKind,
    /// Declared cardinality.
    pub cardinality: Cardinality,
    /// Target type.
    pub target_id: TypeId,
    /// Defining expression for computed pointers.
    pub expr: Option<String>,
    /// Properties declared on a link.
    pub link_properties: Vec<LinkProperty>,
}

impl PointerRecord {
    /// Creates a property pointer.
    #[must_use]
    pub fn property(
        name: impl Into<String>,
        cardinality: Cardinality,
        target_id: impl Into<TypeId>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: PointerKind::Property,
            cardinality,
            target_id: target_id.into(),
            expr: None,
            link_properties: Vec::new(),
        }
    }

    /// Creates a link pointer.
    #[must_use]
    pub fn link(
        name: impl Into<String>,
        cardinality: Cardinality,
        target_id: impl Into<TypeId>,
    ) -> Self {
        Self {
            kind: PointerKind::Link,
            ..Self::property(name, cardinality, target_id)
        }
    }

    /// Adds a link property.
    #[must_use]
    pub fn with_link_property(
        mut self,
        name: impl Into<String>,
        target_id: impl Into<TypeId>,
    ) -> Self {
        self.link_properties.push(LinkProperty {
            name: name.into(),
            target_id: target_id.into(),
        });
        self
    }

    /// Returns true for link pointers.
    #[must_use]
    pub fn is_link(&self) -> bool {
        self.kind == PointerKind::Link
    }
}

/// A property declared on a link.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkProperty {
    /// Property name.
    pub name: String,
    /// Property type.
    pub target_id: TypeId,
}

/// One row of the cast catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastRecord {
    /// Source type.
    pub from_id: TypeId,
    /// Target type.
    pub to_id: TypeId,
    /// Whether the cast is applied implicitly.
    pub allow_implicit: bool,
    /// Whether the cast is applied on assignment.
    pub allow_assignment: bool,
}

impl CastRecord {
    /// Creates an implicit cast row.
    #[must_use]
    pub fn implicit(from_id: impl Into<TypeId>, to_id: impl Into<TypeId>) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            allow_implicit: true,
            allow_assignment: true,
        }
    }
}

/// Everything a schema source returns for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaSnapshot {
    /// Type records in source order.
    pub types: Vec<TypeRecord>,
    /// Cast catalogue rows.
    pub casts: Vec<CastRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_material() {
        let material = ScalarType::default();
        assert!(material.is_material());

        let domain = ScalarType {
            material_id: Some(TypeId::new("str")),
            ..ScalarType::default()
        };
        assert!(!domain.is_material());

        let enumeration = ScalarType {
            enum_values: vec!["red".to_string()],
            ..ScalarType::default()
        };
        assert!(enumeration.is_enum());
        assert!(!enumeration.is_material());
    }

    #[test]
    fn test_object_references_in_order() {
        let record = TypeRecord::object(
            "user",
            "default::User",
            ObjectType {
                bases: vec![TypeId::new("named")],
                pointers: vec![
                    PointerRecord::link("friends", Cardinality::Many, "user")
                        .with_link_property("since", "datetime"),
                ],
                ..ObjectType::default()
            },
        );

        let refs: Vec<&str> = record.references().iter().map(|id| id.as_str()).collect();
        assert_eq!(refs, vec!["named", "user", "datetime"]);
        assert_eq!(record.bases().len(), 1);
    }

    #[test]
    fn test_array_and_tuple_have_no_bases() {
        let array = TypeRecord::array("arr", "array<std::str>", TypeId::new("str"));
        assert!(array.bases().is_empty());
        assert!(!array.is_orderable());

        let tuple = TypeRecord::tuple(
            "tup",
            "tuple<x:std::str>",
            vec![TupleElement {
                name: "x".to_string(),
                target_id: TypeId::new("str"),
            }],
        );
        assert_eq!(tuple.references().len(), 1);
        assert_eq!(tuple.kind.label(), "tuple");
    }

    #[test]
    fn test_link_constructor() {
        let ptr = PointerRecord::link("owner", Cardinality::One, "user");
        assert!(ptr.is_link());
        assert_eq!(ptr.cardinality, Cardinality::One);
        assert!(ptr.link_properties.is_empty());
    }
}
