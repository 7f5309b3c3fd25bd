//! Introspection snapshot parser.
//!
//! The schema source reports types as flat rows shaped like the result of the
//! catalogue query (`kind`, `bases: [{id}]`, `pointers: [...]`, ...). This
//! module deserializes those rows and converts them into [`TypeRecord`]s.

use crate::error::ParseError;
use crate::types::{
    CastRecord, LinkProperty, ObjectType, PointerRecord, ScalarType, SchemaSnapshot,
    TupleElement, TypeId, TypeRecord,
};
use serde::Deserialize;
use shapegen_core::{Cardinality, PointerKind};

#[derive(Debug, Deserialize)]
struct RawRef {
    id: TypeId,
}

#[derive(Debug, Deserialize)]
struct RawLinkProperty {
    name: String,
    target_id: TypeId,
}

#[derive(Debug, Deserialize)]
struct RawPointer {
    name: String,
    kind: String,
    cardinality: String,
    #[serde(default)]
    required: bool,
    target_id: TypeId,
    #[serde(default)]
    expr: Option<String>,
    #[serde(default)]
    pointers: Option<Vec<RawLinkProperty>>,
}

#[derive(Debug, Deserialize)]
struct RawTupleElement {
    #[serde(default)]
    name: Option<String>,
    target_id: TypeId,
}

#[derive(Debug, Deserialize)]
struct RawType {
    id: TypeId,
    name: String,
    kind: String,
    #[serde(default)]
    is_abstract: bool,
    #[serde(default)]
    enum_values: Option<Vec<String>>,
    #[serde(default)]
    material_id: Option<TypeId>,
    #[serde(default)]
    bases: Vec<RawRef>,
    #[serde(default)]
    union_of: Vec<RawRef>,
    #[serde(default)]
    intersection_of: Vec<RawRef>,
    #[serde(default)]
    pointers: Vec<RawPointer>,
    #[serde(default)]
    array_element_id: Option<TypeId>,
    #[serde(default)]
    tuple_elements: Vec<RawTupleElement>,
}

#[derive(Debug, Deserialize)]
struct RawCast {
    source: RawRef,
    target: RawRef,
    #[serde(default)]
    allow_implicit: bool,
    #[serde(default)]
    allow_assignment: bool,
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    types: Vec<RawType>,
    #[serde(default)]
    casts: Vec<RawCast>,
}

/// Parses a full snapshot document (`{"types": [...], "casts": [...]}`).
///
/// # Errors
/// Returns `ParseError` if the document is malformed or a row carries an
/// unknown kind or cardinality.
pub fn parse_snapshot(json: &str) -> Result<SchemaSnapshot, ParseError> {
    let raw: RawSnapshot = serde_json::from_str(json)?;
    let types = raw
        .types
        .into_iter()
        .map(convert_type)
        .collect::<Result<Vec<_>, _>>()?;
    let casts = raw.casts.into_iter().map(convert_cast).collect();
    Ok(SchemaSnapshot { types, casts })
}

/// Parses a bare array of type rows.
///
/// # Errors
/// Returns `ParseError` if the document is malformed.
pub fn parse_types(json: &str) -> Result<Vec<TypeRecord>, ParseError> {
    let raw: Vec<RawType> = serde_json::from_str(json)?;
    raw.into_iter().map(convert_type).collect()
}

fn convert_type(raw: RawType) -> Result<TypeRecord, ParseError> {
    let ids = |refs: Vec<RawRef>| refs.into_iter().map(|r| r.id).collect::<Vec<_>>();

    match raw.kind.as_str() {
        "scalar" => Ok(TypeRecord::scalar(
            raw.id,
            raw.name,
            ScalarType {
                is_abstract: raw.is_abstract,
                bases: ids(raw.bases),
                enum_values: raw.enum_values.unwrap_or_default(),
                material_id: raw.material_id,
            },
        )),
        "object" => {
            let pointers = raw
                .pointers
                .into_iter()
                .map(|p| convert_pointer(&raw.name, p))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(TypeRecord::object(
                raw.id,
                raw.name,
                ObjectType {
                    is_abstract: raw.is_abstract,
                    bases: ids(raw.bases),
                    union_of: ids(raw.union_of),
                    intersection_of: ids(raw.intersection_of),
                    pointers,
                },
            ))
        }
        "array" => {
            let element_id = raw
                .array_element_id
                .ok_or_else(|| ParseError::missing_attr(&raw.name, "array_element_id"))?;
            Ok(TypeRecord::array(raw.id, raw.name, element_id))
        }
        "tuple" => {
            let elements = raw
                .tuple_elements
                .into_iter()
                .map(|e| TupleElement {
                    name: e.name.unwrap_or_default(),
                    target_id: e.target_id,
                })
                .collect();
            Ok(TypeRecord::tuple(raw.id, raw.name, elements))
        }
        other => Err(ParseError::invalid_attr(raw.name, "kind", other)),
    }
}

fn convert_pointer(owner: &str, raw: RawPointer) -> Result<PointerRecord, ParseError> {
    let element = format!("{}.{}", owner, raw.name);
    let kind = PointerKind::parse(&raw.kind)
        .ok_or_else(|| ParseError::invalid_attr(&element, "kind", &raw.kind))?;
    let many = match raw.cardinality.as_str() {
        "ONE" => false,
        "MANY" => true,
        other => return Err(ParseError::invalid_attr(&element, "cardinality", other)),
    };

    Ok(PointerRecord {
        name: raw.name,
        kind,
        cardinality: Cardinality::from_flags(many, raw.required),
        target_id: raw.target_id,
        expr: raw.expr,
        link_properties: raw
            .pointers
            .unwrap_or_default()
            .into_iter()
            .map(|p| LinkProperty {
                name: p.name,
                target_id: p.target_id,
            })
            .collect(),
    })
}

fn convert_cast(raw: RawCast) -> CastRecord {
    CastRecord {
        from_id: raw.source.id,
        to_id: raw.target.id,
        allow_implicit: raw.allow_implicit,
        allow_assignment: raw.allow_assignment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeKind;

    const SNAPSHOT: &str = r#"{
        "types": [
            {"id": "s1", "name": "std::str", "kind": "scalar", "is_abstract": false,
             "bases": [], "enum_values": null, "material_id": null},
            {"id": "e1", "name": "default::Color", "kind": "scalar", "is_abstract": false,
             "bases": [], "enum_values": ["red", "green", "blue"], "material_id": null},
            {"id": "o1", "name": "default::User", "kind": "object", "is_abstract": false,
             "bases": [], "union_of": [], "intersection_of": [],
             "pointers": [
                {"name": "name", "kind": "property", "cardinality": "ONE", "required": true,
                 "target_id": "s1", "expr": null, "pointers": null},
                {"name": "friends", "kind": "link", "cardinality": "MANY", "required": false,
                 "target_id": "o1", "expr": null,
                 "pointers": [{"name": "nickname", "target_id": "s1"}]}
             ]},
            {"id": "a1", "name": "array<std::str>", "kind": "array", "array_element_id": "s1"},
            {"id": "t1", "name": "tuple<std::str>", "kind": "tuple",
             "tuple_elements": [{"name": "0", "target_id": "s1"}]}
        ],
        "casts": [
            {"source": {"id": "s1"}, "target": {"id": "s1"}, "allow_implicit": false,
             "allow_assignment": false}
        ]
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let snapshot = parse_snapshot(SNAPSHOT).expect("Failed to parse");
        assert_eq!(snapshot.types.len(), 5);
        assert_eq!(snapshot.casts.len(), 1);
        assert!(!snapshot.casts[0].allow_implicit);

        let color = snapshot.types[1].as_scalar().expect("scalar");
        assert_eq!(color.enum_values, vec!["red", "green", "blue"]);
    }

    #[test]
    fn test_parse_pointer_cardinality() {
        let snapshot = parse_snapshot(SNAPSHOT).expect("Failed to parse");
        let user = snapshot.types[2].as_object().expect("object");

        assert_eq!(user.pointers[0].cardinality, Cardinality::One);
        assert_eq!(user.pointers[0].kind, PointerKind::Property);
        assert_eq!(user.pointers[1].cardinality, Cardinality::Many);
        assert!(user.pointers[1].is_link());
        assert_eq!(user.pointers[1].link_properties[0].name, "nickname");
    }

    #[test]
    fn test_parse_array_and_tuple() {
        let snapshot = parse_snapshot(SNAPSHOT).expect("Failed to parse");
        assert!(matches!(snapshot.types[3].kind, TypeKind::Array(_)));
        match &snapshot.types[4].kind {
            TypeKind::Tuple(t) => assert_eq!(t.elements[0].target_id.as_str(), "s1"),
            other => panic!("expected tuple, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_unknown_kind() {
        let json = r#"[{"id": "x", "name": "default::X", "kind": "unknown"}]"#;
        let err = parse_types(json).expect_err("should fail");
        assert!(matches!(err, ParseError::InvalidAttribute { .. }));
    }

    #[test]
    fn test_parse_bad_cardinality() {
        let json = r#"[{"id": "o", "name": "default::O", "kind": "object",
            "pointers": [{"name": "p", "kind": "property", "cardinality": "SOME",
                          "required": false, "target_id": "o"}]}]"#;
        let err = parse_types(json).expect_err("should fail");
        assert!(err.to_string().contains("cardinality"));
    }

    #[test]
    fn test_parse_array_without_element() {
        let json = r#"[{"id": "a", "name": "array<x>", "kind": "array"}]"#;
        let err = parse_types(json).expect_err("should fail");
        assert!(matches!(err, ParseError::MissingAttribute { .. }));
    }
}
