//! Type graph validation.
//!
//! Validation is all-or-nothing: the first problem aborts graph construction.

use crate::error::SchemaError;
use crate::graph::TypeGraph;
use crate::types::{TypeId, TypeKind, TypeRecord};
use shapegen_core::QualifiedName;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Validates every record of a freshly built graph.
///
/// # Arguments
/// * `graph` - Graph whose records have all been inserted
///
/// # Errors
/// Returns `SchemaError` describing the first invalid record, or
/// `SchemaError::DependencyCycle` if a scalar's material chain or a
/// collection's elements loop back on themselves.
pub fn validate_graph(graph: &TypeGraph) -> Result<(), SchemaError> {
    for record in graph.iter() {
        validate_name(record)?;
        validate_references(graph, record)?;
    }
    validate_representations(graph)
}

/// Scalars and object types must carry a `module::local` name.
fn validate_name(record: &TypeRecord) -> Result<(), SchemaError> {
    match record.kind {
        TypeKind::Scalar(_) | TypeKind::Object(_) => {
            QualifiedName::parse(&record.name)?;
            Ok(())
        }
        // Collection names are synthesized by the source (`array<std::str>`).
        TypeKind::Array(_) | TypeKind::Tuple(_) => Ok(()),
    }
}

/// Every referenced id must exist in the graph.
fn validate_references(graph: &TypeGraph, record: &TypeRecord) -> Result<(), SchemaError> {
    for id in record.references() {
        if !graph.contains(id) {
            return Err(SchemaError::unknown_reference(&record.name, id.as_str()));
        }
    }
    Ok(())
}

/// Ids a record's property representation is derived from.
fn representation_edges(record: &TypeRecord) -> Vec<&TypeId> {
    match &record.kind {
        // A scalar listing itself as material is its own material scalar.
        TypeKind::Scalar(scalar) => scalar
            .material_id
            .iter()
            .filter(|id| **id != record.id)
            .collect(),
        TypeKind::Array(array) => vec![&array.element_id],
        TypeKind::Tuple(tuple) => tuple.elements.iter().map(|e| &e.target_id).collect(),
        TypeKind::Object(_) => Vec::new(),
    }
}

/// Material chains and collection elements must terminate.
fn validate_representations(graph: &TypeGraph) -> Result<(), SchemaError> {
    let mut marks: HashMap<&TypeId, Mark> = HashMap::with_capacity(graph.len());

    for root in graph.iter() {
        if marks.contains_key(&root.id) {
            continue;
        }

        marks.insert(&root.id, Mark::InProgress);
        let mut stack = vec![(root, representation_edges(root), 0usize)];

        while let Some(top) = stack.last_mut() {
            let record = top.0;
            let next = top.1.get(top.2).copied();
            top.2 += 1;

            match next {
                Some(id) => {
                    let target = graph.resolve(&record.name, id)?;
                    match marks.get(&target.id) {
                        Some(Mark::InProgress) => {
                            return Err(SchemaError::cycle(&target.name, &record.name));
                        }
                        Some(Mark::Done) => {}
                        None => {
                            marks.insert(&target.id, Mark::InProgress);
                            stack.push((target, representation_edges(target), 0));
                        }
                    }
                }
                None => {
                    stack.pop();
                    marks.insert(&record.id, Mark::Done);
                }
            }
        }
    }
    Ok(())
}
