//! The type graph.
//!
//! Records are owned by an insertion-ordered map keyed by id. The map
//! position doubles as an arena index, so reference cycles (a link back to its
//! own type) are plain ids rather than ownership.

use crate::error::SchemaError;
use crate::types::{TypeId, TypeRecord};
use crate::validation::validate_graph;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// Validated, immutable collection of type records.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    types: IndexMap<TypeId, TypeRecord>,
    by_name: HashMap<String, TypeId>,
}

impl TypeGraph {
    /// Builds and validates a graph from records in source order.
    ///
    /// All records are inserted before any reference is checked, so forward
    /// references resolve regardless of input order.
    ///
    /// # Errors
    /// Returns `SchemaError::DuplicateDefinition` for a repeated id,
    /// `SchemaError::InvalidName` for an unqualified scalar or object name and
    /// `SchemaError::UnknownReference` for the first dangling reference.
    pub fn build(records: Vec<TypeRecord>) -> Result<Self, SchemaError> {
        let mut types = IndexMap::with_capacity(records.len());
        let mut by_name = HashMap::with_capacity(records.len());

        for record in records {
            if types.contains_key(&record.id) {
                return Err(SchemaError::DuplicateDefinition {
                    id: record.id.to_string(),
                    name: record.name,
                });
            }
            by_name.insert(record.name.clone(), record.id.clone());
            types.insert(record.id.clone(), record);
        }

        let graph = Self { types, by_name };
        validate_graph(&graph)?;

        tracing::debug!("Type graph built with {} types", graph.len());
        Ok(graph)
    }

    /// Looks up a type by id.
    #[must_use]
    pub fn get(&self, id: &TypeId) -> Option<&TypeRecord> {
        self.types.get(id)
    }

    /// Looks up a type by qualified name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&TypeRecord> {
        self.by_name.get(name).and_then(|id| self.types.get(id))
    }

    /// Looks up a type by id, failing with an unknown reference error.
    ///
    /// # Errors
    /// Returns `SchemaError::UnknownReference` naming `referencing_type`.
    pub fn resolve(&self, referencing_type: &str, id: &TypeId) -> Result<&TypeRecord, SchemaError> {
        self.get(id)
            .ok_or_else(|| SchemaError::unknown_reference(referencing_type, id.as_str()))
    }

    /// Returns true if a type with the given id exists.
    #[must_use]
    pub fn contains(&self, id: &TypeId) -> bool {
        self.types.contains_key(id)
    }

    /// Returns the arena index of a type.
    #[must_use]
    pub fn index_of(&self, id: &TypeId) -> Option<usize> {
        self.types.get_index_of(id)
    }

    /// Returns the type stored at an arena index.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&TypeRecord> {
        self.types.get_index(index).map(|(_, record)| record)
    }

    /// Iterates records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeRecord> {
        self.types.values()
    }

    /// Returns the number of types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if the graph holds no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns every transitive base of a type, depth-first in declaration order.
    ///
    /// Each ancestor appears once. A malformed cyclic hierarchy terminates
    /// instead of looping; ordering reports the cycle separately.
    #[must_use]
    pub fn ancestors(&self, id: &TypeId) -> Vec<&TypeRecord> {
        let mut result = Vec::new();
        let mut seen: HashSet<&TypeId> = HashSet::new();
        let mut stack: Vec<&TypeId> = match self.get(id) {
            Some(record) => record.bases().iter().rev().collect(),
            None => return result,
        };

        while let Some(next) = stack.pop() {
            if next == id || !seen.insert(next) {
                continue;
            }
            if let Some(record) = self.get(next) {
                result.push(record);
                stack.extend(record.bases().iter().rev());
            }
        }

        result
    }

    /// Returns true if `ancestor` is a transitive base of `id`.
    #[must_use]
    pub fn is_descendant_of(&self, id: &TypeId, ancestor: &TypeId) -> bool {
        self.ancestors(id).iter().any(|record| &record.id == ancestor)
    }
}
