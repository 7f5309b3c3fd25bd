//! Dependency-first ordering of scalar and object types.
//!
//! Only `bases` are dependency edges. Union and intersection members are
//! referenced lazily by generated code and never need to precede the type.

use crate::error::SchemaError;
use crate::graph::TypeGraph;
use crate::types::{TypeId, TypeRecord};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Computes a topological order over a [`TypeGraph`].
pub struct TopologicalOrderer<'a> {
    graph: &'a TypeGraph,
}

impl<'a> TopologicalOrderer<'a> {
    /// Creates an orderer for the given graph.
    #[must_use]
    pub fn new(graph: &'a TypeGraph) -> Self {
        Self { graph }
    }

    /// Orders every scalar and object type so that bases come first.
    ///
    /// Roots are visited in graph insertion order and bases in declaration
    /// order, so the result is deterministic. Marks are keyed by type name so
    /// cycle reports read in schema terms.
    ///
    /// # Errors
    /// Returns `SchemaError::DependencyCycle` as soon as a type is reached
    /// again while it is still in progress. No partial order is returned.
    pub fn order(&self) -> Result<TypeOrder, SchemaError> {
        let mut marks: HashMap<&'a str, Mark> = HashMap::with_capacity(self.graph.len());
        let mut done: Vec<TypeId> = Vec::with_capacity(self.graph.len());

        for root in self.graph.iter().filter(|r| r.is_orderable()) {
            if marks.contains_key(root.name.as_str()) {
                continue;
            }

            marks.insert(&root.name, Mark::InProgress);
            let mut stack: Vec<(&'a TypeRecord, usize)> = vec![(root, 0)];

            while let Some(top) = stack.last_mut() {
                let record = top.0;
                let next = top.1;
                top.1 += 1;

                match record.bases().get(next) {
                    Some(base_id) => {
                        let base = self.graph.resolve(&record.name, base_id)?;
                        match marks.get(base.name.as_str()) {
                            Some(Mark::InProgress) => {
                                return Err(SchemaError::cycle(&base.name, &record.name));
                            }
                            Some(Mark::Done) => {}
                            None => {
                                marks.insert(&base.name, Mark::InProgress);
                                stack.push((base, 0));
                            }
                        }
                    }
                    None => {
                        stack.pop();
                        marks.insert(&record.name, Mark::Done);
                        done.push(record.id.clone());
                    }
                }
            }
        }

        tracing::debug!("Topological order covers {} types", done.len());
        Ok(TypeOrder { ids: done })
    }
}

/// Dependency-first sequence of type ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeOrder {
    ids: Vec<TypeId>,
}

impl TypeOrder {
    /// Returns the ordered ids.
    #[must_use]
    pub fn ids(&self) -> &[TypeId] {
        &self.ids
    }

    /// Returns the number of ordered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if no types were ordered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the position of a type in the order.
    #[must_use]
    pub fn position(&self, id: &TypeId) -> Option<usize> {
        self.ids.iter().position(|candidate| candidate == id)
    }

    /// Resolves the order against its graph.
    pub fn records<'g>(&'g self, graph: &'g TypeGraph) -> impl Iterator<Item = &'g TypeRecord> {
        self.ids.iter().filter_map(move |id| graph.get(id))
    }

    /// Resolves the order against its graph, dependents first.
    pub fn records_rev<'g>(
        &'g self,
        graph: &'g TypeGraph,
    ) -> impl Iterator<Item = &'g TypeRecord> {
        self.ids.iter().rev().filter_map(move |id| graph.get(id))
    }
}
