//! Implicit cast catalogue.

use crate::graph::TypeGraph;
use crate::types::{CastRecord, TypeId};
use indexmap::{IndexMap, IndexSet};

/// Directed "castable to" edges keyed by source type.
///
/// The raw relation is neither transitive nor symmetric; [`CastMap::closure`]
/// derives reachability when needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CastMap {
    edges: IndexMap<TypeId, IndexSet<TypeId>>,
}

impl CastMap {
    /// Creates an empty cast map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the map from the implicit rows of a cast catalogue.
    #[must_use]
    pub fn from_implicit_casts(casts: &[CastRecord]) -> Self {
        let mut map = Self::new();
        for cast in casts.iter().filter(|c| c.allow_implicit) {
            map.insert(cast.from_id.clone(), cast.to_id.clone());
        }
        map
    }

    /// Builds the map from object ancestry: every type is castable to each of
    /// its transitive bases.
    pub fn from_ancestors<'a>(graph: &TypeGraph, ids: impl IntoIterator<Item = &'a TypeId>) -> Self {
        let mut map = Self::new();
        for id in ids {
            let entry = map.edges.entry(id.clone()).or_default();
            for ancestor in graph.ancestors(id) {
                entry.insert(ancestor.id.clone());
            }
        }
        map
    }

    /// Adds an edge.
    pub fn insert(&mut self, from: TypeId, to: TypeId) {
        self.edges.entry(from).or_default().insert(to);
    }

    /// Iterates the direct targets of a type in insertion order.
    pub fn targets<'s>(&'s self, from: &TypeId) -> impl Iterator<Item = &'s TypeId> {
        self.edges.get(from).into_iter().flatten()
    }

    /// Returns true if `from` is directly castable to `to`.
    #[must_use]
    pub fn is_castable(&self, from: &TypeId, to: &TypeId) -> bool {
        self.edges.get(from).is_some_and(|targets| targets.contains(to))
    }

    /// Returns the number of source types with at least one edge.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if there are no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.values().all(IndexSet::is_empty)
    }

    /// Returns the transitive closure of the relation.
    ///
    /// Reachable targets are listed breadth-first, nearest first. A type is
    /// never its own target.
    #[must_use]
    pub fn closure(&self) -> Self {
        let mut closed = Self::new();

        for from in self.edges.keys() {
            let mut reach: IndexSet<TypeId> = IndexSet::new();
            let mut cursor = 0;
            reach.extend(self.targets(from).filter(|t| *t != from).cloned());

            while cursor < reach.len() {
                let current = reach[cursor].clone();
                cursor += 1;
                for next in self.targets(&current) {
                    if next != from {
                        reach.insert(next.clone());
                    }
                }
            }

            closed.edges.insert(from.clone(), reach);
        }

        closed
    }
}
