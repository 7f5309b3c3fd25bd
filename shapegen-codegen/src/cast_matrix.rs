//! Pairwise cast-compatibility decision table.
//!
//! For an ordered list of types in one category and the category's cast
//! edges, the builder answers, for every ordered pair `(A, B)`, which type
//! values of `A` and `B` meet at. Rules, first match wins:
//!
//! 1. `A == B` gives `B`.
//! 2. `A` castable to `B` gives `B`.
//! 3. `B` castable to `A` gives `A`.
//! 4. The first list member both sides are castable to.
//! 5. The caller-supplied fallback.
//!
//! Castability is reachability over the declared edges.

use indexmap::IndexSet;
use shapegen_schema::{CastMap, TypeId};
use std::collections::HashMap;
use std::fmt;

/// Result of one decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastOutcome {
    /// The named type.
    Type(String),
    /// No compatible type.
    Never,
}

impl CastOutcome {
    /// Creates a named outcome.
    #[must_use]
    pub fn of(name: impl Into<String>) -> Self {
        Self::Type(name.into())
    }

    /// Returns the type name, if any.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Type(name) => Some(name),
            Self::Never => None,
        }
    }
}

impl fmt::Display for CastOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => f.write_str(name),
            Self::Never => f.write_str("never"),
        }
    }
}

/// Which rule produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastRule {
    /// Both sides are the same type.
    SameType,
    /// The left side casts to the right.
    SourceToTarget,
    /// The right side casts to the left.
    TargetToSource,
    /// Both sides cast to a shared list member.
    SharedTarget,
    /// No rule applied.
    Fallback,
}

/// Decision for one ordered pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastDecision {
    /// Rule that fired.
    pub rule: CastRule,
    /// Resulting type.
    pub outcome: CastOutcome,
}

/// A pair with several shared targets and no most specific one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastAmbiguity {
    /// Left type name.
    pub left: String,
    /// Right type name.
    pub right: String,
    /// Shared targets in list order; the first was chosen.
    pub candidates: Vec<String>,
}

#[derive(Debug, Clone)]
struct Candidate {
    id: TypeId,
    name: String,
}

/// Builds a [`CastMatrix`] for one type category.
#[derive(Debug, Clone)]
pub struct CastMatrixBuilder {
    candidates: Vec<Candidate>,
    edges: CastMap,
    fallback: CastOutcome,
}

impl CastMatrixBuilder {
    /// Creates a builder with the given fallback outcome.
    #[must_use]
    pub fn new(fallback: CastOutcome) -> Self {
        Self {
            candidates: Vec::new(),
            edges: CastMap::new(),
            fallback,
        }
    }

    /// Appends a type to the ordered list.
    #[must_use]
    pub fn candidate(mut self, id: TypeId, name: impl Into<String>) -> Self {
        self.candidates.push(Candidate {
            id,
            name: name.into(),
        });
        self
    }

    /// Appends several types to the ordered list.
    #[must_use]
    pub fn candidates<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = (TypeId, S)>,
        S: Into<String>,
    {
        self.candidates
            .extend(types.into_iter().map(|(id, name)| Candidate {
                id,
                name: name.into(),
            }));
        self
    }

    /// Sets the declared cast edges.
    #[must_use]
    pub fn edges(mut self, edges: &CastMap) -> Self {
        self.edges = edges.clone();
        self
    }

    /// Computes the decision for every ordered pair of the list.
    #[must_use]
    pub fn build(self) -> CastMatrix {
        let reach = self.edges.closure();
        let reach_sets: Vec<IndexSet<&TypeId>> = self
            .candidates
            .iter()
            .map(|c| reach.targets(&c.id).collect())
            .collect();

        let size = self.candidates.len();
        let mut decisions = Vec::with_capacity(size * size);
        let mut ambiguities = Vec::new();

        for (i, outer) in self.candidates.iter().enumerate() {
            for (j, inner) in self.candidates.iter().enumerate() {
                let decision = if outer.id == inner.id {
                    CastDecision {
                        rule: CastRule::SameType,
                        outcome: CastOutcome::of(&inner.name),
                    }
                } else if reach_sets[i].contains(&inner.id) {
                    CastDecision {
                        rule: CastRule::SourceToTarget,
                        outcome: CastOutcome::of(&inner.name),
                    }
                } else if reach_sets[j].contains(&outer.id) {
                    CastDecision {
                        rule: CastRule::TargetToSource,
                        outcome: CastOutcome::of(&outer.name),
                    }
                } else {
                    let shared: Vec<usize> = (0..size)
                        .filter(|&k| {
                            let id = &self.candidates[k].id;
                            reach_sets[i].contains(id) && reach_sets[j].contains(id)
                        })
                        .collect();
                    self.shared_decision(outer, inner, &shared, &reach_sets, &mut ambiguities)
                };
                decisions.push(decision);
            }
        }

        let index = self
            .candidates
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();

        CastMatrix {
            names: self.candidates.into_iter().map(|c| c.name).collect(),
            index,
            decisions,
            ambiguities,
            fallback: self.fallback,
        }
    }

    fn shared_decision(
        &self,
        outer: &Candidate,
        inner: &Candidate,
        shared: &[usize],
        reach_sets: &[IndexSet<&TypeId>],
        ambiguities: &mut Vec<CastAmbiguity>,
    ) -> CastDecision {
        let Some(&chosen) = shared.first() else {
            return self.fallback_decision();
        };

        let chosen_reach = &reach_sets[chosen];
        let most_specific = shared[1..]
            .iter()
            .all(|&k| chosen_reach.contains(&self.candidates[k].id));
        if !most_specific {
            let candidates: Vec<String> = shared
                .iter()
                .map(|&k| self.candidates[k].name.clone())
                .collect();
            tracing::warn!(
                "Ambiguous shared cast target for ({}, {}): {:?}, using {}",
                outer.name,
                inner.name,
                candidates,
                candidates[0]
            );
            ambiguities.push(CastAmbiguity {
                left: outer.name.clone(),
                right: inner.name.clone(),
                candidates,
            });
        }

        let name = &self.candidates[chosen].name;
        if self.fallback.type_name() == Some(name.as_str()) {
            return self.fallback_decision();
        }

        CastDecision {
            rule: CastRule::SharedTarget,
            outcome: CastOutcome::of(name),
        }
    }

    fn fallback_decision(&self) -> CastDecision {
        CastDecision {
            rule: CastRule::Fallback,
            outcome: self.fallback.clone(),
        }
    }
}

/// Total decision table over one type list.
#[derive(Debug, Clone)]
pub struct CastMatrix {
    names: Vec<String>,
    index: HashMap<String, usize>,
    decisions: Vec<CastDecision>,
    ambiguities: Vec<CastAmbiguity>,
    fallback: CastOutcome,
}

impl CastMatrix {
    /// Returns the decision for `(a, b)`, or `None` if either is not listed.
    #[must_use]
    pub fn resolve(&self, a: &str, b: &str) -> Option<&CastDecision> {
        let i = *self.index.get(a)?;
        let j = *self.index.get(b)?;
        self.decisions.get(i * self.names.len() + j)
    }

    /// Returns the listed type names in order.
    #[must_use]
    pub fn types(&self) -> &[String] {
        &self.names
    }

    /// Returns the decisions with `a` on the left, in list order.
    pub fn row(&self, a: &str) -> impl Iterator<Item = (&str, &CastDecision)> {
        let size = self.names.len();
        let start = self.index.get(a).map_or(0, |&i| i * size);
        let len = if self.index.contains_key(a) { size } else { 0 };
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.decisions[start..start + len].iter())
    }

    /// Returns the pairs that had no most specific shared target.
    #[must_use]
    pub fn ambiguities(&self) -> &[CastAmbiguity] {
        &self.ambiguities
    }

    /// Returns the fallback outcome.
    #[must_use]
    pub fn fallback(&self) -> &CastOutcome {
        &self.fallback
    }

    /// Returns the number of listed types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no types are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
