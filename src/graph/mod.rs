//! Hierarchy graph engine: relation store, transitive closure,
//! minimalization and join finding.
//!
//! Everything here is pure and synchronous. Witnesses are opaque strings that
//! are only ever composed and displayed.

mod closure;
mod join;
mod minimal;

pub use closure::close;
pub use join::{find_joins, Join};
pub use minimal::minimalize;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A raw edge as produced by the prover adapter (from --witness--> to).
///
/// `from` is the more general structure, `to` the one inheriting from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    pub from: String,
    pub to: String,
    /// Coercion or canonical projection name, e.g. `GRing.Ring.zmodType`.
    pub witness: String,
}

impl Triple {
    pub fn new(from: impl Into<String>, to: impl Into<String>, witness: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            witness: witness.into(),
        }
    }
}

/// Target mapping of a single entity: target -> witness.
pub type Targets = BTreeMap<String, String>;

/// Directed, edge-labeled graph over entity names.
///
/// Every entity that appears as a target is also a source key, possibly with
/// an empty target mapping, so it takes part in closure iterations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relation {
    edges: BTreeMap<String, Targets>,
}

impl Relation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a relation by inserting every triple in order.
    pub fn from_triples<'a, I>(triples: I) -> Self
    where
        I: IntoIterator<Item = &'a Triple>,
    {
        let mut relation = Self::new();
        for t in triples {
            relation.insert(&t.from, &t.to, &t.witness);
        }
        relation
    }

    /// Record `source -> target` with `witness`.
    ///
    /// Missing endpoints are created with empty target mappings. Inserting the
    /// same pair twice overwrites: the later witness wins.
    pub fn insert(&mut self, source: &str, target: &str, witness: &str) {
        if !self.edges.contains_key(target) {
            self.edges.insert(target.to_string(), Targets::new());
        }
        self.edges
            .entry(source.to_string())
            .or_default()
            .insert(target.to_string(), witness.to_string());
    }

    /// All known entity names, ascending.
    pub fn entities(&self) -> impl Iterator<Item = &str> + '_ {
        self.edges.keys().map(String::as_str)
    }

    /// Outgoing edges of `entity`, or `None` if it is unknown.
    pub fn targets(&self, entity: &str) -> Option<&Targets> {
        self.edges.get(entity)
    }

    pub fn witness(&self, source: &str, target: &str) -> Option<&str> {
        self.edges
            .get(source)
            .and_then(|t| t.get(target))
            .map(String::as_str)
    }

    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        self.witness(source, target).is_some()
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum()
    }

    pub(crate) fn targets_mut(&mut self, entity: &str) -> Option<&mut Targets> {
        self.edges.get_mut(entity)
    }
}
