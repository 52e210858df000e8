//! The two edge kinds of a structure hierarchy and their raw triples.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::{Relation, Triple};

/// Which relation an edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Canonical,
    Coercion,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Canonical => write!(f, "canonical"),
            EdgeKind::Coercion => write!(f, "coercion"),
        }
    }
}

/// Raw triples of both edge kinds, as extracted from the prover or loaded
/// from a JSON dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyTriples {
    #[serde(default)]
    pub canonicals: Vec<Triple>,
    #[serde(default)]
    pub coercions: Vec<Triple>,
}

impl HierarchyTriples {
    pub fn is_empty(&self) -> bool {
        self.canonicals.is_empty() && self.coercions.is_empty()
    }

    pub fn triples(&self, kind: EdgeKind) -> &[Triple] {
        match kind {
            EdgeKind::Canonical => &self.canonicals,
            EdgeKind::Coercion => &self.coercions,
        }
    }

    /// Relation store for one edge kind.
    pub fn relation(&self, kind: EdgeKind) -> Relation {
        Relation::from_triples(self.triples(kind))
    }

    /// Load triples from a JSON file written by [`HierarchyTriples::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let triples: Self = serde_json::from_str(&content)?;
        log::info!(
            "loaded {} canonical projections and {} coercions from {}",
            triples.canonicals.len(),
            triples.coercions.len(),
            path.display()
        );
        Ok(triples)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HierarchyError;
    use tempfile::TempDir;

    fn sample() -> HierarchyTriples {
        HierarchyTriples {
            canonicals: vec![Triple::new("Zmodule", "Ring", "Ring.zmodType")],
            coercions: vec![
                Triple::new("Zmodule", "Ring", "Ring.zmodType"),
                Triple::new("Choice", "Zmodule", "Zmodule.choiceType"),
            ],
        }
    }

    #[test]
    fn test_relation_per_kind() {
        let triples = sample();
        assert_eq!(triples.relation(EdgeKind::Canonical).edge_count(), 1);
        assert_eq!(triples.relation(EdgeKind::Coercion).edge_count(), 2);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("triples.json");
        sample().save(&path).unwrap();
        assert_eq!(HierarchyTriples::load(&path).unwrap(), sample());
    }

    #[test]
    fn test_load_missing_kind_defaults_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("triples.json");
        std::fs::write(&path, r#"{"coercions":[{"from":"B","to":"A","witness":"f"}]}"#).unwrap();
        let triples = HierarchyTriples::load(&path).unwrap();
        assert!(triples.canonicals.is_empty());
        assert_eq!(triples.coercions.len(), 1);
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("triples.json");
        std::fs::write(&path, "[not json").unwrap();
        let err = HierarchyTriples::load(&path).unwrap_err();
        assert!(matches!(err, HierarchyError::Json(_)));
    }
}
