//! Join finding: the unique minimal common successor of two entities.

use std::collections::BTreeMap;

use super::{minimalize, Relation};
use crate::error::{HierarchyError, Result};

/// `join` is the unique minimal entity reachable from both `left` and `right`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub left: String,
    pub right: String,
    pub join: String,
}

/// Everything reachable from `entity`, including `entity` itself.
fn reach_of<'a>(closure: &'a Relation, entity: &'a str) -> BTreeMap<&'a str, ()> {
    let mut reach: BTreeMap<&str, ()> = closure
        .targets(entity)
        .map(|t| t.keys().map(|k| (k.as_str(), ())).collect())
        .unwrap_or_default();
    reach.insert(entity, ());
    reach
}

/// Find the join of every ordered pair of distinct entities of `closure`.
///
/// Pairs without a common successor are skipped. A pair with more than one
/// minimal common successor fails the whole run with
/// [`HierarchyError::AmbiguousJoin`].
pub fn find_joins(closure: &Relation) -> Result<Vec<Join>> {
    let entities: Vec<&str> = closure.entities().collect();
    let mut joins = Vec::new();

    for &kl in &entities {
        let left = reach_of(closure, kl);
        for &kr in &entities {
            if kl == kr {
                continue;
            }
            let right = reach_of(closure, kr);
            let common: BTreeMap<String, ()> = left
                .keys()
                .filter(|k| right.contains_key(*k))
                .map(|k| (k.to_string(), ()))
                .collect();

            let minimal = minimalize(closure, &common);
            let mut candidates = minimal.into_keys();
            match (candidates.next(), candidates.next()) {
                (None, _) => {
                    log::debug!("no join for {} and {}", kl, kr);
                }
                (Some(join), None) => joins.push(Join {
                    left: kl.to_string(),
                    right: kr.to_string(),
                    join,
                }),
                (Some(first), Some(second)) => {
                    let candidates: Vec<String> =
                        [first, second].into_iter().chain(candidates).collect();
                    log::error!(
                        "ambiguous join for {} and {}: {}",
                        kl,
                        kr,
                        candidates.join(", ")
                    );
                    return Err(HierarchyError::AmbiguousJoin {
                        left: kl.to_string(),
                        right: kr.to_string(),
                        candidates,
                    });
                }
            }
        }
    }

    log::info!("found {} joins over {} entities", joins.len(), entities.len());
    Ok(joins)
}
