//! Transitive closure with witness composition (Floyd-Warshall).

use super::Relation;

/// Compose the witnesses of `i -> j` and `j -> k` into one for `i -> k`.
fn compose(first: &str, second: &str) -> String {
    format!("{}; {}", first, second)
}

/// Compute the transitive closure of `relation`.
///
/// Implied edges get the composed witness of the path that introduced them.
/// An edge already present is never overwritten, so direct witnesses always
/// win over composed ones.
pub fn close(relation: &Relation) -> Relation {
    let mut closure = relation.clone();
    let entities: Vec<String> = closure.entities().map(str::to_string).collect();

    for j in &entities {
        let via_j = match closure.targets(j) {
            Some(t) if !t.is_empty() => t.clone(),
            _ => continue,
        };

        for i in &entities {
            let Some(targets) = closure.targets_mut(i) else {
                continue;
            };
            let Some(w_ij) = targets.get(j).cloned() else {
                continue;
            };
            for (k, w_jk) in &via_j {
                targets
                    .entry(k.clone())
                    .or_insert_with(|| compose(&w_ij, w_jk));
            }
        }
    }

    log::debug!(
        "closure: {} entities, {} -> {} edges",
        closure.len(),
        relation.edge_count(),
        closure.edge_count()
    );
    closure
}
