//! Minimalization: drop every member of a target set that another member
//! already reaches.

use std::collections::BTreeMap;
use std::ops::Bound;

use super::Relation;

/// Reduce `mapping` to its non-redundant members with respect to `closure`.
///
/// Keys are walked from the greatest down, each step taking the greatest
/// surviving key strictly below the previous one. For a visited key `k`, every
/// other entry that `k` reaches in `closure` is removed. Keys without a closure
/// entry remove nothing. The marker values are carried through untouched.
pub fn minimalize<V: Clone>(
    closure: &Relation,
    mapping: &BTreeMap<String, V>,
) -> BTreeMap<String, V> {
    let mut result = mapping.clone();
    let mut cursor: Option<String> = None;

    loop {
        let upper = match &cursor {
            Some(c) => Bound::Excluded(c.as_str()),
            None => Bound::Unbounded,
        };
        let Some(key) = result
            .range::<str, _>((Bound::Unbounded, upper))
            .next_back()
            .map(|(k, _)| k.clone())
        else {
            break;
        };

        if let Some(reach) = closure.targets(&key) {
            result.retain(|t, _| *t == key || !reach.contains_key(t));
        }
        cursor = Some(key);
    }

    result
}
