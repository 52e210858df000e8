//! Triple extraction from prover output (regex-based).

use regex::Regex;

use crate::error::{HierarchyError, Result};
use crate::graph::Triple;
use crate::hierarchy::HierarchyTriples;

/// Extract canonical projections and coercions from the output of the
/// query script.
///
/// Matches lines like:
/// - `GRing.Zmodule.sort <- GRing.Ring.sort ( GRing.Ring.zmodType )`
/// - `[GRing.Ring.zmodType] : GRing.Ring.type >-> GRing.Zmodule.type`
///
/// Output without a single match is an error: it means the prover printed
/// something other than what the query script asks for.
pub fn extract_hierarchy(output: &str) -> Result<HierarchyTriples> {
    let canonical_regex = Regex::new(
        r"^(?P<parent>[\w.']+)\.sort <- (?P<child>[\w.']+)\.sort \( (?P<witness>(?P<module>[\w.']+)\.[\w']+) \)$",
    )
    .expect("Invalid regex pattern");
    let coercion_regex = Regex::new(
        r"^\[(?P<witness>[^\]]+)\] : (?P<child>[\w.']+)\.type >-> (?P<parent>[\w.']+)\.type$",
    )
    .expect("Invalid regex pattern");

    let mut triples = HierarchyTriples::default();

    for line in output.lines().map(str::trim_end) {
        if let Some(cap) = canonical_regex.captures(line) {
            let (parent, child) = (&cap["parent"], &cap["child"]);
            // Only projections declared by the inheriting structure itself.
            if &cap["module"] != child {
                log::debug!("skipping cross-cutting projection: {}", line);
                continue;
            }
            triples
                .canonicals
                .push(Triple::new(parent, child, &cap["witness"]));
        } else if let Some(cap) = coercion_regex.captures(line) {
            let witness = &cap["witness"];
            if witness.contains(';') {
                log::debug!("skipping composite coercion: {}", line);
                continue;
            }
            triples
                .coercions
                .push(Triple::new(&cap["parent"], &cap["child"], witness));
        }
    }

    if triples.is_empty() {
        return Err(HierarchyError::Parse(
            "no canonical projections or coercions found in prover output".to_string(),
        ));
    }

    log::info!(
        "extracted {} canonical projections and {} coercions",
        triples.canonicals.len(),
        triples.coercions.len()
    );
    Ok(triples)
}
