//! Minimal inheritance diagram in Graphviz DOT syntax.

use std::fmt::Write;

use super::DisplayMode;
use crate::config::DiagramConfig;
use crate::graph::{close, minimalize, Relation};
use crate::hierarchy::EdgeKind;

/// One drawn edge: `source -> target`, not implied by other drawn edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramEdge {
    pub kind: EdgeKind,
    pub source: String,
    pub target: String,
    pub witness: String,
    pub color: Option<String>,
}

/// Edges of `relation` that survive minimalization, or nothing when `mode`
/// is off.
pub fn diagram_edges(relation: &Relation, kind: EdgeKind, mode: &DisplayMode) -> Vec<DiagramEdge> {
    if mode.is_off() {
        log::debug!("{} edges disabled", kind);
        return Vec::new();
    }

    let closure = close(relation);
    let mut edges = Vec::new();

    for source in closure.entities() {
        let Some(targets) = closure.targets(source) else {
            continue;
        };
        for (target, witness) in minimalize(&closure, targets) {
            if target == source {
                continue;
            }
            edges.push(DiagramEdge {
                kind,
                source: source.to_string(),
                target,
                witness,
                color: mode.color().map(str::to_string),
            });
        }
    }

    log::info!(
        "{} diagram: {} of {} edges kept",
        kind,
        edges.len(),
        closure.edge_count()
    );
    edges
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Serialize edges of every kind into one digraph.
pub fn render_dot(edges: &[DiagramEdge], config: &DiagramConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph {} {{", config.graph_name);

    for edge in edges {
        let mut attrs = Vec::new();
        if let Some(color) = &edge.color {
            attrs.push(format!("color=\"{}\"", escape(color)));
        }
        if config.label_witnesses {
            attrs.push(format!("label=\"{}\"", escape(&edge.witness)));
        }

        let _ = write!(
            out,
            "  \"{}\" -> \"{}\"",
            escape(&edge.source),
            escape(&edge.target)
        );
        if !attrs.is_empty() {
            let _ = write!(out, " [{}]", attrs.join(", "));
        }
        out.push_str(";\n");
    }

    out.push_str("}\n");
    out
}
