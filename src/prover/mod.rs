//! Prover adapter: query script, process lifecycle and output extraction.
//!
//! Runs the prover on a generated script that prints canonical projections
//! and the coercion graph, then turns its output into triples.

mod extraction;
mod session;

pub use extraction::extract_hierarchy;
pub use session::{query_script, ProverSession};

use crate::config::ProverConfig;
use crate::error::Result;
use crate::hierarchy::HierarchyTriples;

/// Physical directory bound to a logical library prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPath {
    /// `-R dir name`: recursive, names importable unqualified
    Recursive { dir: String, name: String },
    /// `-Q dir name`: names must be qualified
    Qualified { dir: String, name: String },
}

impl LoadPath {
    /// Command-line arguments passed to the prover for this mapping.
    pub fn to_args(&self) -> [&str; 3] {
        match self {
            LoadPath::Recursive { dir, name } => ["-R", dir.as_str(), name.as_str()],
            LoadPath::Qualified { dir, name } => ["-Q", dir.as_str(), name.as_str()],
        }
    }
}

/// Run the prover on `libs` and extract the triples of both edge kinds.
pub async fn load_hierarchy(
    config: &ProverConfig,
    libs: &[String],
    load_paths: &[LoadPath],
) -> Result<HierarchyTriples> {
    let session = ProverSession::create(libs)?;
    let output = session.run(config, load_paths).await?;
    extract_hierarchy(&output)
}
