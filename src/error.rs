use thiserror::Error;

/// Main error type for hierarchy-graph
#[derive(Error, Debug)]
pub enum HierarchyError {
    /// More than one minimal common successor for a pair of entities.
    /// The hierarchy itself is inconsistent; generation must stop.
    #[error("Ambiguous join for {left} and {right}: candidates {}", .candidates.join(", "))]
    AmbiguousJoin {
        left: String,
        right: String,
        candidates: Vec<String>,
    },

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Triple files that are not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Prover output that could not be turned into triples
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The prover process could not be started
    #[error("Failed to launch prover `{program}`: {source}")]
    ProverLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The prover exited unsuccessfully
    #[error("Prover exited with {status}: {stderr}")]
    ProverExit { status: String, stderr: String },

    /// The prover did not finish in time
    #[error("Prover timed out after {0}s")]
    ProverTimeout(u64),
}

/// Convenient Result type using HierarchyError
pub type Result<T> = std::result::Result<T, HierarchyError>;
