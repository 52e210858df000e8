pub mod config;
pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod prover;
pub mod render;

pub use config::Config;
pub use error::{HierarchyError, Result};
pub use graph::{close, find_joins, minimalize, Join, Relation, Triple};
pub use hierarchy::{EdgeKind, HierarchyTriples};
