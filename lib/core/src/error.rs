use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Edge {edge} references unknown node: {node}")]
    UnknownNode { edge: usize, node: String },

    #[error("Edge {edge} has invalid gain expression '{label}': {reason}")]
    InvalidGain {
        edge: usize,
        label: String,
        reason: String,
    },

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Symbolic evaluation failed: {0}")]
    SymbolicEvaluation(String),
}
