//! bmssp-core — the bounded multi-source shortest path primitives from
//! "Breaking the Sorting Barrier for Directed Single-Source Shortest Paths".
//!
//! This crate implements exactly the three subsystems an outer BMSSP
//! recursion composes: [`algorithm::base_case`], [`algorithm::find_pivots`],
//! and the [`data_structures::BlockStructure`] from Lemma 3.3. It does not
//! implement the recursive driver, graph ingestion, or parallel execution;
//! callers own the distance map `bd` and predecessor map `pred` and drive
//! the recursion themselves.

pub mod algorithm;
pub mod data_structures;
pub mod graph;

pub use algorithm::{base_case, find_pivots, BaseCaseResult, FindPivotsResult};
pub use data_structures::BlockStructure;
pub use graph::{DirectedGraph, Graph};

/// Error types for the library.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid vertex id: {0}")]
    InvalidVertex(usize),

    #[error("invalid edge: from {0} to {1}")]
    InvalidEdge(usize, usize),

    #[error("negative edge weight: {0}")]
    NegativeWeight(f64),
}

/// Result type for the library.
pub type Result<T> = std::result::Result<T, Error>;
