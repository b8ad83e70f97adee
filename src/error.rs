use crate::graph::VertexId;
use thiserror::Error;

/// Failures reported by a [GraphEngine](crate::engine::GraphEngine).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("cannot allocate {requested} vertices (limit {limit})")]
    VertexCapacity { requested: usize, limit: usize },

    #[error("edge storage exhausted: {live} live + {requested} requested exceeds {capacity}")]
    EdgeCapacity {
        live: usize,
        requested: usize,
        capacity: usize,
    },

    #[error("cannot allocate storage for {requested} edges")]
    EdgeAllocation { requested: usize },

    #[error("vertex {vertex:?} is outside [0, {max_vertex_id:?}]")]
    VertexOutOfRange {
        vertex: VertexId,
        max_vertex_id: VertexId,
    },

    #[error("malformed CSR topology: {0}")]
    MalformedTopology(String),

    #[error("engine requires an initial topology")]
    EmptyInitUnsupported,
}

/// Failures surfaced to the benchmark driver.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("engine initialization failed: {0}")]
    Initialization(#[source] EngineError),

    #[error("batch insertion failed: {0}")]
    Insert(#[source] EngineError),

    #[error("unknown algorithm '{name}'")]
    UnknownAlgorithm { name: String },

    #[error("output buffer holds {actual} entries, expected {expected}")]
    DataLength { expected: usize, actual: usize },

    #[error("source vertex {vertex:?} is outside [0, {max_vertex_id:?}]")]
    SourceOutOfRange {
        vertex: VertexId,
        max_vertex_id: VertexId,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
