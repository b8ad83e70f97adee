//! Dynamic graphs for streaming-graph benchmarks.
//!
//! # Adapters and engines
//!
//! A benchmark driver talks to a [DynamicGraph]: it inserts timestamped edges
//! batch by batch, evicts edges that fell out of the time window, queries
//! degrees and reruns graph algorithms.
//!
//! [DynamicGraphAdapter] implements [DynamicGraph] over any [GraphEngine](engine::GraphEngine).
//! Engines own all vertex and edge state over a fixed, pre-allocated vertex set.
//! The adapter owns its engine exclusively and releases it exactly once, on drop.
//!
//! Two engines are provided:
//!
//! - [TreeBackedEngine](engine::TreeBackedEngine) keeps ordered indices and answers
//!   degree queries in $O(1)$.
//! - [PetgraphEngine](engine::PetgraphEngine) sits on petgraph and, like many
//!   device-resident stores, only starts from a non-empty CSR topology.
//!   The adapter bootstraps it with a placeholder edge that never shows up in
//!   any query.
//!
//! # Example
//!
//! ```
//! use dynograph::{engine::TreeBackedEngine, *};
//!
//! let edges = vec![Edge::new(0, 1, 1), Edge::new(1, 2, 2), Edge::new(2, 3, 3)];
//! let mut g = DynamicGraphAdapter::<TreeBackedEngine>::new(&Args::default(), VertexId(3))?;
//! g.insert_batch(&Batch::from(&edges))?;
//! assert_eq!(g.num_edges(), 3);
//! assert_eq!(g.high_degree_vertices(1), vec![VertexId(0)]);
//!
//! g.delete_edges_older_than(2);
//! assert_eq!(g.num_edges(), 2);
//! # Ok::<(), dynograph::Error>(())
//! ```

pub mod algorithm;
pub mod engine;
pub mod graph;

mod adapter;
pub use self::adapter::*;
mod args;
pub use self::args::*;
mod batch;
pub use self::batch::*;
mod dynamic_graph;
pub use self::dynamic_graph::*;
mod error;
pub use self::error::*;

pub use self::graph::{Timestamp, VertexId};
