use crate::{
    engine::{ColumnarEdges, EngineConfig},
    error::EngineError,
    graph::*,
};
use std::{cmp::Reverse, collections::BinaryHeap};

/// Capabilities of a dynamic graph store over a fixed, pre-allocated vertex set.
///
/// Engines are multigraphs: every inserted edge is kept with its own [EdgeId]
/// and timestamp until it is evicted.
pub trait GraphEngine: Sized {
    /// Whether [GraphEngine::initialize] refuses to start without a non-empty
    /// [CsrTopology](crate::engine::CsrTopology).
    const REQUIRES_INITIAL_TOPOLOGY: bool = false;

    fn initialize(config: &EngineConfig) -> Result<Self, EngineError>;

    /// Inserts all edges or none of them. Returns the number of edge slots allocated.
    fn bulk_insert(&mut self, edges: &ColumnarEdges) -> Result<usize, EngineError>;

    /// Removes every edge stamped strictly before `threshold`. Returns how many were removed.
    fn evict_older_than(&mut self, threshold: Timestamp) -> usize;

    /// Frees all backing storage. No other call may follow.
    fn release(&mut self);

    fn max_nv(&self) -> usize;
    fn edge_size(&self) -> usize;
    fn out_degree(&self, v: &VertexId) -> usize;
    fn iter_edges(&self) -> Box<dyn Iterator<Item = EdgeRecord> + '_>;
    fn out_edges(&self, v: &VertexId) -> Box<dyn Iterator<Item = EdgeRecord> + '_>;
    fn in_edges(&self, v: &VertexId) -> Box<dyn Iterator<Item = EdgeRecord> + '_>;

    /// Up to `n` vertices of positive out-degree, by descending degree and then ascending ID.
    fn high_degree_vertices(&self, n: usize) -> Vec<VertexId> {
        if n == 0 {
            return vec![];
        }
        let mut heap = BinaryHeap::with_capacity(n + 1);
        for v in VertexId::range(self.max_nv()) {
            let degree = self.out_degree(&v);
            if degree == 0 {
                continue;
            }
            heap.push(Reverse((degree, Reverse(v))));
            if heap.len() > n {
                heap.pop();
            }
        }
        heap.into_sorted_vec()
            .into_iter()
            .map(|Reverse((_, Reverse(v)))| v)
            .collect()
    }
}
