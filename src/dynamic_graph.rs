use crate::{
    args::Args,
    batch::Batch,
    error::Result,
    graph::{Timestamp, VertexId},
};
use std::collections::BTreeSet;

/// The capability interface a benchmark driver runs against.
///
/// A driver constructs a graph once, then repeatedly calls
/// [before_batch](DynamicGraph::before_batch), [insert_batch](DynamicGraph::insert_batch),
/// optionally [delete_edges_older_than](DynamicGraph::delete_edges_older_than),
/// and finally queries and algorithm updates.
pub trait DynamicGraph: Sized {
    /// Builds an empty graph holding vertices `0..=max_vertex_id`.
    fn new(args: &Args, max_vertex_id: VertexId) -> Result<Self>;

    /// Builds a graph holding vertices `0..=max_vertex_id`, populated by `batch`.
    fn with_batch(args: &Args, max_vertex_id: VertexId, batch: &Batch) -> Result<Self>;

    /// Names accepted by [update_alg](DynamicGraph::update_alg).
    fn supported_algs() -> BTreeSet<&'static str>;

    fn args(&self) -> &Args;

    /// Called before `batch` is inserted. Edges older than `threshold` may be evicted later.
    fn before_batch(&mut self, batch: &Batch, threshold: Timestamp);

    fn insert_batch(&mut self, batch: &Batch) -> Result<()>;

    /// Removes every edge stamped strictly before `threshold`.
    fn delete_edges_older_than(&mut self, threshold: Timestamp);

    /// Runs algorithm `name` seeded from `sources`, writing one value per vertex into `data`.
    ///
    /// On error `data` is left untouched.
    fn update_alg(&mut self, name: &str, sources: &[VertexId], data: &mut [i64]) -> Result<()>;

    fn out_degree(&self, vertex_id: VertexId) -> usize;

    /// Vertex capacity, regardless of how many vertices have edges.
    fn num_vertices(&self) -> usize;

    /// Number of live edges.
    fn num_edges(&self) -> usize;

    /// At most `n` vertices of positive out-degree, by descending degree and then ascending ID.
    fn high_degree_vertices(&self, n: usize) -> Vec<VertexId>;
}
