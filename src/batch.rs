use crate::graph::{Timestamp, VertexId};
use ahash::RandomState;
use std::collections::HashSet;

/// A timestamped directed edge, as produced by the benchmark driver.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub src: VertexId,
    pub dst: VertexId,
    pub timestamp: Timestamp,
}

impl Edge {
    pub fn new(src: usize, dst: usize, timestamp: Timestamp) -> Self {
        Self {
            src: VertexId(src),
            dst: VertexId(dst),
            timestamp,
        }
    }
}

/// An ordered, read-only view over edges owned by the driver.
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    edges: &'a [Edge],
}

impl<'a> Batch<'a> {
    pub fn new(edges: &'a [Edge]) -> Self {
        Self { edges }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'a, Edge> {
        self.edges.iter()
    }

    pub fn as_slice(&self) -> &'a [Edge] {
        self.edges
    }

    /// The largest vertex ID touched by this batch, either as source or as sink.
    pub fn max_vertex_id(&self) -> Option<VertexId> {
        self.edges.iter().map(|e| e.src.max(e.dst)).max()
    }

    /// Number of distinct vertices appearing in this batch.
    pub fn num_vertices_affected(&self) -> usize {
        let mut seen: HashSet<VertexId, RandomState> =
            HashSet::with_capacity_and_hasher(self.edges.len() * 2, RandomState::new());
        for e in self.edges {
            seen.insert(e.src);
            seen.insert(e.dst);
        }
        seen.len()
    }

    pub fn oldest_timestamp(&self) -> Option<Timestamp> {
        self.edges.iter().map(|e| e.timestamp).min()
    }

    pub fn newest_timestamp(&self) -> Option<Timestamp> {
        self.edges.iter().map(|e| e.timestamp).max()
    }
}

impl<'a> From<&'a [Edge]> for Batch<'a> {
    fn from(edges: &'a [Edge]) -> Self {
        Self::new(edges)
    }
}

impl<'a> From<&'a Vec<Edge>> for Batch<'a> {
    fn from(edges: &'a Vec<Edge>) -> Self {
        Self::new(edges.as_slice())
    }
}

impl<'a> std::ops::Index<usize> for Batch<'a> {
    type Output = Edge;

    fn index(&self, index: usize) -> &Self::Output {
        &self.edges[index]
    }
}

impl<'a> IntoIterator for Batch<'a> {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
