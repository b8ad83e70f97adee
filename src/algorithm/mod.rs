//! Graph algorithms run by [update_alg](crate::DynamicGraph::update_alg).
mod bfs;
pub use self::bfs::*;
mod connected_components;
pub use self::connected_components::*;
mod kcore;
pub use self::kcore::*;

use crate::{engine::GraphEngine, graph::VertexId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Algorithm {
    Bfs,
    ConnectedComponents,
    KCore,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Bfs,
        Algorithm::ConnectedComponents,
        Algorithm::KCore,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| alg.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::ConnectedComponents => "cc",
            Algorithm::KCore => "kcore",
        }
    }

    /// Recomputes this algorithm over `engine`. Only [Algorithm::Bfs] reads `sources`.
    pub fn run<E: GraphEngine>(&self, engine: &E, sources: &[VertexId], data: &mut [i64]) {
        match self {
            Algorithm::Bfs => engine.bfs_distances(sources, data),
            Algorithm::ConnectedComponents => engine.component_labels(data),
            Algorithm::KCore => engine.core_numbers(data),
        }
    }
}
