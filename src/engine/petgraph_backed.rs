use crate::{
    engine::{
        ensure_room, vertex_capacity, ColumnarEdges, EngineConfig, GraphEngine, InitState,
    },
    error::EngineError,
    graph::*,
};
use petgraph::{
    graph::{EdgeIndex, NodeIndex},
    stable_graph::StableDiGraph,
    visit::EdgeRef,
    Direction,
};

/// An engine over petgraph's stable adjacency list.
///
/// Like many device-resident stores, it can only be brought up from a
/// non-empty CSR snapshot. Degree queries walk the adjacency list.
#[derive(Clone)]
pub struct PetgraphEngine {
    graph: StableDiGraph<(), Timestamp, usize>,
    max_ne: Option<usize>,
}

impl PetgraphEngine {
    fn node(&self, v: &VertexId) -> Option<NodeIndex<usize>> {
        if v.to_raw() < self.graph.node_count() {
            Some(NodeIndex::new(v.to_raw()))
        } else {
            None
        }
    }

    fn record(&self, e: EdgeIndex<usize>) -> Option<EdgeRecord> {
        let (source, sink) = self.graph.edge_endpoints(e)?;
        let timestamp = *self.graph.edge_weight(e)?;
        Some(EdgeRecord {
            id: EdgeId::new(e.index()),
            source: VertexId::new(source.index()),
            sink: VertexId::new(sink.index()),
            timestamp,
        })
    }

    fn edges_directed(
        &self,
        v: &VertexId,
        dir: Direction,
    ) -> Box<dyn Iterator<Item = EdgeRecord> + '_> {
        match self.node(v) {
            None => Box::new(std::iter::empty()),
            Some(n) => {
                let it = self
                    .graph
                    .edges_directed(n, dir)
                    .filter_map(|e| self.record(e.id()));
                Box::new(it)
            }
        }
    }
}

impl GraphEngine for PetgraphEngine {
    const REQUIRES_INITIAL_TOPOLOGY: bool = true;

    fn initialize(config: &EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let csr = match &config.init {
            InitState::Csr(csr) if csr.edge_size() > 0 => csr,
            _ => return Err(EngineError::EmptyInitUnsupported),
        };
        // petgraph aborts when an allocation fails. Check its tables fit first.
        ensure_room::<(Option<()>, [EdgeIndex<usize>; 2])>(config.max_nv)
            .map_err(|_| vertex_capacity(config.max_nv))?;
        ensure_room::<(Option<Timestamp>, [NodeIndex<usize>; 2], [EdgeIndex<usize>; 2])>(
            csr.edge_size(),
        )
        .map_err(|_| EngineError::EdgeAllocation {
            requested: csr.edge_size(),
        })?;
        let mut graph = StableDiGraph::with_capacity(config.max_nv, csr.edge_size());
        for _ in 0..config.max_nv {
            graph.add_node(());
        }
        for (src, snk, ts) in csr.iter_edges() {
            graph.add_edge(NodeIndex::new(src.to_raw()), NodeIndex::new(snk.to_raw()), ts);
        }
        Ok(Self {
            graph,
            max_ne: config.max_ne,
        })
    }

    fn bulk_insert(&mut self, edges: &ColumnarEdges) -> Result<usize, EngineError> {
        edges.check_range(self.graph.node_count())?;
        if let Some(capacity) = self.max_ne {
            let live = self.graph.edge_count();
            if live + edges.len() > capacity {
                return Err(EngineError::EdgeCapacity {
                    live,
                    requested: edges.len(),
                    capacity,
                });
            }
        }
        for (src, snk, ts) in edges.iter() {
            self.graph
                .add_edge(NodeIndex::new(src.to_raw()), NodeIndex::new(snk.to_raw()), ts);
        }
        Ok(edges.len())
    }

    fn evict_older_than(&mut self, threshold: Timestamp) -> usize {
        let stale: Vec<_> = self
            .graph
            .edge_indices()
            .filter(|e| matches!(self.graph.edge_weight(*e), Some(ts) if *ts < threshold))
            .collect();
        for e in stale.iter() {
            self.graph.remove_edge(*e);
        }
        stale.len()
    }

    fn release(&mut self) {
        self.graph = StableDiGraph::default();
    }

    fn max_nv(&self) -> usize {
        self.graph.node_count()
    }

    fn edge_size(&self) -> usize {
        self.graph.edge_count()
    }

    fn out_degree(&self, v: &VertexId) -> usize {
        match self.node(v) {
            None => 0,
            Some(n) => self.graph.edges_directed(n, Direction::Outgoing).count(),
        }
    }

    fn iter_edges(&self) -> Box<dyn Iterator<Item = EdgeRecord> + '_> {
        Box::new(self.graph.edge_indices().filter_map(|e| self.record(e)))
    }

    fn out_edges(&self, v: &VertexId) -> Box<dyn Iterator<Item = EdgeRecord> + '_> {
        self.edges_directed(v, Direction::Outgoing)
    }

    fn in_edges(&self, v: &VertexId) -> Box<dyn Iterator<Item = EdgeRecord> + '_> {
        self.edges_directed(v, Direction::Incoming)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        batch::{Batch, Edge},
        engine::{CsrTopology, MAX_VERTICES},
    };

    #[test]
    fn refuses_empty_init() {
        let res = PetgraphEngine::initialize(&EngineConfig::empty(3));
        assert!(matches!(res, Err(EngineError::EmptyInitUnsupported)));
        let csr = CsrTopology::from_batch(3, &Batch::new(&[])).unwrap();
        let res = PetgraphEngine::initialize(&EngineConfig::with_topology(3, csr));
        assert!(matches!(res, Err(EngineError::EmptyInitUnsupported)));
    }

    #[test]
    fn refuses_oversized_vertex_sets() {
        let config = EngineConfig {
            max_nv: MAX_VERTICES + 1,
            max_ne: None,
            init: InitState::Csr(CsrTopology::placeholder(1).unwrap()),
        };
        assert_eq!(
            PetgraphEngine::initialize(&config).err(),
            Some(vertex_capacity(MAX_VERTICES + 1))
        );
    }

    #[test]
    fn in_and_out_edges_report_true_endpoints() {
        let seed = [Edge::new(0, 2, 1), Edge::new(1, 2, 2), Edge::new(2, 0, 3)];
        let csr = CsrTopology::from_batch(3, &Batch::new(&seed)).unwrap();
        let g = PetgraphEngine::initialize(&EngineConfig::with_topology(3, csr)).unwrap();
        let mut ins: Vec<_> = g
            .in_edges(&VertexId(2))
            .map(|e| (e.source, e.sink, e.timestamp))
            .collect();
        ins.sort();
        assert_eq!(
            ins,
            vec![(VertexId(0), VertexId(2), 1), (VertexId(1), VertexId(2), 2)]
        );
        let outs: Vec<_> = g
            .out_edges(&VertexId(2))
            .map(|e| (e.source, e.sink))
            .collect();
        assert_eq!(outs, vec![(VertexId(2), VertexId(0))]);
        assert_eq!(g.out_degree(&VertexId(2)), 1);
        assert_eq!(g.out_degree(&VertexId(3)), 0);
    }
}
