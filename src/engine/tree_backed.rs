use crate::{
    engine::{try_filled, vertex_capacity, ColumnarEdges, EngineConfig, GraphEngine, InitState},
    error::EngineError,
    graph::*,
};
use ahash::RandomState;
use std::{
    cmp::Reverse,
    collections::{BTreeSet, HashMap},
};

/// A graph engine with balanced computational complexity.
///
/// |                        | Complexity                                                  |
/// | ---------------------- | ----------------------------------------------------------- |
/// | `bulk_insert`          | $O(k (\log \|V\| + \log \|E\|))$ for a batch of $k$ edges    |
/// | `evict_older_than`     | $O(k (\log \|V\| + \log \|E\|))$ for $k$ evicted edges       |
/// | `out_degree`           | $O(1)$                                                      |
/// | `edge_size`            | $O(1)$                                                      |
/// | `high_degree_vertices` | $O(n + \log \|V\|)$                                         |
/// | `in_edges`             | returns in $O(\log \|E\|)$. amortized $O(1)$ on each call to `.next`. |
/// | `out_edges`            | returns in $O(\log \|E\|)$. amortized $O(1)$ on each call to `.next`. |
#[derive(Clone)]
pub struct TreeBackedEngine {
    max_nv: usize,
    max_ne: Option<usize>,
    eid_factory: EdgeIdFactory,
    edges: HashMap<EdgeId, (VertexId, VertexId, Timestamp), RandomState>,
    in_edges: BTreeSet<(VertexId, VertexId, EdgeId)>,
    out_edges: BTreeSet<(VertexId, VertexId, EdgeId)>,
    by_time: BTreeSet<(Timestamp, EdgeId)>,
    out_degrees: Vec<usize>,
    // Only vertices of positive out-degree are ranked.
    degree_rank: BTreeSet<(Reverse<usize>, VertexId)>,
}

impl std::fmt::Debug for TreeBackedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "TreeBackedEngine {{")?;
        for v in VertexId::range(self.max_nv) {
            if self.out_degrees[v.to_raw()] == 0 {
                continue;
            }
            writeln!(f, "{:?}:", v)?;
            for e in self.out_edges(&v) {
                writeln!(f, "  -> {:?} by {:?} at {}", e.sink, e.id, e.timestamp)?;
            }
        }
        writeln!(f, "}}")?;
        Ok(())
    }
}

impl TreeBackedEngine {
    fn add_edge(&mut self, source: VertexId, sink: VertexId, timestamp: Timestamp) -> EdgeId {
        let eid = self.eid_factory.one_more();
        self.edges.insert(eid, (source, sink, timestamp));
        self.in_edges.insert((sink, source, eid));
        self.out_edges.insert((source, sink, eid));
        self.by_time.insert((timestamp, eid));
        self.shift_degree(source, |d| d + 1);
        eid
    }

    fn remove_edge(&mut self, edge: &EdgeId) -> Option<EdgeRecord> {
        let (src, snk, ts) = self.edges.remove(edge)?;
        self.in_edges.remove(&(snk, src, *edge));
        self.out_edges.remove(&(src, snk, *edge));
        self.by_time.remove(&(ts, *edge));
        self.shift_degree(src, |d| d - 1);
        Some(EdgeRecord {
            id: *edge,
            source: src,
            sink: snk,
            timestamp: ts,
        })
    }

    fn shift_degree(&mut self, v: VertexId, f: impl FnOnce(usize) -> usize) {
        let slot = &mut self.out_degrees[v.to_raw()];
        let old = *slot;
        let new = f(old);
        *slot = new;
        if old > 0 {
            self.degree_rank.remove(&(Reverse(old), v));
        }
        if new > 0 {
            self.degree_rank.insert((Reverse(new), v));
        }
    }

    fn record(&self, id: EdgeId) -> EdgeRecord {
        let (source, sink, timestamp) = self.edges[&id];
        EdgeRecord {
            id,
            source,
            sink,
            timestamp,
        }
    }
}

impl GraphEngine for TreeBackedEngine {
    fn initialize(config: &EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let out_degrees =
            try_filled(config.max_nv, 0).map_err(|_| vertex_capacity(config.max_nv))?;
        let mut res = Self {
            max_nv: config.max_nv,
            max_ne: config.max_ne,
            eid_factory: EdgeIdFactory::new(),
            edges: HashMap::with_hasher(RandomState::new()),
            in_edges: BTreeSet::new(),
            out_edges: BTreeSet::new(),
            by_time: BTreeSet::new(),
            out_degrees,
            degree_rank: BTreeSet::new(),
        };
        if let InitState::Csr(csr) = &config.init {
            for (src, snk, ts) in csr.iter_edges() {
                res.add_edge(src, snk, ts);
            }
        }
        Ok(res)
    }

    fn bulk_insert(&mut self, edges: &ColumnarEdges) -> Result<usize, EngineError> {
        edges.check_range(self.max_nv)?;
        if let Some(capacity) = self.max_ne {
            if self.edges.len() + edges.len() > capacity {
                return Err(EngineError::EdgeCapacity {
                    live: self.edges.len(),
                    requested: edges.len(),
                    capacity,
                });
            }
        }
        self.edges.reserve(edges.len());
        for (src, snk, ts) in edges.iter() {
            self.add_edge(src, snk, ts);
        }
        Ok(edges.len())
    }

    fn evict_older_than(&mut self, threshold: Timestamp) -> usize {
        let stale: Vec<EdgeId> = self
            .by_time
            .range(..(threshold, EdgeId::MIN))
            .map(|(_, e)| *e)
            .collect();
        for e in stale.iter() {
            self.remove_edge(e);
        }
        stale.len()
    }

    fn release(&mut self) {
        self.edges = HashMap::with_hasher(RandomState::new());
        self.in_edges = BTreeSet::new();
        self.out_edges = BTreeSet::new();
        self.by_time = BTreeSet::new();
        self.out_degrees = Vec::new();
        self.degree_rank = BTreeSet::new();
        self.max_nv = 0;
    }

    fn max_nv(&self) -> usize {
        self.max_nv
    }

    fn edge_size(&self) -> usize {
        self.edges.len()
    }

    fn out_degree(&self, v: &VertexId) -> usize {
        self.out_degrees.get(v.to_raw()).copied().unwrap_or(0)
    }

    fn iter_edges(&self) -> Box<dyn Iterator<Item = EdgeRecord> + '_> {
        Box::new(self.edges.iter().map(|(e, (src, snk, ts))| EdgeRecord {
            id: *e,
            source: *src,
            sink: *snk,
            timestamp: *ts,
        }))
    }

    fn out_edges(&self, v: &VertexId) -> Box<dyn Iterator<Item = EdgeRecord> + '_> {
        if v.to_raw() >= self.max_nv {
            return Box::new(std::iter::empty());
        }
        let start = (*v, VertexId::MIN, EdgeId::MIN);
        let end = (v.next(), VertexId::MIN, EdgeId::MIN);
        let it = self
            .out_edges
            .range(start..end)
            .map(|(_, _, e)| self.record(*e));
        Box::new(it)
    }

    fn in_edges(&self, v: &VertexId) -> Box<dyn Iterator<Item = EdgeRecord> + '_> {
        if v.to_raw() >= self.max_nv {
            return Box::new(std::iter::empty());
        }
        let start = (*v, VertexId::MIN, EdgeId::MIN);
        let end = (v.next(), VertexId::MIN, EdgeId::MIN);
        let it = self
            .in_edges
            .range(start..end)
            .map(|(_, _, e)| self.record(*e));
        Box::new(it)
    }

    fn high_degree_vertices(&self, n: usize) -> Vec<VertexId> {
        self.degree_rank.iter().take(n).map(|(_, v)| *v).collect()
    }
}
