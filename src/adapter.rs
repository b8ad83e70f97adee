use crate::{
    algorithm::Algorithm,
    args::Args,
    batch::Batch,
    dynamic_graph::DynamicGraph,
    engine::*,
    error::{EngineError, Error, Result},
    graph::{Timestamp, VertexId},
};
use std::collections::BTreeSet;
use tracing::{debug, instrument, trace, warn};

/// Binds [DynamicGraph] to a [GraphEngine] it owns exclusively.
///
/// The engine is initialized on construction and released exactly once on drop.
pub struct DynamicGraphAdapter<E: GraphEngine> {
    args: Args,
    max_vertex_id: VertexId,
    engine: E,
}

impl<E: GraphEngine> DynamicGraphAdapter<E> {
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn max_vertex_id(&self) -> VertexId {
        self.max_vertex_id
    }

    fn check_args(args: &Args) -> Result<()> {
        args.validate()?;
        match args
            .alg_names
            .iter()
            .find(|name| Algorithm::from_name(name).is_none())
        {
            Some(name) => Err(Error::UnknownAlgorithm { name: name.clone() }),
            None => Ok(()),
        }
    }

    fn capacity(max_vertex_id: VertexId) -> Result<usize> {
        max_vertex_id
            .to_raw()
            .checked_add(1)
            .ok_or(Error::Initialization(EngineError::VertexCapacity {
                requested: usize::MAX,
                limit: MAX_VERTICES,
            }))
    }

    fn open(args: &Args, max_vertex_id: VertexId, init: InitState) -> Result<Self> {
        let config = EngineConfig {
            max_nv: Self::capacity(max_vertex_id)?,
            max_ne: args.max_edges,
            init,
        };
        let engine = E::initialize(&config).map_err(Error::Initialization)?;
        debug!(
            max_nv = config.max_nv,
            live_edges = engine.edge_size(),
            "engine initialized"
        );
        Ok(Self {
            args: args.clone(),
            max_vertex_id,
            engine,
        })
    }

    fn open_with_placeholder(args: &Args, max_vertex_id: VertexId) -> Result<Self> {
        let placeholder = CsrTopology::placeholder(Self::capacity(max_vertex_id)?)
            .map_err(Error::Initialization)?;
        let mut res = Self::open(args, max_vertex_id, InitState::Csr(placeholder))?;
        let purged = res.engine.evict_older_than(PLACEHOLDER_TIMESTAMP + 1);
        debug!(purged, "placeholder topology purged");
        Ok(res)
    }
}

/// Running out of room while laying out a seed batch fails initialization.
/// A batch the graph cannot hold fails as an insert.
fn seeding_error(e: EngineError) -> Error {
    match e {
        EngineError::VertexCapacity { .. } | EngineError::EdgeAllocation { .. } => {
            Error::Initialization(e)
        }
        _ => Error::Insert(e),
    }
}

impl<E: GraphEngine> DynamicGraph for DynamicGraphAdapter<E> {
    fn new(args: &Args, max_vertex_id: VertexId) -> Result<Self> {
        Self::check_args(args)?;
        if E::REQUIRES_INITIAL_TOPOLOGY {
            Self::open_with_placeholder(args, max_vertex_id)
        } else {
            Self::open(args, max_vertex_id, InitState::Empty)
        }
    }

    fn with_batch(args: &Args, max_vertex_id: VertexId, batch: &Batch) -> Result<Self> {
        Self::check_args(args)?;
        if !E::REQUIRES_INITIAL_TOPOLOGY {
            let mut res = Self::open(args, max_vertex_id, InitState::Empty)?;
            res.insert_batch(batch)?;
            return Ok(res);
        }
        if batch.is_empty() {
            return Self::open_with_placeholder(args, max_vertex_id);
        }
        if let Some(capacity) = args.max_edges {
            if batch.len() > capacity {
                return Err(Error::Insert(EngineError::EdgeCapacity {
                    live: 0,
                    requested: batch.len(),
                    capacity,
                }));
            }
        }
        let topology = CsrTopology::from_batch(Self::capacity(max_vertex_id)?, batch)
            .map_err(seeding_error)?;
        Self::open(args, max_vertex_id, InitState::Csr(topology))
    }

    fn supported_algs() -> BTreeSet<&'static str> {
        Algorithm::ALL.iter().map(|alg| alg.name()).collect()
    }

    fn args(&self) -> &Args {
        &self.args
    }

    fn before_batch(&mut self, batch: &Batch, threshold: Timestamp) {
        trace!(batch_size = batch.len(), threshold, "before batch");
    }

    #[instrument(skip(self, batch), fields(batch_size = batch.len()), level = "debug")]
    fn insert_batch(&mut self, batch: &Batch) -> Result<()> {
        let edges = ColumnarEdges::from_batch(batch);
        match self.engine.bulk_insert(&edges) {
            Ok(allocs) => {
                trace!(allocs, live_edges = self.engine.edge_size(), "batch inserted");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "batch insertion failed");
                Err(Error::Insert(e))
            }
        }
    }

    #[instrument(skip(self), level = "debug")]
    fn delete_edges_older_than(&mut self, threshold: Timestamp) {
        let evicted = self.engine.evict_older_than(threshold);
        trace!(evicted, live_edges = self.engine.edge_size(), "edges evicted");
    }

    #[instrument(skip(self, sources, data), fields(sources = sources.len()), level = "debug")]
    fn update_alg(&mut self, name: &str, sources: &[VertexId], data: &mut [i64]) -> Result<()> {
        let alg = Algorithm::from_name(name).ok_or_else(|| Error::UnknownAlgorithm {
            name: name.to_string(),
        })?;
        if data.len() != self.num_vertices() {
            return Err(Error::DataLength {
                expected: self.num_vertices(),
                actual: data.len(),
            });
        }
        if let Some(vertex) = sources.iter().find(|v| **v > self.max_vertex_id) {
            return Err(Error::SourceOutOfRange {
                vertex: *vertex,
                max_vertex_id: self.max_vertex_id,
            });
        }
        alg.run(&self.engine, sources, data);
        Ok(())
    }

    fn out_degree(&self, vertex_id: VertexId) -> usize {
        self.engine.out_degree(&vertex_id)
    }

    fn num_vertices(&self) -> usize {
        self.engine.max_nv()
    }

    fn num_edges(&self) -> usize {
        self.engine.edge_size()
    }

    fn high_degree_vertices(&self, n: usize) -> Vec<VertexId> {
        self.engine.high_degree_vertices(n)
    }
}

impl<E: GraphEngine> Drop for DynamicGraphAdapter<E> {
    fn drop(&mut self) {
        self.engine.release();
        debug!("engine released");
    }
}
