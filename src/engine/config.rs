use crate::{
    batch::Batch,
    error::EngineError,
    graph::{Timestamp, VertexId},
};
use std::collections::TryReserveError;

/// Largest vertex capacity an engine agrees to allocate.
pub const MAX_VERTICES: usize = i32::MAX as usize;

/// Timestamp carried by placeholder edges.
///
/// Nothing a driver produces is older, so evicting everything older than
/// `PLACEHOLDER_TIMESTAMP + 1` removes exactly the placeholders.
pub const PLACEHOLDER_TIMESTAMP: Timestamp = Timestamp::MIN;

/// An initial topology in compressed sparse row form.
///
/// Out-edges of vertex `v` are `adjacency[offsets[v]..offsets[v + 1]]`,
/// stamped with the matching slice of `timestamps`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrTopology {
    pub offsets: Vec<usize>,
    pub adjacency: Vec<VertexId>,
    pub timestamps: Vec<Timestamp>,
}

pub(crate) fn vertex_capacity(max_nv: usize) -> EngineError {
    EngineError::VertexCapacity {
        requested: max_nv,
        limit: MAX_VERTICES,
    }
}

fn check_vertex_capacity(max_nv: usize) -> Result<(), EngineError> {
    if max_nv == 0 || max_nv > MAX_VERTICES {
        return Err(vertex_capacity(max_nv));
    }
    Ok(())
}

/// Fails instead of aborting when `len` values of `T` do not fit in memory.
pub(crate) fn ensure_room<T>(len: usize) -> Result<(), TryReserveError> {
    let mut room: Vec<T> = Vec::new();
    room.try_reserve_exact(len)
}

/// `len` copies of `value`, allocated fallibly.
pub(crate) fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>, TryReserveError> {
    let mut res = Vec::new();
    res.try_reserve_exact(len)?;
    res.resize(len, value);
    Ok(res)
}

/// How an engine starts its life.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitState {
    Empty,
    Csr(CsrTopology),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of pre-allocated vertices.
    pub max_nv: usize,
    /// Bound on live edges, if the engine has one.
    pub max_ne: Option<usize>,
    pub init: InitState,
}

impl EngineConfig {
    pub fn empty(max_nv: usize) -> Self {
        Self {
            max_nv,
            max_ne: None,
            init: InitState::Empty,
        }
    }

    pub fn with_topology(max_nv: usize, topology: CsrTopology) -> Self {
        Self {
            max_nv,
            max_ne: None,
            init: InitState::Csr(topology),
        }
    }

    pub fn max_ne(mut self, max_ne: Option<usize>) -> Self {
        self.max_ne = max_ne;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        check_vertex_capacity(self.max_nv)?;
        if let InitState::Csr(csr) = &self.init {
            csr.validate(self.max_nv)?;
            if let Some(capacity) = self.max_ne {
                if csr.edge_size() > capacity {
                    return Err(EngineError::EdgeCapacity {
                        live: 0,
                        requested: csr.edge_size(),
                        capacity,
                    });
                }
            }
        }
        Ok(())
    }
}

impl CsrTopology {
    /// A single edge `0 -> 1` (or the self loop `0 -> 0` when only one vertex exists),
    /// stamped with [PLACEHOLDER_TIMESTAMP].
    pub fn placeholder(max_nv: usize) -> Result<Self, EngineError> {
        check_vertex_capacity(max_nv)?;
        let sink = VertexId(1.min(max_nv - 1));
        let mut offsets = try_filled(max_nv + 1, 1).map_err(|_| vertex_capacity(max_nv))?;
        offsets[0] = 0;
        Ok(Self {
            offsets,
            adjacency: vec![sink],
            timestamps: vec![PLACEHOLDER_TIMESTAMP],
        })
    }

    /// Lays out `batch` as CSR, keeping batch order among edges of the same source.
    pub fn from_batch(max_nv: usize, batch: &Batch) -> Result<Self, EngineError> {
        check_vertex_capacity(max_nv)?;
        let max_vertex_id = VertexId(max_nv - 1);
        let mut offsets = try_filled(max_nv + 1, 0usize).map_err(|_| vertex_capacity(max_nv))?;
        for e in batch.iter() {
            for v in [e.src, e.dst] {
                if v.to_raw() >= max_nv {
                    return Err(EngineError::VertexOutOfRange {
                        vertex: v,
                        max_vertex_id,
                    });
                }
            }
            offsets[e.src.to_raw() + 1] += 1;
        }
        for i in 1..offsets.len() {
            offsets[i] += offsets[i - 1];
        }
        let mut cursor = offsets.clone();
        let edge_allocation = |_| EngineError::EdgeAllocation {
            requested: batch.len(),
        };
        let mut adjacency = try_filled(batch.len(), VertexId::MIN).map_err(edge_allocation)?;
        let mut timestamps = try_filled(batch.len(), 0).map_err(edge_allocation)?;
        for e in batch.iter() {
            let slot = &mut cursor[e.src.to_raw()];
            adjacency[*slot] = e.dst;
            timestamps[*slot] = e.timestamp;
            *slot += 1;
        }
        Ok(Self {
            offsets,
            adjacency,
            timestamps,
        })
    }

    pub fn edge_size(&self) -> usize {
        self.adjacency.len()
    }

    pub fn validate(&self, max_nv: usize) -> Result<(), EngineError> {
        if self.offsets.len() != max_nv + 1 {
            return Err(EngineError::MalformedTopology(format!(
                "{} offsets for {} vertices",
                self.offsets.len(),
                max_nv
            )));
        }
        if self.offsets[0] != 0 {
            return Err(EngineError::MalformedTopology(
                "first offset must be 0".to_string(),
            ));
        }
        if self.offsets.windows(2).any(|w| w[0] > w[1]) {
            return Err(EngineError::MalformedTopology(
                "offsets must not decrease".to_string(),
            ));
        }
        if self.offsets[max_nv] != self.adjacency.len()
            || self.adjacency.len() != self.timestamps.len()
        {
            return Err(EngineError::MalformedTopology(format!(
                "last offset {}, {} adjacencies, {} timestamps",
                self.offsets[max_nv],
                self.adjacency.len(),
                self.timestamps.len()
            )));
        }
        if let Some(v) = self.adjacency.iter().find(|v| v.to_raw() >= max_nv) {
            return Err(EngineError::VertexOutOfRange {
                vertex: *v,
                max_vertex_id: VertexId(max_nv - 1),
            });
        }
        Ok(())
    }

    /// Iterates `(source, sink, timestamp)` in CSR order.
    pub fn iter_edges(&self) -> impl Iterator<Item = (VertexId, VertexId, Timestamp)> + '_ {
        self.offsets.windows(2).enumerate().flat_map(move |(v, w)| {
            (w[0]..w[1]).map(move |i| (VertexId(v), self.adjacency[i], self.timestamps[i]))
        })
    }
}
