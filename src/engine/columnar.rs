use crate::{
    batch::Batch,
    error::EngineError,
    graph::{Timestamp, VertexId},
};
use rayon::prelude::*;

/// A batch laid out as separate source, sink and timestamp arrays.
///
/// Index `i` of every array describes edge `i` of the originating batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnarEdges {
    pub src: Vec<VertexId>,
    pub dst: Vec<VertexId>,
    pub timestamp: Vec<Timestamp>,
}

impl ColumnarEdges {
    /// Splits `batch` into columns. Each index is written by exactly one worker.
    pub fn from_batch(batch: &Batch) -> Self {
        let n = batch.len();
        let mut res = Self {
            src: vec![VertexId::MIN; n],
            dst: vec![VertexId::MIN; n],
            timestamp: vec![0; n],
        };
        res.src
            .par_iter_mut()
            .zip(res.dst.par_iter_mut())
            .zip(res.timestamp.par_iter_mut())
            .zip(batch.as_slice().par_iter())
            .for_each(|(((src, dst), ts), e)| {
                *src = e.src;
                *dst = e.dst;
                *ts = e.timestamp;
            });
        res
    }

    pub fn len(&self) -> usize {
        self.src.len()
    }

    pub fn is_empty(&self) -> bool {
        self.src.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, VertexId, Timestamp)> + '_ {
        self.src
            .iter()
            .zip(self.dst.iter())
            .zip(self.timestamp.iter())
            .map(|((s, d), t)| (*s, *d, *t))
    }

    /// Fails on the first endpoint outside a graph of `max_nv` vertices.
    pub fn check_range(&self, max_nv: usize) -> Result<(), EngineError> {
        let out_of_range = self
            .src
            .iter()
            .zip(self.dst.iter())
            .flat_map(|(s, d)| [*s, *d])
            .find(|v| v.to_raw() >= max_nv);
        match out_of_range {
            None => Ok(()),
            Some(vertex) => Err(EngineError::VertexOutOfRange {
                vertex,
                max_vertex_id: VertexId(max_nv.saturating_sub(1)),
            }),
        }
    }
}
