use crate::{engine::GraphEngine, graph::*};
use std::collections::VecDeque;

/// Marks vertices that no source reaches.
pub const UNREACHED: i64 = -1;

pub trait BreadthFirstSearch
where
    Self: GraphEngine,
{
    /// Writes the hop distance from the nearest of `sources` along out-edges,
    /// or [UNREACHED].
    ///
    /// `distances` must hold one slot per vertex and every source must be in range.
    fn bfs_distances(&self, sources: &[VertexId], distances: &mut [i64]) {
        debug_assert_eq!(distances.len(), self.max_nv());
        distances.fill(UNREACHED);
        let mut queue = VecDeque::with_capacity(sources.len());
        for s in sources {
            if distances[s.to_raw()] != 0 {
                distances[s.to_raw()] = 0;
                queue.push_back(*s);
            }
        }
        while let Some(v) = queue.pop_front() {
            let next = distances[v.to_raw()] + 1;
            for e in self.out_edges(&v) {
                let slot = &mut distances[e.sink.to_raw()];
                if *slot == UNREACHED {
                    *slot = next;
                    queue.push_back(e.sink);
                }
            }
        }
    }
}

impl<E: GraphEngine> BreadthFirstSearch for E {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        batch::{Batch, Edge},
        engine::{ColumnarEdges, EngineConfig, Ops, TreeBackedEngine, MAX_NV},
    };
    use quickcheck_macros::quickcheck;

    #[test]
    fn distances_follow_edge_direction() {
        let mut g = TreeBackedEngine::initialize(&EngineConfig::empty(5)).unwrap();
        let edges = [
            Edge::new(0, 1, 0),
            Edge::new(1, 2, 0),
            Edge::new(0, 2, 0),
            Edge::new(3, 0, 0),
        ];
        g.bulk_insert(&ColumnarEdges::from_batch(&Batch::new(&edges)))
            .unwrap();
        let mut dist = vec![42; 5];
        g.bfs_distances(&[VertexId(0)], &mut dist);
        assert_eq!(dist, vec![0, 1, 1, UNREACHED, UNREACHED]);

        g.bfs_distances(&[VertexId(3), VertexId(1)], &mut dist);
        assert_eq!(dist, vec![1, 0, 1, 0, UNREACHED]);

        g.bfs_distances(&[], &mut dist);
        assert_eq!(dist, vec![UNREACHED; 5]);
    }

    #[quickcheck]
    fn every_reached_vertex_has_a_closer_predecessor(ops: Ops) {
        let g: TreeBackedEngine = ops.replay();
        let mut dist = vec![0; MAX_NV];
        g.bfs_distances(&[VertexId(0)], &mut dist);
        assert_eq!(dist[0], 0);
        for v in VertexId::range(MAX_NV) {
            let d = dist[v.to_raw()];
            if d > 0 {
                assert!(g.in_edges(&v).any(|e| dist[e.source.to_raw()] == d - 1));
            }
            if d != UNREACHED {
                for e in g.out_edges(&v) {
                    let s = dist[e.sink.to_raw()];
                    assert!(s != UNREACHED && s <= d + 1);
                }
            }
        }
    }
}
