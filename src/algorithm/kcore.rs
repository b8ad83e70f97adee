use crate::{engine::GraphEngine, graph::*};
use ahash::RandomState;
use keyed_priority_queue::{Entry, KeyedPriorityQueue};
use std::{cmp::Reverse, collections::HashSet};

pub trait CoreDecomposition
where
    Self: GraphEngine,
{
    /// Writes the core number of every vertex in the underlying undirected simple graph.
    ///
    /// Self loops and parallel edges do not count.
    fn core_numbers(&self, cores: &mut [i64]) {
        debug_assert_eq!(cores.len(), self.max_nv());
        let neighbors = undirected_neighbors(self);
        let mut degree_queue: KeyedPriorityQueue<VertexId, Reverse<usize>, RandomState> =
            KeyedPriorityQueue::with_capacity_and_hasher(self.max_nv(), RandomState::new());
        for v in VertexId::range(self.max_nv()) {
            degree_queue.push(v, Reverse(neighbors[v.to_raw()].len()));
        }
        let mut k = 0;
        while let Some((v, Reverse(degree))) = degree_queue.pop() {
            k = k.max(degree);
            cores[v.to_raw()] = k as i64;
            for u in neighbors[v.to_raw()].iter() {
                if let Entry::Occupied(slot) = degree_queue.entry(*u) {
                    let Reverse(d) = *slot.get_priority();
                    slot.set_priority(Reverse(d.saturating_sub(1)));
                }
            }
        }
    }
}

impl<E: GraphEngine> CoreDecomposition for E {}

fn undirected_neighbors<E: GraphEngine>(g: &E) -> Vec<HashSet<VertexId, RandomState>> {
    let mut res: Vec<_> = (0..g.max_nv())
        .map(|_| HashSet::with_hasher(RandomState::new()))
        .collect();
    for e in g.iter_edges() {
        if e.source != e.sink {
            res[e.source.to_raw()].insert(e.sink);
            res[e.sink.to_raw()].insert(e.source);
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        batch::{Batch, Edge},
        engine::{ColumnarEdges, EngineConfig, Ops, TreeBackedEngine, MAX_NV},
    };
    use quickcheck_macros::quickcheck;

    #[test]
    fn triangle_with_a_tail() {
        let mut g = TreeBackedEngine::initialize(&EngineConfig::empty(6)).unwrap();
        let edges = [
            Edge::new(0, 1, 0),
            Edge::new(1, 2, 0),
            Edge::new(2, 0, 0),
            Edge::new(0, 2, 0),
            Edge::new(2, 3, 0),
            Edge::new(4, 4, 0),
        ];
        g.bulk_insert(&ColumnarEdges::from_batch(&Batch::new(&edges)))
            .unwrap();
        let mut cores = vec![0; 6];
        g.core_numbers(&mut cores);
        assert_eq!(cores, vec![2, 2, 2, 1, 0, 0]);
    }

    #[quickcheck]
    fn core_is_backed_by_enough_neighbors(ops: Ops) {
        let g: TreeBackedEngine = ops.replay();
        let neighbors = undirected_neighbors(&g);
        let mut cores = vec![0; MAX_NV];
        g.core_numbers(&mut cores);
        for v in 0..MAX_NV {
            let k = cores[v];
            assert!(k as usize <= neighbors[v].len());
            let backing = neighbors[v]
                .iter()
                .filter(|u| cores[u.to_raw()] >= k)
                .count();
            assert!(backing as i64 >= k);
        }
    }
}
