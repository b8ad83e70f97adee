use crate::{engine::GraphEngine, graph::*};
use std::collections::VecDeque;

pub trait ConnectedComponents
where
    Self: GraphEngine,
{
    /// Labels every vertex with the smallest vertex ID of its weakly connected component.
    fn component_labels(&self, labels: &mut [i64]) {
        debug_assert_eq!(labels.len(), self.max_nv());
        labels.fill(-1);
        let mut queue = VecDeque::new();
        for root in VertexId::range(self.max_nv()) {
            if labels[root.to_raw()] != -1 {
                continue;
            }
            let label = root.to_raw() as i64;
            labels[root.to_raw()] = label;
            queue.push_back(root);
            while let Some(v) = queue.pop_front() {
                let neighbors = self
                    .out_edges(&v)
                    .map(|e| e.sink)
                    .chain(self.in_edges(&v).map(|e| e.source));
                for u in neighbors {
                    if labels[u.to_raw()] == -1 {
                        labels[u.to_raw()] = label;
                        queue.push_back(u);
                    }
                }
            }
        }
    }
}

impl<E: GraphEngine> ConnectedComponents for E {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        batch::{Batch, Edge},
        engine::{ColumnarEdges, EngineConfig, Ops, TreeBackedEngine, MAX_NV},
    };
    use quickcheck_macros::quickcheck;

    #[test]
    fn components_ignore_direction() {
        let mut g = TreeBackedEngine::initialize(&EngineConfig::empty(6)).unwrap();
        let edges = [Edge::new(3, 1, 0), Edge::new(4, 3, 0), Edge::new(5, 2, 0)];
        g.bulk_insert(&ColumnarEdges::from_batch(&Batch::new(&edges)))
            .unwrap();
        let mut labels = vec![0; 6];
        g.component_labels(&mut labels);
        assert_eq!(labels, vec![0, 1, 2, 1, 1, 2]);
    }

    #[quickcheck]
    fn endpoints_share_labels(ops: Ops) {
        let g: TreeBackedEngine = ops.replay();
        let mut labels = vec![0; MAX_NV];
        g.component_labels(&mut labels);
        for e in g.iter_edges() {
            assert_eq!(labels[e.source.to_raw()], labels[e.sink.to_raw()]);
        }
        for (v, label) in labels.iter().enumerate() {
            assert!(*label <= v as i64);
            assert_eq!(labels[*label as usize], *label);
        }
    }
}
