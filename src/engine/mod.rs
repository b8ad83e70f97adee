//! Graph engines: the stores a [DynamicGraphAdapter](crate::DynamicGraphAdapter) forwards to.
//!
//! An engine owns all vertex and edge state. Callers talk to it only through
//! [GraphEngine], handing batches over as [ColumnarEdges].

mod config;
pub use self::config::*;
mod columnar;
pub use self::columnar::*;
mod r#trait;
pub use self::r#trait::*;
mod tree_backed;
pub use self::tree_backed::*;
mod petgraph_backed;
pub use self::petgraph_backed::*;

#[cfg(test)]
pub(crate) use self::tests::*;

#[cfg(test)]
mod tests {
    use crate::{batch::*, engine::*, graph::*};
    use quickcheck::Arbitrary;
    use rs_quickcheck_util::*;
    use std::cmp::Reverse;

    pub(crate) const MAX_NV: usize = 8;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Op {
        Insert(Vec<Edge>),
        Evict(Timestamp),
    }

    /// A non-empty seed topology followed by inserts and evictions.
    #[derive(Clone)]
    pub(crate) struct Ops {
        pub(crate) seed: Vec<Edge>,
        pub(crate) ops: Vec<Op>,
    }

    impl std::fmt::Debug for Ops {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?} then {:?}", self.seed, self.ops)
        }
    }

    pub(crate) fn arbitrary_edge(g: &mut quickcheck::Gen) -> Edge {
        Edge::new(
            usize::arbitrary(g) % MAX_NV,
            usize::arbitrary(g) % MAX_NV,
            (u8::arbitrary(g) % 32) as Timestamp,
        )
    }

    fn arbitrary_edges(g: &mut quickcheck::Gen) -> Vec<Edge> {
        gen_bytes(g, b"abc.", b'.', 0..)
            .iter()
            .map(|_| arbitrary_edge(g))
            .collect()
    }

    impl Ops {
        pub(crate) fn iter(&self) -> impl Iterator<Item = &Op> + '_ {
            self.ops.iter()
        }

        /// Builds an engine from `seed` and applies every op to it.
        pub(crate) fn replay<E: GraphEngine>(&self) -> E {
            let csr = CsrTopology::from_batch(MAX_NV, &Batch::from(&self.seed)).unwrap();
            let mut engine = E::initialize(&EngineConfig::with_topology(MAX_NV, csr)).unwrap();
            for op in self.iter() {
                match op {
                    Op::Insert(edges) => {
                        let cols = ColumnarEdges::from_batch(&Batch::from(edges));
                        engine.bulk_insert(&cols).unwrap();
                    }
                    Op::Evict(threshold) => {
                        engine.evict_older_than(*threshold);
                    }
                }
            }
            engine
        }
    }

    impl quickcheck::Arbitrary for Ops {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            let mut seed = vec![arbitrary_edge(g)];
            seed.extend(arbitrary_edges(g));
            let ops = gen_bytes(g, b"ab.", b'.', 0..)
                .iter()
                .map(|_| match u8::arbitrary(g) % 3 {
                    0 => Op::Evict((u8::arbitrary(g) % 32) as Timestamp),
                    _ => Op::Insert(arbitrary_edges(g)),
                })
                .collect();
            Self { seed, ops }
        }

        fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
            let l = self.ops.len();
            if l == 0 {
                return Box::new(std::iter::empty());
            }
            let me = self.clone();
            let it = std::iter::successors(Some(l / 2), move |n| {
                let nxt = (n + l) / 2 + 1;
                if nxt >= l {
                    None
                } else {
                    Some(nxt)
                }
            })
            .map(move |n| {
                let mut res = me.clone();
                res.ops = me.ops[0..n].to_vec();
                res
            });
            Box::new(it)
        }
    }

    /// Ranking computed by brute force, independent of any engine's own index.
    pub(crate) fn default_high_degree_vertices<E: GraphEngine>(g: &E, n: usize) -> Vec<VertexId> {
        let mut ranked: Vec<_> = VertexId::range(g.max_nv())
            .map(|v| (Reverse(g.out_degree(&v)), v))
            .filter(|(Reverse(d), _)| *d > 0)
            .collect();
        ranked.sort();
        ranked.into_iter().take(n).map(|(_, v)| v).collect()
    }

    pub(crate) fn edge_multiset<E: GraphEngine>(g: &E) -> Vec<(VertexId, VertexId, Timestamp)> {
        let mut res: Vec<_> = g
            .iter_edges()
            .map(|e| (e.source, e.sink, e.timestamp))
            .collect();
        res.sort();
        res
    }

    pub(crate) fn assert_same_view<E1: GraphEngine, E2: GraphEngine>(a: &E1, b: &E2) {
        assert_eq!(a.max_nv(), b.max_nv());
        assert_eq!(a.edge_size(), b.edge_size());
        assert_eq!(edge_multiset(a), edge_multiset(b));
        for v in VertexId::range(a.max_nv()) {
            assert_eq!(a.out_degree(&v), b.out_degree(&v));
            assert_eq!(a.out_edges(&v).count(), b.out_edges(&v).count());
            assert_eq!(a.in_edges(&v).count(), b.in_edges(&v).count());
        }
        for n in 0..=a.max_nv() {
            assert_eq!(a.high_degree_vertices(n), b.high_degree_vertices(n));
        }
    }
}
