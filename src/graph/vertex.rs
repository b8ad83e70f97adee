/// ID for vertices, which are essentially `usize`.
///
/// Vertex sets are pre-allocated, so a valid ID always lies in `[0, max_vertex_id]`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub usize);

impl VertexId {
    pub const MIN: VertexId = VertexId(0);
    pub const MAX: VertexId = VertexId(usize::MAX);

    pub fn new(x: usize) -> Self {
        Self(x)
    }

    pub fn to_raw(&self) -> usize {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// All vertex IDs of a graph holding `capacity` vertices.
    pub fn range(capacity: usize) -> impl DoubleEndedIterator<Item = VertexId> + ExactSizeIterator {
        (0..capacity).map(VertexId)
    }
}
