//! Identifiers shared by engines, batches and the adapter.
//!
//! Vertices and edges are lightweight ID's, essentially `usize`.
//! Callers may feel free to copy and store them.

mod vertex;
pub use self::vertex::*;
mod edge;
pub use self::edge::*;

/// Edge timestamps, as handed over by the benchmark driver.
pub type Timestamp = i64;
