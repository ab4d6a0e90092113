use num_traits::{Float, Zero};
use std::fmt::Debug;

/// A read-only weighted directed graph, borrowed for the duration of every
/// call into the core algorithms. Construction and mutation are deliberately
/// outside this crate's scope; implementors only need to answer "what are
/// this vertex's out-edges".
pub trait Graph<W>: Debug
where
    W: Float + Zero + Debug + Copy,
{
    /// Returns the number of vertices in the graph.
    fn vertex_count(&self) -> usize;

    /// Returns the out-edges of `vertex` as `(target, weight)` pairs.
    /// Returns an empty slice for a vertex with no out-edges or one outside
    /// the graph's range.
    fn edges_from(&self, vertex: usize) -> &[(usize, W)];
}
