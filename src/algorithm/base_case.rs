use num_traits::{Float, Zero};
use std::collections::HashSet;
use std::fmt::Debug;

use crate::data_structures::BinaryHeapWrapper;
use crate::graph::Graph;

/// Outcome of [`base_case`]: a (possibly tightened) boundary and the set of
/// vertices whose distance is now final and strictly below it.
#[derive(Debug, Clone)]
pub struct BaseCaseResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    pub bound: W,
    pub vertices: Vec<usize>,
}

/// Bounded single-source relaxation used when the BMSSP recursion bottoms
/// out (Algorithm 2 in the paper). `sources` must be a singleton `{x}` with
/// `bd[x]` already equal to `x`'s true shortest-path distance; violating
/// this precondition is a programmer error and panics.
///
/// Runs a mini-Dijkstra rooted at `x`, finalizing vertices in increasing
/// distance order until either the heap empties or `k + 1` vertices have
/// been finalized. A relaxation only ever lowers `bd[v]`, and only when the
/// new distance is strictly below both the current `bd[v]` and `bound`.
pub fn base_case<W, G>(
    graph: &G,
    bd: &mut [W],
    pred: &mut [Option<usize>],
    bound: W,
    sources: &[usize],
    k: usize,
) -> BaseCaseResult<W>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    assert_eq!(
        sources.len(),
        1,
        "base_case requires a singleton complete source set"
    );
    let x = sources[0];

    let mut heap = BinaryHeapWrapper::with_capacity(k * 4 + 1);
    heap.push(x, bd[x]);

    let mut finalized: HashSet<usize> = HashSet::with_capacity(k + 1);
    let mut u0: Vec<usize> = Vec::with_capacity(k + 1);

    while finalized.len() < k + 1 {
        let Some((u, dist_u)) = heap.pop() else {
            break;
        };
        if finalized.contains(&u) {
            continue;
        }
        finalized.insert(u);
        u0.push(u);
        log::trace!("base_case: finalized vertex {u} at distance {dist_u:?}");

        for &(v, weight) in graph.edges_from(u) {
            let new_dist = dist_u + weight;
            if new_dist < bd[v] && new_dist < bound {
                bd[v] = new_dist;
                pred[v] = Some(u);
                heap.push(v, new_dist);
            }
        }
    }

    if u0.len() <= k {
        log::debug!(
            "base_case: search exhausted locally, retaining bound {bound:?} with {} vertices",
            u0.len()
        );
        return BaseCaseResult { bound, vertices: u0 };
    }

    let new_bound = u0
        .iter()
        .map(|&v| bd[v])
        .max()
        .expect("u0 is non-empty since its length exceeds k >= 0");
    let vertices: Vec<usize> = u0.into_iter().filter(|&v| bd[v] < new_bound).collect();

    log::debug!(
        "base_case: tightened bound {bound:?} -> {new_bound:?}, returning {} vertices",
        vertices.len()
    );
    BaseCaseResult {
        bound: new_bound,
        vertices,
    }
}
