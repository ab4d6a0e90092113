use num_traits::{Float, Zero};
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;

use crate::graph::Graph;

/// Absolute component of the tolerance used by the tight-edge test
/// `bd[v] == bd[u] + w`. Combined with a relative term scaled by the
/// compared magnitude, per spec guidance for graphs whose weights span many
/// orders of magnitude.
const TIGHT_EDGE_EPS_ABS: f64 = 1e-12;
const TIGHT_EDGE_EPS_REL: f64 = 1e-12;

/// Outcome of [`find_pivots`]: the pivot set `P` and the working set `W` the
/// bounded relaxation touched.
#[derive(Debug, Clone)]
pub struct FindPivotsResult {
    pub pivots: Vec<usize>,
    pub working_set: Vec<usize>,
}

fn tight<W: Float>(lhs: W, rhs: W) -> bool {
    let diff = (lhs - rhs).abs();
    let tol_abs = W::from(TIGHT_EDGE_EPS_ABS).unwrap_or_else(W::zero);
    let tol_rel = W::from(TIGHT_EDGE_EPS_REL).unwrap_or_else(W::zero) * lhs.abs().max(rhs.abs());
    diff <= tol_abs + tol_rel
}

/// Bounded-depth multi-source relaxation that identifies pivots: sources
/// whose tight-edge-forest component is large enough (`>= k`) to be worth a
/// recursive subcall (Algorithm 1 in the paper).
///
/// `sources` must all be complete (`bd[s]` final). Mutates `bd` and `pred`
/// in place, exactly as the outer BMSSP recursion's shared state.
pub fn find_pivots<W, G>(
    graph: &G,
    bd: &mut [W],
    pred: &mut [Option<usize>],
    sources: &[usize],
    bound: W,
    k: usize,
) -> FindPivotsResult
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    let source_set: HashSet<usize> = sources.iter().copied().collect();
    let mut in_working_set: HashSet<usize> = source_set.clone();
    let mut working_set: Vec<usize> = sources.to_vec();
    let mut prev_layer: Vec<usize> = sources.to_vec();

    for _round in 0..k {
        let mut layer: HashSet<usize> = HashSet::new();
        for &u in &prev_layer {
            for &(v, weight) in graph.edges_from(u) {
                let candidate = bd[u] + weight;
                if candidate <= bd[v] {
                    bd[v] = candidate;
                    pred[v] = Some(u);
                    if candidate < bound {
                        layer.insert(v);
                    }
                }
            }
        }
        for &v in &layer {
            if in_working_set.insert(v) {
                working_set.push(v);
            }
        }
        prev_layer = layer.into_iter().collect();

        if working_set.len() > k * sources.len() {
            log::debug!(
                "find_pivots: working set grew past k*|S| ({} > {}), early exit with all sources as pivots",
                working_set.len(),
                k * sources.len()
            );
            return FindPivotsResult {
                pivots: sources.to_vec(),
                working_set,
            };
        }
    }

    // Build the tight-edge forest F restricted to `working_set`.
    let working: HashSet<usize> = working_set.iter().copied().collect();
    let mut forest: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut in_degree: HashMap<usize, usize> = HashMap::new();

    for &u in &working_set {
        for &(v, weight) in graph.edges_from(u) {
            if working.contains(&v) && tight(bd[v], bd[u] + weight) {
                forest.entry(u).or_default().push(v);
                *in_degree.entry(v).or_insert(0) += 1;
            }
        }
    }

    let roots: Vec<usize> = sources
        .iter()
        .copied()
        .filter(|s| working.contains(s) && in_degree.get(s).copied().unwrap_or(0) == 0)
        .collect();

    let mut pivots = Vec::new();
    let mut visited: HashSet<usize> = HashSet::new();
    for root in roots {
        if visited.contains(&root) {
            continue;
        }
        let mut stack = vec![root];
        let mut component: HashSet<usize> = HashSet::new();
        while let Some(node) = stack.pop() {
            if !component.insert(node) {
                continue;
            }
            if let Some(children) = forest.get(&node) {
                for &child in children {
                    if !component.contains(&child) {
                        stack.push(child);
                    }
                }
            }
        }
        visited.extend(component.iter().copied());
        if component.len() >= k {
            pivots.push(root);
        }
    }

    log::debug!(
        "find_pivots: {} pivots from {} sources, working set size {}",
        pivots.len(),
        sources.len(),
        working_set.len()
    );
    FindPivotsResult {
        pivots,
        working_set,
    }
}
