use num_traits::{Float, Zero};
use std::fmt::Debug;

use crate::graph::traits::Graph;
use crate::{Error, Result};

/// A minimal adjacency-list directed graph, sufficient to build the small
/// fixtures the core algorithms are exercised against. Ingestion from an
/// external source (file formats, streaming updates, ...) is out of scope
/// for this crate.
#[derive(Debug, Clone)]
pub struct DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    out_edges: Vec<Vec<(usize, W)>>,
}

impl<W> DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Creates a graph with `vertex_count` vertices and no edges.
    pub fn with_vertices(vertex_count: usize) -> Self {
        DirectedGraph {
            out_edges: vec![Vec::new(); vertex_count],
        }
    }

    /// Adds a directed edge `from -> to` with the given non-negative weight.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: W) -> Result<()> {
        if weight < W::zero() {
            return Err(Error::NegativeWeight(
                weight.to_f64().unwrap_or(f64::NAN),
            ));
        }
        let Some(edges) = self.out_edges.get_mut(from) else {
            return Err(Error::InvalidVertex(from));
        };
        if to >= self.out_edges.len() {
            return Err(Error::InvalidVertex(to));
        }
        edges.push((to, weight));
        Ok(())
    }
}

impl<W> Graph<W> for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn vertex_count(&self) -> usize {
        self.out_edges.len()
    }

    fn edges_from(&self, vertex: usize) -> &[(usize, W)] {
        self.out_edges
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
