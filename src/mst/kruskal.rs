// Copyright (c) 2016-2022, 2026 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Implementation of Kruskal's algorithm
//!
//! All edges are sorted by weight (stable, so edges of equal weight keep
//! their insertion order). An edge is accepted if its end points are in
//! different components, otherwise it is rejected. The components are kept
//! in a [`DisjointSet`].
//!
//! The algorithm stops as soon as `n - 1` edges have been accepted. If the
//! edges are exhausted before, the graph is not connected and the result is
//! a spanning *forest*, reported as [`KruskalResult::Disconnected`].

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, Node, Weight};
use crate::mst::SpanningTree;
use crate::step::StepEvent;
use crate::unionfind::DisjointSet;

use log::{debug, trace};

use std::collections::HashMap;
use std::vec;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The result of Kruskal's algorithm.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum KruskalResult<E, W> {
    /// The tree spans all nodes.
    Spanning(SpanningTree<E, W>),
    /// The graph is not connected, this is the minimum spanning forest.
    Disconnected(SpanningTree<E, W>),
}

impl<E, W> KruskalResult<E, W> {
    /// Return `true` if the tree spans all nodes.
    pub fn is_spanning(&self) -> bool {
        match self {
            KruskalResult::Spanning(_) => true,
            KruskalResult::Disconnected(_) => false,
        }
    }

    /// Return the accepted edges, regardless of connectivity.
    pub fn tree(&self) -> &SpanningTree<E, W> {
        match self {
            KruskalResult::Spanning(tree) | KruskalResult::Disconnected(tree) => tree,
        }
    }

    pub fn into_tree(self) -> SpanningTree<E, W> {
        match self {
            KruskalResult::Spanning(tree) | KruskalResult::Disconnected(tree) => tree,
        }
    }

    fn new(tree: SpanningTree<E, W>, num_nodes: usize) -> Self {
        if tree.len() + 1 >= num_nodes {
            KruskalResult::Spanning(tree)
        } else {
            KruskalResult::Disconnected(tree)
        }
    }
}

/// Run Kruskal's algorithm on an edge list.
///
/// The vertices are `0..num_vertices`, each edge is a triple `(u, v,
/// weight)`. The returned tree contains the indices of the accepted edges in
/// `edges`. Only vertices incident to some edge are stored, so the memory
/// used does not depend on `num_vertices`.
///
/// Fails with [`Error::WeightOverflow`] if the total weight of the tree does
/// not fit into `W`.
///
/// # Example
///
/// ```
/// use rs_graph_steps::mst::kruskal;
///
/// let edges = [(0, 1, 4), (1, 2, 1), (0, 2, 2), (2, 3, 7)];
/// let result = kruskal::solve(4, &edges).unwrap();
/// assert!(result.is_spanning());
/// assert_eq!(result.tree().edges, vec![1, 2, 3]);
/// assert_eq!(result.tree().total, 10);
///
/// let result = kruskal::solve(5, &edges).unwrap();
/// assert!(!result.is_spanning());
/// ```
pub fn solve<W>(num_vertices: usize, edges: &[(usize, usize, W)]) -> Result<KruskalResult<usize, W>>
where
    W: Weight,
{
    if let Some(&(u, v, _)) = edges.iter().find(|&&(u, v, _)| u >= num_vertices || v >= num_vertices) {
        return Err(Error::VertexOutOfRange {
            vertex: if u >= num_vertices { u } else { v },
            num_vertices,
        });
    }

    // dense index of the vertices incident to some edge
    let mut vertexidx = HashMap::new();
    for &(u, v, _) in edges {
        for &x in &[u, v] {
            let next = vertexidx.len();
            vertexidx.entry(x).or_insert(next);
        }
    }

    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.sort_by_key(|&i| edges[i].2);

    let needed = num_vertices.saturating_sub(1);
    let mut sets = DisjointSet::new(vertexidx.len());
    let mut tree = SpanningTree {
        edges: Vec::with_capacity(needed.min(edges.len())),
        total: W::zero(),
    };

    for i in order {
        if tree.len() == needed {
            break;
        }
        let (u, v, weight) = edges[i];
        if sets.union(vertexidx[&u], vertexidx[&v]) {
            tree.edges.push(i);
            tree.total = tree.total.checked_add(&weight).ok_or(Error::WeightOverflow)?;
        }
    }

    debug!(
        "Kruskal accepted {} edges for {} vertices, total weight {}",
        tree.len(),
        num_vertices,
        tree.total
    );

    Ok(KruskalResult::new(tree, num_vertices))
}

/// Kruskal iterator over a graph.
///
/// The steps alternate between taking the next edge in sorted order and
/// accepting or rejecting it. The running total saturates at the maximum of
/// `W` instead of overflowing.
pub struct Kruskal<'a, W>
where
    W: Weight,
{
    graph: &'a mut Graph<W>,
    /// Dense index of each node for the disjoint set.
    nodeidx: HashMap<Node, usize>,
    sets: DisjointSet,
    edges: vec::IntoIter<Edge>,
    inspecting: Option<Edge>,
    tree: SpanningTree<Edge, W>,
}

/// Start Kruskal's algorithm.
pub fn start<W>(graph: &mut Graph<W>) -> Kruskal<'_, W>
where
    W: Weight,
{
    Kruskal::new(graph)
}

/// Run Kruskal's algorithm to completion.
///
/// Returns the tree and all steps of the algorithm.
///
/// # Example
///
/// ```
/// use rs_graph_steps::classes::spanning_tree_example;
/// use rs_graph_steps::mst::kruskal;
///
/// let mut g = spanning_tree_example::<i64>();
/// let (result, steps) = kruskal::run(&mut g);
/// assert!(result.is_spanning());
/// assert_eq!(result.tree().total, 22);
/// assert_eq!(steps.len(), 14);
/// ```
pub fn run<W>(graph: &mut Graph<W>) -> (KruskalResult<Edge, W>, Vec<StepEvent<W>>)
where
    W: Weight,
{
    let mut kruskal = start(graph);
    let steps = kruskal.by_ref().collect();
    (kruskal.finish(), steps)
}

impl<'a, W> Kruskal<'a, W>
where
    W: Weight,
{
    /// Create a run on `graph`.
    ///
    /// The transient state of the graph is reset first.
    pub fn new(graph: &'a mut Graph<W>) -> Self {
        debug!(
            "Start Kruskal on {} nodes and {} edges",
            graph.num_nodes(),
            graph.num_edges()
        );
        graph.reset();

        let nodeidx: HashMap<_, _> = graph.nodes().enumerate().map(|(i, u)| (u, i)).collect();
        let mut edges: Vec<_> = graph.edges().collect();
        edges.sort_by_key(|&e| graph.weight(e));

        Kruskal {
            sets: DisjointSet::new(nodeidx.len()),
            tree: SpanningTree {
                edges: Vec::with_capacity(nodeidx.len().saturating_sub(1)),
                total: W::zero(),
            },
            nodeidx,
            edges: edges.into_iter(),
            inspecting: None,
            graph,
        }
    }

    /// Return the graph in its current state.
    pub fn graph(&self) -> &Graph<W> {
        self.graph
    }

    /// Return the weight of the forest built so far.
    pub fn total(&self) -> W {
        self.tree.total
    }

    /// Run the remaining steps and return the result.
    pub fn finish(mut self) -> KruskalResult<Edge, W> {
        for _ in &mut self {}
        debug!(
            "Kruskal finished with {} edges, total weight {}",
            self.tree.len(),
            self.tree.total
        );
        KruskalResult::new(self.tree, self.nodeidx.len())
    }

    fn is_complete(&self) -> bool {
        self.tree.len() + 1 >= self.nodeidx.len()
    }
}

impl<'a, W> Iterator for Kruskal<'a, W>
where
    W: Weight,
{
    type Item = StepEvent<W>;

    fn next(&mut self) -> Option<StepEvent<W>> {
        let step = if let Some(e) = self.inspecting.take() {
            let (u, v) = self.graph.enodes(e);
            let joined = self.sets.union(self.nodeidx[&u], self.nodeidx[&v]);
            let weight = self.graph.weight(e);
            let edata = self.graph.edge_data_mut(e);
            edata.evaluating = false;
            if joined {
                edata.accepted = true;
                self.tree.edges.push(e);
                self.tree.total = self.tree.total.saturating_add(weight);
                StepEvent::EdgeAccepted {
                    edge: e,
                    node: None,
                    total: self.tree.total,
                }
            } else {
                StepEvent::EdgeRejected { edge: e }
            }
        } else {
            if self.is_complete() {
                return None;
            }
            let e = self.edges.next()?;
            let (u, v) = self.graph.enodes(e);
            self.graph.edge_data_mut(e).evaluating = true;
            self.inspecting = Some(e);
            StepEvent::EdgeEvaluating { edge: e, from: u, to: v }
        };
        trace!("{:?}", step);
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::{run, solve, KruskalResult};
    use crate::classes::spanning_tree_example;
    use crate::error::Error;
    use crate::graph::Graph;
    use crate::step::StepEvent;

    #[test]
    fn test_example() {
        let mut g = spanning_tree_example::<i64>();
        let (result, steps) = run(&mut g);

        let accepted: Vec<_> = steps
            .iter()
            .filter_map(|step| match *step {
                StepEvent::EdgeAccepted { edge, node, total } => {
                    assert_eq!(node, None);
                    let (u, v) = g.enodes(edge);
                    Some(format!("{}{} {}", g.label(u), g.label(v), total))
                }
                _ => None,
            })
            .collect();
        assert_eq!(accepted, vec!["BE 2", "AD 5", "EF 8", "AB 12", "BC 17", "EG 22"]);

        let rejected: Vec<_> = steps
            .iter()
            .filter_map(|step| match *step {
                StepEvent::EdgeRejected { edge } => Some(edge),
                _ => None,
            })
            .collect();
        assert_eq!(rejected.len(), 1);
        let (u, v) = g.enodes(rejected[0]);
        assert_eq!((g.label(u), g.label(v)), ("D", "E"));

        match result {
            KruskalResult::Spanning(ref tree) => {
                assert_eq!(tree.total, 22);
                assert_eq!(tree.len(), 6);
            }
            KruskalResult::Disconnected(_) => panic!("example graph is connected"),
        }
        assert_eq!(g.edges().filter(|&e| g.is_accepted(e)).count(), 6);
        assert!(g.edges().all(|e| !g.is_evaluating(e)));
    }

    #[test]
    fn test_stops_when_complete() {
        let mut g: Graph = Graph::new();
        for label in &["a", "b", "c"] {
            g.add_node(*label).unwrap();
        }
        g.add_edge("a", "b", 1).unwrap();
        g.add_edge("b", "c", 2).unwrap();
        let ac = g.add_edge("a", "c", 3).unwrap();

        let (result, steps) = run(&mut g);
        assert_eq!(steps.len(), 4);
        assert!(steps.iter().all(|step| step.edge() != Some(ac)));
        assert!(result.is_spanning());
        assert_eq!(result.tree().total, 3);
    }

    #[test]
    fn test_disconnected() {
        let mut g: Graph = Graph::new();
        for label in &["a", "b", "c", "d"] {
            g.add_node(*label).unwrap();
        }
        g.add_edge("a", "b", 5).unwrap();
        g.add_edge("c", "d", 1).unwrap();

        let (result, steps) = run(&mut g);
        assert_eq!(steps.len(), 4);
        assert!(!result.is_spanning());
        let tree = result.into_tree();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.total, 6);
    }

    #[test]
    fn test_empty_and_single() {
        let mut g: Graph = Graph::new();
        let (result, steps) = run(&mut g);
        assert!(steps.is_empty());
        assert!(result.is_spanning());

        g.add_node("x").unwrap();
        let (result, steps) = run(&mut g);
        assert!(steps.is_empty());
        assert!(result.is_spanning());
        assert!(result.tree().is_empty());
    }

    #[test]
    fn test_solve_stable_ties() {
        // all weights are equal, the first edges closing no cycle win
        let edges = [(0, 1, 1), (1, 2, 1), (0, 2, 1), (2, 3, 1), (1, 3, 1)];
        let result = solve(4, &edges).unwrap();
        assert_eq!(result.tree().edges, vec![0, 1, 3]);
        assert_eq!(result.tree().total, 3);
    }

    #[test]
    fn test_solve_disconnected() {
        let edges = [(0, 1, 3), (2, 3, 4)];
        match solve(4, &edges).unwrap() {
            KruskalResult::Disconnected(tree) => {
                assert_eq!(tree.edges, vec![0, 1]);
                assert_eq!(tree.total, 7);
            }
            KruskalResult::Spanning(_) => panic!("graph is disconnected"),
        }
    }

    #[test]
    fn test_solve_out_of_range() {
        let edges = [(0, 1, 3), (1, 4, 4)];
        match solve(4, &edges) {
            Err(Error::VertexOutOfRange { vertex, num_vertices }) => {
                assert_eq!(vertex, 4);
                assert_eq!(num_vertices, 4);
            }
            _ => panic!("expected out of range error"),
        }
    }

    #[test]
    fn test_solve_no_vertices() {
        let result = solve::<i64>(0, &[]).unwrap();
        assert!(result.is_spanning());
        assert!(result.tree().is_empty());
    }

    #[test]
    fn test_solve_many_vertices() {
        let edges = [(0, 1, 3), (1, usize::MAX - 1, 4), (0, usize::MAX - 1, 5)];
        match solve(usize::MAX, &edges).unwrap() {
            KruskalResult::Disconnected(tree) => {
                assert_eq!(tree.edges, vec![0, 1]);
                assert_eq!(tree.total, 7);
            }
            KruskalResult::Spanning(_) => panic!("graph is disconnected"),
        }
        assert!(!solve::<i64>(usize::MAX / 4, &[]).unwrap().is_spanning());
    }

    #[test]
    fn test_solve_overflow() {
        let edges = [(0, 1, i64::MAX), (1, 2, 1)];
        assert!(matches!(solve(3, &edges), Err(Error::WeightOverflow)));

        // negative weights may bring the total back into range
        let edges = [(0, 1, i64::MAX), (1, 2, -1)];
        assert_eq!(solve(3, &edges).unwrap().tree().total, i64::MAX - 1);
    }
}
