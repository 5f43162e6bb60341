// Copyright (c) 2016, 2017, 2018, 2020, 2022, 2026 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Implementation of Prim's algorithm
//!
//! The tree grows from a start node. A priority queue holds the edges leaving
//! the tree (the *frontier*), keyed by their weight. The cheapest edge is
//! taken from the queue: if exactly one end point is in the tree the edge is
//! accepted and the edges of the new node are added to the queue, otherwise
//! it would close a cycle and is rejected.
//!
//! Edges of equal weight are taken in the order they entered the queue. The
//! total weight saturates at the maximum of the weight type.
//!
//! If the graph is not connected, only the component of the start node is
//! spanned. This is not an error, see [`PrimResult::is_spanning`].
//!
//! # Example
//!
//! ```
//! use rs_graph_steps::classes::spanning_tree_example;
//! use rs_graph_steps::mst::prim;
//!
//! let mut g = spanning_tree_example::<u32>();
//! let (tree, steps) = prim::run(&mut g, "A").unwrap();
//!
//! assert_eq!(tree.tree.total, 22);
//! assert_eq!(tree.reached, 7);
//! assert!(tree.is_spanning());
//! assert_eq!(steps.len(), 15);
//!
//! let mut edges: Vec<_> = tree.tree.edges.iter()
//!     .map(|&e| g.enodes(e))
//!     .map(|(u, v)| format!("{}{}", g.label(u), g.label(v)))
//!     .collect();
//! edges.sort();
//! assert_eq!(edges, vec!["AB", "AD", "BC", "BE", "EF", "EG"]);
//! ```

use crate::collections::{BinHeap, ItemPriQueue};
use crate::error::Result;
use crate::graph::{Edge, Graph, Node, Weight};
use crate::mst::SpanningTree;
use crate::step::StepEvent;

use log::{debug, trace};

use std::collections::VecDeque;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Prim iterator.
///
/// Each step either adds the start node, takes an edge from the frontier or
/// decides about that edge.
pub struct Prim<'a, W>
where
    W: Weight,
{
    graph: &'a mut Graph<W>,
    src: Node,
    pqueue: BinHeap<Edge, W>,
    /// The edge taken from the queue by the last step.
    inspecting: Option<(Edge, W)>,
    tree: SpanningTree<Edge, W>,
    reached: usize,
    pending: VecDeque<StepEvent<W>>,
    started: bool,
    done: bool,
}

/// The result of Prim's algorithm.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct PrimResult<W> {
    /// The accepted edges in the order of acceptance.
    pub tree: SpanningTree<Edge, W>,
    /// Number of nodes in the tree.
    pub reached: usize,
    /// Number of nodes of the graph.
    pub num_nodes: usize,
}

impl<W> PrimResult<W> {
    /// Return `true` if the tree reaches every node of the graph.
    pub fn is_spanning(&self) -> bool {
        self.reached == self.num_nodes
    }
}

/// Start Prim's algorithm at the node labelled `src`.
pub fn start<'a, W>(graph: &'a mut Graph<W>, src: &str) -> Result<Prim<'a, W>>
where
    W: Weight,
{
    let src = graph.require(src)?;
    Ok(Prim::new(graph, src))
}

/// Run Prim's algorithm to completion.
///
/// Returns the tree and all steps of the algorithm.
pub fn run<W>(graph: &mut Graph<W>, src: &str) -> Result<(PrimResult<W>, Vec<StepEvent<W>>)>
where
    W: Weight,
{
    let mut prim = start(graph, src)?;
    let steps = prim.by_ref().collect();
    Ok((prim.finish(), steps))
}

impl<'a, W> Prim<'a, W>
where
    W: Weight,
{
    /// Create a run starting at `src`.
    ///
    /// The transient state of the graph is reset first.
    pub fn new(graph: &'a mut Graph<W>, src: Node) -> Self {
        debug!("Start Prim at node {}", graph.label(src));
        graph.reset();
        let num_nodes = graph.num_nodes();
        Prim {
            graph,
            src,
            pqueue: BinHeap::new(),
            inspecting: None,
            tree: SpanningTree {
                edges: Vec::with_capacity(num_nodes.saturating_sub(1)),
                total: W::zero(),
            },
            reached: 0,
            pending: VecDeque::new(),
            started: false,
            done: false,
        }
    }

    /// Return the graph in its current state.
    pub fn graph(&self) -> &Graph<W> {
        self.graph
    }

    /// Return the weight of the tree built so far.
    pub fn total(&self) -> W {
        self.tree.total
    }

    /// Run the remaining steps and return the tree.
    pub fn finish(mut self) -> PrimResult<W> {
        for _ in &mut self {}
        PrimResult {
            tree: self.tree,
            reached: self.reached,
            num_nodes: self.graph.num_nodes(),
        }
    }

    fn advance(&mut self) -> bool {
        if self.done {
            return false;
        }

        if !self.started {
            self.started = true;
            self.add_to_tree(self.src);
            self.pending.push_back(StepEvent::NodeAdded { node: self.src });
            return true;
        }

        if let Some((e, weight)) = self.inspecting.take() {
            let (u, v) = self.graph.enodes(e);
            let next = match (self.graph.is_in_tree(u), self.graph.is_in_tree(v)) {
                (true, false) => Some(v),
                (false, true) => Some(u),
                _ => None,
            };
            let edata = self.graph.edge_data_mut(e);
            edata.evaluating = false;
            if let Some(x) = next {
                edata.accepted = true;
                self.tree.edges.push(e);
                self.tree.total = self.tree.total.saturating_add(weight);
                self.add_to_tree(x);
                self.pending.push_back(StepEvent::EdgeAccepted {
                    edge: e,
                    node: Some(x),
                    total: self.tree.total,
                });
            } else {
                self.pending.push_back(StepEvent::EdgeRejected { edge: e });
            }
            return true;
        }

        if self.reached < self.graph.num_nodes() {
            if let Some((e, weight)) = self.pqueue.pop_min() {
                let (u, v) = self.graph.enodes(e);
                self.graph.edge_data_mut(e).evaluating = true;
                self.inspecting = Some((e, weight));
                self.pending.push_back(StepEvent::EdgeEvaluating { edge: e, from: u, to: v });
                return true;
            }
        }

        self.done = true;
        debug!(
            "Prim from {} finished, {} of {} nodes reached, total weight {}",
            self.graph.label(self.src),
            self.reached,
            self.graph.num_nodes(),
            self.tree.total
        );
        false
    }

    /// Put `u` into the tree and its edges leaving the tree into the queue.
    fn add_to_tree(&mut self, u: Node) {
        self.graph.node_data_mut(u).in_tree = true;
        self.reached += 1;
        let frontier: Vec<_> = self
            .graph
            .neighs(u)
            .filter(|&(_, v)| !self.graph.is_in_tree(v))
            .map(|(e, _)| e)
            .collect();
        for e in frontier {
            self.pqueue.push(e, self.graph.weight(e));
        }
    }
}

impl<'a, W> Iterator for Prim<'a, W>
where
    W: Weight,
{
    type Item = StepEvent<W>;

    fn next(&mut self) -> Option<StepEvent<W>> {
        loop {
            if let Some(step) = self.pending.pop_front() {
                trace!("{:?}", step);
                return Some(step);
            }
            if !self.advance() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{run, start};
    use crate::classes::spanning_tree_example;
    use crate::error::Error;
    use crate::graph::Graph;
    use crate::step::StepEvent;

    #[test]
    fn test_example_sequence() {
        let mut g = spanning_tree_example::<i64>();
        let (result, steps) = run(&mut g, "A").unwrap();

        let label = |u| g.label(u).to_string();
        let edge = |e| {
            let (u, v) = g.enodes(e);
            format!("{}{}", label(u), label(v))
        };
        let trace: Vec<_> = steps
            .iter()
            .map(|step| match *step {
                StepEvent::NodeAdded { node } => format!("add {}", label(node)),
                StepEvent::EdgeEvaluating { edge: e, .. } => format!("eval {}", edge(e)),
                StepEvent::EdgeAccepted {
                    edge: e,
                    node: Some(x),
                    total,
                } => format!("accept {} {} {}", edge(e), label(x), total),
                StepEvent::EdgeRejected { edge: e } => format!("reject {}", edge(e)),
                _ => unreachable!("unexpected step {:?}", step),
            })
            .collect();

        assert_eq!(
            trace,
            vec![
                "add A",
                "eval AD",
                "accept AD D 3",
                "eval AB",
                "accept AB B 7",
                "eval BE",
                "accept BE E 9",
                "eval EF",
                "accept EF F 12",
                "eval DE",
                "reject DE",
                "eval BC",
                "accept BC C 17",
                "eval EG",
                "accept EG G 22",
            ]
        );

        assert_eq!(result.tree.total, 22);
        assert_eq!(result.tree.len(), 6);
        assert!(result.is_spanning());
        assert!(g.nodes().all(|u| g.is_in_tree(u)));
        assert_eq!(g.edges().filter(|&e| g.is_accepted(e)).count(), 6);
    }

    #[test]
    fn test_disconnected() {
        let mut g: Graph = Graph::new();
        for label in &["a", "b", "c", "x", "y"] {
            g.add_node(*label).unwrap();
        }
        g.add_edge("a", "b", 2).unwrap();
        g.add_edge("b", "c", 1).unwrap();
        g.add_edge("x", "y", 1).unwrap();

        let (result, _) = run(&mut g, "b").unwrap();
        assert_eq!(result.reached, 3);
        assert_eq!(result.num_nodes, 5);
        assert_eq!(result.tree.total, 3);
        assert!(!result.is_spanning());
        assert!(!g.is_in_tree(g.node("x").unwrap()));
    }

    #[test]
    fn test_single_node() {
        let mut g: Graph = Graph::new();
        let u = g.add_node("u").unwrap();
        let (result, steps) = run(&mut g, "u").unwrap();
        assert_eq!(steps, vec![StepEvent::NodeAdded { node: u }]);
        assert!(result.is_spanning());
        assert!(result.tree.is_empty());
    }

    #[test]
    fn test_evaluating_flag() {
        let mut g = spanning_tree_example::<i64>();
        let mut prim = start(&mut g, "C").unwrap();
        while let Some(step) = prim.next() {
            match step {
                StepEvent::EdgeEvaluating { edge, .. } => assert!(prim.graph().is_evaluating(edge)),
                StepEvent::EdgeAccepted { edge, .. } => {
                    assert!(!prim.graph().is_evaluating(edge));
                    assert!(prim.graph().is_accepted(edge));
                }
                StepEvent::EdgeRejected { edge } => {
                    assert!(!prim.graph().is_evaluating(edge));
                    assert!(!prim.graph().is_accepted(edge));
                }
                _ => (),
            }
        }
        assert_eq!(prim.total(), 22);
    }

    #[test]
    fn test_unknown_start() {
        let mut g = spanning_tree_example::<i64>();
        assert!(matches!(start(&mut g, "Z"), Err(Error::UnknownNode(_))));
    }
}
