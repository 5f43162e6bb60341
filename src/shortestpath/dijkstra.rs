/*
 * Copyright (c) 2017, 2018, 2021, 2022, 2026 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Dijkstra's shortest path algorithm.
//!
//! Dijkstra's algorithm computes the shortest path from some start node $s \in
//! V$ to all other nodes in an undirected graph. Each edge is assigned a
//! non-negative weight (or length) $w \colon E \to \mathbb{R}_+$. Negative
//! weights are not checked for, the results are meaningless in this case.
//!
//! The search is an iterator over [`StepEvent`]s. Nodes are not moved inside
//! the priority queue when their distance decreases. Instead the node is pushed
//! again with the new distance and outdated entries are skipped when they are
//! extracted. Among equal distances the node pushed first is handled first.
//!
//! # Example
//!
//! ```
//! use rs_graph_steps::classes::shortest_path_example;
//! use rs_graph_steps::graph::Distance;
//! use rs_graph_steps::shortestpath::dijkstra;
//!
//! let mut g = shortest_path_example::<i64>();
//! let (paths, steps) = dijkstra::run(&mut g, "A").unwrap();
//!
//! let dist = |l: &str| paths.get(l).unwrap().distance;
//! assert_eq!(dist("B"), Distance::Finite(7));
//! assert_eq!(dist("F"), Distance::Finite(11));
//! assert_eq!(dist("E"), Distance::Finite(20));
//!
//! let e = g.node("E").unwrap();
//! let path: Vec<_> = paths.path_to(e).unwrap().into_iter().map(|u| g.label(u)).collect();
//! assert_eq!(path, vec!["A", "C", "E"]);
//! assert_eq!(steps.len(), 24);
//! ```

use crate::collections::{BinHeap, ItemPriQueue};
use crate::error::Result;
use crate::graph::{Distance, Edge, Graph, Node, Weight};
use crate::step::StepEvent;

use log::{debug, trace};

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::vec::IntoIter;

/// Dijkstra search iterator.
///
/// The iterator borrows the graph and updates its transient state
/// (distances, predecessors, visited flags, evaluation flags) while it
/// advances. Between two steps the state can be inspected with
/// [`Dijkstra::graph`].
pub struct Dijkstra<'a, W>
where
    W: Weight,
{
    graph: &'a mut Graph<W>,
    src: Node,
    pqueue: BinHeap<Node, W>,
    /// The node being scanned, its distance and its remaining edges.
    current: Option<(Node, W, IntoIter<(Edge, Node)>)>,
    /// The edge flagged as being evaluated by the last step.
    evaluating: Option<Edge>,
    pending: VecDeque<StepEvent<W>>,
    done: bool,
}

/// Start a Dijkstra search at the node labelled `src`.
///
/// Fails with [`Error::UnknownNode`](crate::Error::UnknownNode) if there is no
/// such node; the graph is not touched in this case.
pub fn start<'a, W>(graph: &'a mut Graph<W>, src: &str) -> Result<Dijkstra<'a, W>>
where
    W: Weight,
{
    let src = graph.require(src)?;
    Ok(Dijkstra::new(graph, src))
}

/// Run a Dijkstra search to completion.
///
/// Returns the shortest path tree and all steps of the search.
pub fn run<W>(graph: &mut Graph<W>, src: &str) -> Result<(ShortestPaths<W>, Vec<StepEvent<W>>)>
where
    W: Weight,
{
    let mut search = start(graph, src)?;
    let steps = search.by_ref().collect();
    Ok((search.finish(), steps))
}

impl<'a, W> Dijkstra<'a, W>
where
    W: Weight,
{
    /// Create a search starting at `src`.
    ///
    /// The transient state of the graph is reset first.
    pub fn new(graph: &'a mut Graph<W>, src: Node) -> Self {
        debug!("Start Dijkstra at node {}", graph.label(src));
        graph.reset();
        graph.node_data_mut(src).distance = Distance::Finite(W::zero());

        let mut pqueue = BinHeap::new();
        pqueue.push(src, W::zero());

        Dijkstra {
            graph,
            src,
            pqueue,
            current: None,
            evaluating: None,
            pending: VecDeque::new(),
            done: false,
        }
    }

    /// Return the graph in its current state.
    pub fn graph(&self) -> &Graph<W> {
        self.graph
    }

    /// Return the start node.
    pub fn src(&self) -> Node {
        self.src
    }

    /// Run the remaining steps and return the shortest path tree.
    pub fn finish(mut self) -> ShortestPaths<W> {
        for _ in &mut self {}
        ShortestPaths::from_graph(self.graph, self.src)
    }

    /// Compute the next steps.
    ///
    /// Returns `false` if the search is complete.
    fn advance(&mut self) -> bool {
        if let Some(e) = self.evaluating.take() {
            self.graph.edge_data_mut(e).evaluating = false;
        }
        if self.done {
            return false;
        }
        if self.scan_next_edge() {
            return true;
        }

        while let Some((u, dist)) = self.pqueue.pop_min() {
            if self.graph.is_visited(u) {
                trace!("Skip outdated queue entry of node {}", self.graph.label(u));
                continue;
            }
            self.graph.node_data_mut(u).visited = true;
            let neighs: Vec<_> = self.graph.neighs(u).collect();
            self.current = Some((u, dist, neighs.into_iter()));
            self.pending.push_back(StepEvent::NodeVisited { node: u, distance: dist });
            return true;
        }

        self.mark_tree_edges();
        self.done = true;
        debug!("Dijkstra from {} finished", self.graph.label(self.src));
        false
    }

    /// Relax the next edge of the current node leading to an unvisited node.
    fn scan_next_edge(&mut self) -> bool {
        let (u, dist, edges) = match self.current.as_mut() {
            Some(current) => current,
            None => return false,
        };
        let (u, dist) = (*u, *dist);

        for (e, v) in edges {
            if self.graph.is_visited(v) {
                continue;
            }

            self.graph.edge_data_mut(e).evaluating = true;
            self.evaluating = Some(e);
            self.pending.push_back(StepEvent::EdgeEvaluating { edge: e, from: u, to: v });

            let candidate = dist.saturating_add(self.graph.weight(e));
            if Distance::Finite(candidate) < self.graph.distance(v) {
                let vdata = self.graph.node_data_mut(v);
                vdata.distance = Distance::Finite(candidate);
                vdata.predecessor = Some(u);
                self.pqueue.push(v, candidate);
                self.pending.push_back(StepEvent::DistanceRelaxed {
                    edge: e,
                    node: v,
                    distance: candidate,
                });
            } else {
                self.pending.push_back(StepEvent::RelaxationRejected {
                    edge: e,
                    node: v,
                    candidate,
                });
            }
            return true;
        }

        self.current = None;
        false
    }

    /// Flag the edge to the predecessor of each node.
    fn mark_tree_edges(&mut self) {
        let tree: Vec<_> = self
            .graph
            .nodes()
            .filter_map(|u| {
                self.graph
                    .predecessor(u)
                    .and_then(|p| self.graph.edge_between(u, p))
            })
            .collect();
        for e in tree {
            self.graph.edge_data_mut(e).accepted = true;
        }
    }
}

impl<'a, W> Iterator for Dijkstra<'a, W>
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

/// Shortest path information of a single node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathEntry<W> {
    pub node: Node,
    pub label: String,
    pub distance: Distance<W>,
    /// The previous node on a shortest path.
    pub predecessor: Option<Node>,
}

/// The result of a shortest path search.
#[derive(Clone, Debug)]
pub struct ShortestPaths<W> {
    src: Node,
    entries: Vec<PathEntry<W>>,
    index: HashMap<Node, usize>,
    tree: Vec<Edge>,
}

impl<W> ShortestPaths<W>
where
    W: Weight,
{
    fn from_graph(g: &Graph<W>, src: Node) -> Self {
        let entries: Vec<_> = g
            .nodes()
            .map(|u| PathEntry {
                node: u,
                label: g.label(u).to_string(),
                distance: g.distance(u),
                predecessor: g.predecessor(u),
            })
            .collect();
        let index = entries.iter().enumerate().map(|(i, entry)| (entry.node, i)).collect();
        let tree = g.edges().filter(|&e| g.is_accepted(e)).collect();
        ShortestPaths {
            src,
            entries,
            index,
            tree,
        }
    }

    /// Return the start node.
    pub fn src(&self) -> Node {
        self.src
    }

    /// Return the entries of all nodes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<PathEntry<W>> {
        self.entries.iter()
    }

    /// Return the entry of the node with the given label.
    pub fn get(&self, label: &str) -> Option<&PathEntry<W>> {
        self.entries.iter().find(|entry| entry.label == label)
    }

    /// Return the entry of node `u`.
    pub fn entry(&self, u: Node) -> Option<&PathEntry<W>> {
        self.index.get(&u).map(|&i| &self.entries[i])
    }

    /// Return the distance of `u` from the start node.
    ///
    /// Unknown nodes are unreachable.
    pub fn distance(&self, u: Node) -> Distance<W> {
        self.entry(u).map(|entry| entry.distance).unwrap_or(Distance::Infinite)
    }

    /// Return the edges of the shortest path tree.
    pub fn tree_edges(&self) -> &[Edge] {
        &self.tree
    }

    /// Return the nodes on a shortest path from the start node to `u`.
    ///
    /// Returns `None` if `u` is not reachable.
    pub fn path_to(&self, u: Node) -> Option<Vec<Node>> {
        if !self.distance(u).is_finite() {
            return None;
        }
        let mut path = vec![u];
        let mut v = u;
        while v != self.src {
            v = self.entry(v)?.predecessor?;
            path.push(v);
            if path.len() > self.entries.len() {
                return None;
            }
        }
        path.reverse();
        Some(path)
    }
}

impl<W> fmt::Display for ShortestPaths<W>
where
    W: Weight,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let src = self.entry(self.src).map(|entry| entry.label.as_str()).unwrap_or("?");
        writeln!(f, "Distances from '{}':", src)?;
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.label.cmp(&b.label));
        for entry in entries {
            match entry.distance {
                Distance::Finite(d) => writeln!(f, "  - to {}: {}", entry.label, d)?,
                Distance::Infinite => writeln!(f, "  - to {}: ∞ (unreachable)", entry.label)?,
            }
        }
        Ok(())
    }
}
