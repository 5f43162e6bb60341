/*
 * Copyright (c) 2026 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! A mutable, labelled, undirected and weighted graph.
//!
//! Nodes and edges live in an arena and are addressed by the copyable
//! handles [`Node`] and [`Edge`]. Handles are never reused: removing an item
//! leaves a hole in the arena, so a handle of a removed item can never refer
//! to a different item later on. Iteration over nodes and edges follows their
//! insertion order.
//!
//! Besides the topology each node and edge carries some *transient* state that
//! is written by the algorithms (distances, predecessors, visited and in-tree
//! flags, evaluation and acceptance flags of edges). [`Graph::reset`] clears
//! this state without touching the topology.
//!
//! # Example
//!
//! ```
//! use rs_graph_steps::{Error, Graph};
//!
//! let mut g: Graph = Graph::new();
//! g.add_node("a").unwrap();
//! g.add_node("b").unwrap();
//! g.add_node("c").unwrap();
//! g.add_edge("a", "b", 3).unwrap();
//! g.add_edge("b", "c", 5).unwrap();
//!
//! assert!(matches!(g.add_edge("b", "a", 1), Err(Error::DuplicateEdge(..))));
//! assert_eq!(g.num_edges(), 2);
//!
//! let b = g.node("b").unwrap();
//! let neighs: Vec<_> = g.neighs(b).map(|(_, v)| g.label(v)).collect();
//! assert_eq!(neighs, vec!["a", "c"]);
//!
//! g.remove_node("b");
//! assert_eq!(g.num_nodes(), 2);
//! assert_eq!(g.num_edges(), 0);
//! ```

use crate::error::{Error, Result};

use num_traits::PrimInt;

use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The type of edge weights and distances.
///
/// Any primitive integer type can be used.
pub trait Weight: PrimInt + fmt::Debug + fmt::Display {}

impl<T> Weight for T where T: PrimInt + fmt::Debug + fmt::Display {}

/// Handle of a node in a [`Graph`].
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Node(usize);

impl Node {
    /// Return the arena index of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle of an edge in a [`Graph`].
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Edge(usize);

impl Edge {
    /// Return the arena index of this edge.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A (possibly infinite) distance.
///
/// `Infinite` compares larger than every finite distance.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Distance<W> {
    Finite(W),
    Infinite,
}

impl<W> Distance<W>
where
    W: Copy,
{
    /// Return `true` if the distance is finite.
    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    /// Return the finite value or `None`.
    pub fn finite(self) -> Option<W> {
        match self {
            Distance::Finite(d) => Some(d),
            Distance::Infinite => None,
        }
    }
}

impl<W> Default for Distance<W> {
    fn default() -> Self {
        Distance::Infinite
    }
}

impl<W> fmt::Display for Distance<W>
where
    W: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{}", d),
            Distance::Infinite => write!(f, "∞"),
        }
    }
}

pub(crate) struct NodeData<W> {
    label: String,
    /// Opaque coordinates of a drawing, never used by the algorithms.
    position: Option<(f64, f64)>,
    /// Incident edges in insertion order.
    edges: Vec<Edge>,
    pub(crate) distance: Distance<W>,
    pub(crate) predecessor: Option<Node>,
    pub(crate) visited: bool,
    pub(crate) in_tree: bool,
}

pub(crate) struct EdgeData<W> {
    u: Node,
    v: Node,
    weight: W,
    pub(crate) evaluating: bool,
    pub(crate) accepted: bool,
}

/// A simple undirected graph with labelled nodes and positive edge weights.
pub struct Graph<W = i64> {
    nodes: Vec<Option<NodeData<W>>>,
    edges: Vec<Option<EdgeData<W>>>,
    labels: HashMap<String, Node>,
    num_edges: usize,
}

impl<W> Default for Graph<W> {
    fn default() -> Self {
        Graph {
            nodes: vec![],
            edges: vec![],
            labels: HashMap::new(),
            num_edges: 0,
        }
    }
}

impl<W> Graph<W>
where
    W: Weight,
{
    /// Create a new, empty graph.
    pub fn new() -> Self {
        Default::default()
    }

    /// Return the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }

    /// Return the number of edges.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Return `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Add a new node with the given label.
    ///
    /// Fails with [`Error::DuplicateLabel`] if the label is already in use.
    pub fn add_node<S: Into<String>>(&mut self, label: S) -> Result<Node> {
        self.insert_node(label.into(), None)
    }

    /// Add a new node with the given label and drawing coordinates.
    pub fn add_node_at<S: Into<String>>(&mut self, label: S, x: f64, y: f64) -> Result<Node> {
        self.insert_node(label.into(), Some((x, y)))
    }

    fn insert_node(&mut self, label: String, position: Option<(f64, f64)>) -> Result<Node> {
        if self.labels.contains_key(&label) {
            return Err(Error::DuplicateLabel(label));
        }
        let u = Node(self.nodes.len());
        self.labels.insert(label.clone(), u);
        self.nodes.push(Some(NodeData {
            label,
            position,
            edges: vec![],
            distance: Distance::Infinite,
            predecessor: None,
            visited: false,
            in_tree: false,
        }));
        Ok(u)
    }

    /// Remove the node with the given label and all its incident edges.
    ///
    /// Returns `false` (and does nothing) if there is no such node.
    pub fn remove_node(&mut self, label: &str) -> bool {
        let u = match self.labels.remove(label) {
            Some(u) => u,
            None => return false,
        };
        if let Some(data) = self.nodes[u.0].take() {
            for e in data.edges {
                if let Some(edata) = self.edges[e.0].take() {
                    self.num_edges -= 1;
                    let v = if edata.u == u { edata.v } else { edata.u };
                    if let Some(vdata) = self.nodes[v.0].as_mut() {
                        vdata.edges.retain(|&f| f != e);
                    }
                }
            }
        }
        // clear predecessor links to the removed node
        for data in self.nodes.iter_mut().flatten() {
            if data.predecessor == Some(u) {
                data.predecessor = None;
            }
        }
        true
    }

    /// Add an edge between the nodes labelled `a` and `b`.
    ///
    /// Fails with
    /// - [`Error::UnknownNode`] if one of the end points does not exist,
    /// - [`Error::SelfLoop`] if `a == b`,
    /// - [`Error::InvalidWeight`] if `weight <= 0`,
    /// - [`Error::DuplicateEdge`] if both nodes are already adjacent.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: W) -> Result<Edge> {
        let u = self.require(a)?;
        let v = self.require(b)?;
        if u == v {
            return Err(Error::SelfLoop(a.to_string()));
        }
        if weight <= W::zero() {
            return Err(Error::InvalidWeight(weight.to_string()));
        }
        if self.edge_between(u, v).is_some() {
            return Err(Error::DuplicateEdge(a.to_string(), b.to_string()));
        }

        let e = Edge(self.edges.len());
        self.edges.push(Some(EdgeData {
            u,
            v,
            weight,
            evaluating: false,
            accepted: false,
        }));
        self.node_data_mut(u).edges.push(e);
        self.node_data_mut(v).edges.push(e);
        self.num_edges += 1;
        Ok(e)
    }

    /// Remove the edge between the nodes labelled `a` and `b`.
    ///
    /// Returns `false` if there is no such edge.
    pub fn remove_edge(&mut self, a: &str, b: &str) -> bool {
        let e = match (self.node(a), self.node(b)) {
            (Some(u), Some(v)) => match self.edge_between(u, v) {
                Some(e) => e,
                None => return false,
            },
            _ => return false,
        };
        if let Some(edata) = self.edges[e.0].take() {
            self.node_data_mut(edata.u).edges.retain(|&f| f != e);
            self.node_data_mut(edata.v).edges.retain(|&f| f != e);
            self.num_edges -= 1;
        }
        true
    }

    /// Remove all nodes and edges.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.labels.clear();
        self.num_edges = 0;
    }

    /// Return the node with the given label.
    pub fn node(&self, label: &str) -> Option<Node> {
        self.labels.get(label).copied()
    }

    /// Return the node with the given label or [`Error::UnknownNode`].
    pub fn require(&self, label: &str) -> Result<Node> {
        self.node(label).ok_or_else(|| Error::UnknownNode(label.to_string()))
    }

    /// Return `true` if `u` is a node of this graph that has not been removed.
    pub fn contains_node(&self, u: Node) -> bool {
        matches!(self.nodes.get(u.0), Some(Some(_)))
    }

    /// Return `true` if `e` is an edge of this graph that has not been removed.
    pub fn contains_edge(&self, e: Edge) -> bool {
        matches!(self.edges.get(e.0), Some(Some(_)))
    }

    /// Return the edge between `u` and `v` if there is one.
    pub fn edge_between(&self, u: Node, v: Node) -> Option<Edge> {
        self.node_data(u).edges.iter().copied().find(|&e| self.other(e, u) == v)
    }

    /// Return an iterator over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, data)| data.is_some())
            .map(|(i, _)| Node(i))
    }

    /// Return an iterator over all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, data)| data.is_some())
            .map(|(i, _)| Edge(i))
    }

    /// Return the incident edges of `u` together with the adjacent node.
    ///
    /// The edges are returned in the order in which they have been added.
    pub fn neighs(&self, u: Node) -> impl Iterator<Item = (Edge, Node)> + '_ {
        self.node_data(u).edges.iter().map(move |&e| (e, self.other(e, u)))
    }

    /// Return the end points of an edge in the order they were given.
    pub fn enodes(&self, e: Edge) -> (Node, Node) {
        let data = self.edge_data(e);
        (data.u, data.v)
    }

    /// Return the end point of `e` that is not `u`.
    pub fn other(&self, e: Edge, u: Node) -> Node {
        let (a, b) = self.enodes(e);
        if a == u {
            b
        } else {
            a
        }
    }

    pub fn label(&self, u: Node) -> &str {
        &self.node_data(u).label
    }

    pub fn weight(&self, e: Edge) -> W {
        self.edge_data(e).weight
    }

    pub fn position(&self, u: Node) -> Option<(f64, f64)> {
        self.node_data(u).position
    }

    pub fn set_position(&mut self, u: Node, x: f64, y: f64) {
        self.node_data_mut(u).position = Some((x, y));
    }

    /// Current best known distance of `u` (written by shortest path runs).
    pub fn distance(&self, u: Node) -> Distance<W> {
        self.node_data(u).distance
    }

    /// Predecessor of `u` on its current shortest path.
    pub fn predecessor(&self, u: Node) -> Option<Node> {
        self.node_data(u).predecessor
    }

    pub fn is_visited(&self, u: Node) -> bool {
        self.node_data(u).visited
    }

    pub fn is_in_tree(&self, u: Node) -> bool {
        self.node_data(u).in_tree
    }

    pub fn is_evaluating(&self, e: Edge) -> bool {
        self.edge_data(e).evaluating
    }

    /// Return `true` if the edge belongs to the computed tree.
    pub fn is_accepted(&self, e: Edge) -> bool {
        self.edge_data(e).accepted
    }

    /// Clear the transient algorithm state of all nodes and edges.
    pub fn reset(&mut self) {
        for data in self.nodes.iter_mut().flatten() {
            data.distance = Distance::Infinite;
            data.predecessor = None;
            data.visited = false;
            data.in_tree = false;
        }
        for data in self.edges.iter_mut().flatten() {
            data.evaluating = false;
            data.accepted = false;
        }
    }

    /// # Panics
    ///
    /// Panics if `u` has been removed.
    pub(crate) fn node_data(&self, u: Node) -> &NodeData<W> {
        self.nodes[u.0]
            .as_ref()
            .unwrap_or_else(|| panic!("node {} has been removed", u))
    }

    pub(crate) fn node_data_mut(&mut self, u: Node) -> &mut NodeData<W> {
        self.nodes[u.0]
            .as_mut()
            .unwrap_or_else(|| panic!("node {} has been removed", u))
    }

    pub(crate) fn edge_data(&self, e: Edge) -> &EdgeData<W> {
        self.edges[e.0]
            .as_ref()
            .unwrap_or_else(|| panic!("edge {} has been removed", e))
    }

    pub(crate) fn edge_data_mut(&mut self, e: Edge) -> &mut EdgeData<W> {
        self.edges[e.0]
            .as_mut()
            .unwrap_or_else(|| panic!("edge {} has been removed", e))
    }
}

impl<W> fmt::Debug for Graph<W>
where
    W: Weight,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let edges: Vec<_> = self
            .edges()
            .map(|e| {
                let (u, v) = self.enodes(e);
                (self.label(u), self.label(v), self.weight(e))
            })
            .collect();
        f.debug_struct("Graph")
            .field("nodes", &self.nodes().map(|u| self.label(u)).collect::<Vec<_>>())
            .field("edges", &edges)
            .finish()
    }
}
