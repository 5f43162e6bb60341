// Copyright (c) 2026 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! The observable steps of an algorithm run.
//!
//! Each algorithm reports every state change as a [`StepEvent`]. The
//! sequence of events of a run is deterministic: the same graph and the same
//! start node always produce the same sequence.

use crate::graph::{Edge, Graph, Node, Weight};

use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Suggested delay before the step following an event is shown.
///
/// The hint is relative to some base delay chosen by the consumer, see
/// [`Pacing`](crate::runner::Pacing).
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Pace {
    /// No delay.
    None,
    /// Half the base delay.
    Half,
    /// The full base delay.
    Full,
}

/// One discrete state change of an algorithm run.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum StepEvent<W> {
    /// The node has been extracted from the queue, its distance is final.
    NodeVisited { node: Node, distance: W },
    /// The start node has been added to the spanning tree.
    NodeAdded { node: Node },
    /// The edge is being looked at.
    ///
    /// For shortest paths `from` is the current node and `to` the neighbor,
    /// otherwise they are the end points of the edge.
    EdgeEvaluating { edge: Edge, from: Node, to: Node },
    /// A shorter path to `node` via `edge` has been found.
    DistanceRelaxed { edge: Edge, node: Node, distance: W },
    /// The path to `node` via `edge` is not shorter.
    RelaxationRejected { edge: Edge, node: Node, candidate: W },
    /// The edge has been added to the spanning tree.
    ///
    /// `node` is the node reached by this edge (Prim only), `total` is the
    /// weight of the tree so far.
    EdgeAccepted { edge: Edge, node: Option<Node>, total: W },
    /// The edge would close a cycle.
    EdgeRejected { edge: Edge },
}

impl<W> StepEvent<W> {
    /// Return the pacing hint of this event.
    pub fn pace(&self) -> Pace {
        use self::StepEvent::*;
        match self {
            NodeVisited { .. } | NodeAdded { .. } | EdgeAccepted { .. } => Pace::Full,
            EdgeEvaluating { .. } | DistanceRelaxed { .. } | EdgeRejected { .. } => Pace::Half,
            RelaxationRejected { .. } => Pace::None,
        }
    }

    /// Return the edge this event is about.
    pub fn edge(&self) -> Option<Edge> {
        use self::StepEvent::*;
        match *self {
            NodeVisited { .. } | NodeAdded { .. } => None,
            EdgeEvaluating { edge, .. }
            | DistanceRelaxed { edge, .. }
            | RelaxationRejected { edge, .. }
            | EdgeAccepted { edge, .. }
            | EdgeRejected { edge } => Some(edge),
        }
    }

    /// Return the node whose state changed with this event.
    pub fn node(&self) -> Option<Node> {
        use self::StepEvent::*;
        match *self {
            NodeVisited { node, .. }
            | NodeAdded { node }
            | DistanceRelaxed { node, .. }
            | RelaxationRejected { node, .. } => Some(node),
            EdgeAccepted { node, .. } => node,
            EdgeEvaluating { .. } | EdgeRejected { .. } => None,
        }
    }

    /// Return a printable description of this event.
    ///
    /// The graph is used to resolve labels and weights, it must still contain
    /// the nodes and edges of the event.
    pub fn describe<'a>(&'a self, graph: &'a Graph<W>) -> Description<'a, W> {
        Description { event: self, graph }
    }
}

/// A human readable transcript line of a [`StepEvent`].
pub struct Description<'a, W> {
    event: &'a StepEvent<W>,
    graph: &'a Graph<W>,
}

impl<'a, W> fmt::Display for Description<'a, W>
where
    W: Weight,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::StepEvent::*;
        let g = self.graph;
        let edge = |e: Edge| {
            let (u, v) = g.enodes(e);
            format!("{}-{} (weight {})", g.label(u), g.label(v), g.weight(e))
        };
        match *self.event {
            NodeVisited { node, distance } => write!(f, "Visiting node {} (distance {})", g.label(node), distance),
            NodeAdded { node } => write!(f, "Added {} to the tree", g.label(node)),
            EdgeEvaluating { edge: e, from, to } => write!(
                f,
                "Evaluating edge {}-{} (weight {})",
                g.label(from),
                g.label(to),
                g.weight(e)
            ),
            DistanceRelaxed { node, distance, .. } => {
                write!(f, "  -> Relaxing {}, new distance {}", g.label(node), distance)
            }
            RelaxationRejected { node, candidate, .. } => write!(
                f,
                "  -> Edge to {} does not improve the path (candidate {})",
                g.label(node),
                candidate
            ),
            EdgeAccepted {
                edge: e,
                node: Some(node),
                total,
            } => write!(
                f,
                "Accepted edge {}, added {} to the tree, total cost {}",
                edge(e),
                g.label(node),
                total
            ),
            EdgeAccepted { edge: e, node: None, total } => {
                write!(f, "Accepted edge {}, total cost {}", edge(e), total)
            }
            EdgeRejected { edge: e } => write!(f, "Rejected edge {} (would form a cycle)", edge(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Pace, StepEvent};
    use crate::graph::Graph;

    #[test]
    fn test_describe() {
        let mut g: Graph = Graph::new();
        let a = g.add_node("A").unwrap();
        let b = g.add_node("B").unwrap();
        let e = g.add_edge("A", "B", 7).unwrap();

        let events = [
            StepEvent::NodeVisited { node: a, distance: 0 },
            StepEvent::EdgeEvaluating { edge: e, from: a, to: b },
            StepEvent::DistanceRelaxed {
                edge: e,
                node: b,
                distance: 7,
            },
            StepEvent::EdgeAccepted {
                edge: e,
                node: Some(b),
                total: 7,
            },
            StepEvent::EdgeRejected { edge: e },
        ];
        let lines: Vec<_> = events.iter().map(|ev| ev.describe(&g).to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "Visiting node A (distance 0)",
                "Evaluating edge A-B (weight 7)",
                "  -> Relaxing B, new distance 7",
                "Accepted edge A-B (weight 7), added B to the tree, total cost 7",
                "Rejected edge A-B (weight 7) (would form a cycle)",
            ]
        );
    }

    #[test]
    fn test_pace_and_items() {
        let mut g: Graph = Graph::new();
        let a = g.add_node("A").unwrap();
        g.add_node("B").unwrap();
        let e = g.add_edge("A", "B", 1).unwrap();

        let visited = StepEvent::NodeVisited { node: a, distance: 0i64 };
        assert_eq!(visited.pace(), Pace::Full);
        assert_eq!(visited.node(), Some(a));
        assert_eq!(visited.edge(), None);

        let rejected = StepEvent::RelaxationRejected {
            edge: e,
            node: a,
            candidate: 3i64,
        };
        assert_eq!(rejected.pace(), Pace::None);
        assert_eq!(rejected.edge(), Some(e));

        let accepted = StepEvent::EdgeAccepted {
            edge: e,
            node: None,
            total: 1i64,
        };
        assert_eq!(accepted.node(), None);
    }
}
