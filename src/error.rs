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

//! Errors of graph mutations and algorithm runs.

use std::io;

use thiserror::Error;

/// Error raised by a graph mutation or when starting an algorithm.
///
/// A failing mutation never changes the graph.
#[derive(Debug, Error)]
pub enum Error {
    /// A node with this label exists already.
    #[error("a node labelled '{0}' already exists")]
    DuplicateLabel(String),

    /// There is already an edge between both nodes.
    #[error("there is already an edge between '{0}' and '{1}'")]
    DuplicateEdge(String, String),

    /// Edge weights must be strictly positive.
    #[error("invalid edge weight {0}, weights must be positive")]
    InvalidWeight(String),

    /// No node with this label exists.
    #[error("unknown node '{0}'")]
    UnknownNode(String),

    /// Both end points of an edge are the same node.
    #[error("self-loop at node '{0}' is not allowed")]
    SelfLoop(String),

    /// A vertex index is not in `0..num_vertices`.
    #[error("vertex {vertex} is out of range, the graph has {num_vertices} vertices")]
    VertexOutOfRange { vertex: usize, num_vertices: usize },

    /// A sum of weights does not fit into the weight type.
    #[error("the total weight exceeds the range of the weight type")]
    WeightOverflow,

    /// The graph is owned by a running algorithm.
    #[error("an algorithm is running on the graph")]
    Busy,

    /// There is no algorithm run to wait for.
    #[error("no algorithm is running")]
    Idle,

    /// The worker thread of a run panicked.
    #[error("the worker thread panicked")]
    WorkerPanicked,

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
