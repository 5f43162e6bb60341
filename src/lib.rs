// Copyright (c) 2015-2022, 2026 Frank Fischer <frank-fischer@shadow-soft.de>
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

#![forbid(unsafe_code)]

//! Step-wise graph algorithms.
//!
//! The algorithms (Dijkstra's shortest paths, Prim's and Kruskal's minimum
//! spanning trees) work on a mutable, labelled, weighted graph and report
//! every state change as a [`StepEvent`], so that a run can be shown step by
//! step. Runs can be executed on a worker thread with the [`runner`].
//!
//! # Example
//!
//! ```
//! use rs_graph_steps::{Graph, StepEvent};
//! use rs_graph_steps::mst::prim;
//!
//! let mut g: Graph = Graph::new();
//! for label in &["a", "b", "c"] {
//!     g.add_node(*label).unwrap();
//! }
//! g.add_edge("a", "b", 3).unwrap();
//! g.add_edge("b", "c", 1).unwrap();
//! g.add_edge("a", "c", 2).unwrap();
//!
//! let mut steps = prim::start(&mut g, "a").unwrap();
//! for step in &mut steps {
//!     if let StepEvent::EdgeAccepted { total, .. } = step {
//!         println!("tree weight {}", total);
//!     }
//! }
//! assert_eq!(steps.finish().tree.total, 3);
//! ```

// # Data structures

pub mod error;
pub use self::error::{Error, Result};

pub mod graph;
pub use self::graph::{Distance, Edge, Graph, Node, Weight};

pub mod unionfind;

pub mod collections;

/// Graph classes
pub mod classes;

// # Algorithms

pub mod step;
pub use self::step::{Pace, StepEvent};

pub mod mst;
pub mod shortestpath;

pub mod runner;

// # Text interface

pub mod batch;
