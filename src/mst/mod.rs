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

//! Minimum spanning tree algorithms.

pub mod kruskal;
pub use self::kruskal::{Kruskal, KruskalResult};

pub mod prim;
pub use self::prim::{Prim, PrimResult};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The edges of a spanning tree (or forest) and their total weight.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SpanningTree<E, W> {
    pub edges: Vec<E>,
    pub total: W,
}

impl<E, W> SpanningTree<E, W> {
    /// Return the number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
