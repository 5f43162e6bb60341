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

//! Union-Find data structure with path compression and union by rank.

/// A partition of the elements `0..n` into disjoint sets.
///
/// # Example
///
/// ```
/// use rs_graph_steps::unionfind::DisjointSet;
///
/// let mut sets = DisjointSet::new(4);
/// assert!(sets.union(0, 1));
/// assert!(sets.union(2, 3));
/// assert!(!sets.union(1, 0));
/// assert_eq!(sets.find(0), sets.find(1));
/// assert_ne!(sets.find(1), sets.find(2));
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl DisjointSet {
    /// Create `n` singleton sets.
    pub fn new(n: usize) -> Self {
        DisjointSet {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Return the number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Return the representative of the set containing `x`.
    ///
    /// Every element on the path from `x` to the root is linked directly to
    /// the root afterwards.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut u = x;
        while self.parent[u] != root {
            let next = self.parent[u];
            self.parent[u] = root;
            u = next;
        }

        root
    }

    /// Merge the sets containing `x` and `y`.
    ///
    /// Returns `false` if both are already in the same set. Otherwise the root
    /// of lower rank is attached to the other root. On equal ranks the root of
    /// `y` is attached to the root of `x`, whose rank grows by one.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let xroot = self.find(x);
        let yroot = self.find(y);
        if xroot == yroot {
            return false;
        }

        if self.rank[xroot] < self.rank[yroot] {
            self.parent[xroot] = yroot;
        } else {
            self.parent[yroot] = xroot;
            if self.rank[xroot] == self.rank[yroot] {
                self.rank[xroot] += 1;
            }
        }
        true
    }

    /// Return `true` if `x` and `y` are in the same set.
    pub fn same_set(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }
}

#[cfg(test)]
mod tests {
    use super::DisjointSet;

    #[test]
    fn test_singletons() {
        let mut sets = DisjointSet::new(5);
        assert_eq!(sets.len(), 5);
        for i in 0..5 {
            assert_eq!(sets.find(i), i);
        }
    }

    #[test]
    fn test_union_by_rank() {
        let mut sets = DisjointSet::new(4);
        assert!(sets.union(0, 1));
        // equal ranks: 1 goes below 0
        assert_eq!(sets.find(1), 0);
        assert!(sets.union(2, 0));
        // rank of {0,1} is larger, so 2 goes below 0
        assert_eq!(sets.find(2), 0);
        assert!(sets.union(3, 2));
        assert_eq!(sets.find(3), 0);
        assert!(!sets.union(1, 3));
    }

    #[test]
    fn test_path_compression() {
        let mut sets = DisjointSet::new(8);
        // build a tree of depth 3 rooted at 0
        sets.union(0, 1);
        sets.union(2, 3);
        sets.union(4, 5);
        sets.union(6, 7);
        sets.union(0, 2);
        sets.union(4, 6);
        sets.union(0, 4);
        assert_eq!(sets.parent[7], 6);
        assert_eq!(sets.parent[6], 4);

        assert_eq!(sets.find(7), 0);
        assert_eq!(sets.parent[7], 0);
        assert_eq!(sets.parent[6], 0);
    }

    #[test]
    fn test_components() {
        let pairs = [(0, 3), (3, 6), (1, 4), (7, 8), (8, 1)];
        let mut sets = DisjointSet::new(9);
        for &(x, y) in &pairs {
            sets.union(x, y);
        }
        let comps = [0, 1, 2, 0, 1, 5, 0, 1, 1];
        for x in 0..9 {
            for y in 0..9 {
                assert_eq!(sets.same_set(x, y), comps[x] == comps[y], "{} {}", x, y);
            }
        }
    }
}
