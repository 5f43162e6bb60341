// Copyright (c) 2016-2021, 2026 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Some common graph classes.
//!
//! The generated graphs have the labels `"1"` to `"n"`, the weight of each
//! edge is given by a callback receiving the (0-based) indices of its end
//! points.

use crate::error::Result;
use crate::graph::{Graph, Weight};

/// Build a graph from a fixed edge list on known valid labels.
fn fixed<W>(labels: &[&str], edges: &[(&str, &str, u8)]) -> Graph<W>
where
    W: Weight + From<u8>,
{
    let mut g = Graph::new();
    for &label in labels {
        g.add_node(label).expect("labels are distinct");
    }
    for &(u, v, weight) in edges {
        g.add_edge(u, v, <W as From<u8>>::from(weight)).expect("edges are valid");
    }
    g
}

/// Returns the shortest path example graph on the nodes `A` to `F`.
///
/// The shortest distances from `A` are `B: 7`, `C: 9`, `D: 22`, `E: 20` and
/// `F: 11`.
pub fn shortest_path_example<W>() -> Graph<W>
where
    W: Weight + From<u8>,
{
    fixed(
        &["A", "B", "C", "D", "E", "F"],
        &[
            ("A", "B", 7),
            ("A", "C", 9),
            ("A", "F", 14),
            ("B", "C", 10),
            ("B", "D", 15),
            ("C", "E", 11),
            ("C", "F", 2),
            ("D", "E", 6),
            ("E", "F", 9),
        ],
    )
}

/// Returns the spanning tree example graph on the nodes `A` to `G`.
///
/// Its minimum spanning tree has weight 22.
pub fn spanning_tree_example<W>() -> Graph<W>
where
    W: Weight + From<u8>,
{
    fixed(
        &["A", "B", "C", "D", "E", "F", "G"],
        &[
            ("A", "B", 4),
            ("A", "D", 3),
            ("B", "C", 5),
            ("B", "E", 2),
            ("C", "F", 6),
            ("D", "E", 4),
            ("D", "G", 7),
            ("E", "F", 3),
            ("E", "G", 5),
            ("F", "G", 8),
        ],
    )
}

fn with_nodes<W>(n: usize) -> Result<Graph<W>>
where
    W: Weight,
{
    let mut g = Graph::new();
    for i in 1..=n {
        g.add_node(i.to_string())?;
    }
    Ok(g)
}

fn add_edge<W>(g: &mut Graph<W>, u: usize, v: usize, weight: W) -> Result<()>
where
    W: Weight,
{
    g.add_edge(&(u + 1).to_string(), &(v + 1).to_string(), weight)?;
    Ok(())
}

/// Returns a path on `n` nodes.
///
/// Fails if some weight is not positive.
pub fn path<W, F>(n: usize, weight: F) -> Result<Graph<W>>
where
    W: Weight,
    F: Fn(usize, usize) -> W,
{
    let mut g = with_nodes(n)?;
    for u in 1..n {
        add_edge(&mut g, u - 1, u, weight(u - 1, u))?;
    }
    Ok(g)
}

/// Returns a cycle of length `n`.
///
/// For `n < 3` the cycle degenerates to a path because the graphs are simple.
pub fn cycle<W, F>(n: usize, weight: F) -> Result<Graph<W>>
where
    W: Weight,
    F: Fn(usize, usize) -> W,
{
    let mut g = path(n, &weight)?;
    if n >= 3 {
        add_edge(&mut g, n - 1, 0, weight(n - 1, 0))?;
    }
    Ok(g)
}

/// Returns the complete graph on `n` nodes.
///
/// # Example
///
/// ```
/// use rs_graph_steps::classes::complete;
///
/// let g = complete(5, |u, v| (u + v + 1) as u32).unwrap();
/// assert_eq!(g.num_nodes(), 5);
/// assert_eq!(g.num_edges(), 10);
/// ```
pub fn complete<W, F>(n: usize, weight: F) -> Result<Graph<W>>
where
    W: Weight,
    F: Fn(usize, usize) -> W,
{
    let mut g = with_nodes(n)?;
    for u in 0..n {
        for v in u + 1..n {
            add_edge(&mut g, u, v, weight(u, v))?;
        }
    }
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_examples() {
        let g = shortest_path_example::<i64>();
        assert_eq!(g.num_nodes(), 6);
        assert_eq!(g.num_edges(), 9);

        let g = spanning_tree_example::<u16>();
        assert_eq!(g.num_nodes(), 7);
        assert_eq!(g.num_edges(), 10);
        let total: u16 = g.edges().map(|e| g.weight(e)).sum();
        assert_eq!(total, 47);
    }

    #[test]
    fn test_example_weights() {
        // any integer type with a lossless conversion from `u8`
        let g = shortest_path_example::<u8>();
        let a = g.node("A").unwrap();
        let f = g.node("F").unwrap();
        assert_eq!(g.weight(g.edge_between(a, f).unwrap()), 14u8);

        let g = spanning_tree_example::<i32>();
        let f = g.node("F").unwrap();
        let gg = g.node("G").unwrap();
        assert_eq!(g.weight(g.edge_between(f, gg).unwrap()), 8i32);
    }

    #[test]
    fn test_path() {
        let g = path(4, |u, v| (u * v + 1) as i64).unwrap();
        assert_eq!(g.num_nodes(), 4);
        assert_eq!(g.num_edges(), 3);
        let u = g.node("2").unwrap();
        let v = g.node("3").unwrap();
        assert_eq!(g.weight(g.edge_between(u, v).unwrap()), 3);
    }

    #[test]
    fn test_cycle() {
        let g = cycle(5, |_, _| 1i64).unwrap();
        assert_eq!(g.num_edges(), 5);
        assert!(g.nodes().all(|u| g.neighs(u).count() == 2));

        let g = cycle(2, |_, _| 1i64).unwrap();
        assert_eq!(g.num_edges(), 1);
    }

    #[test]
    fn test_complete() {
        let g = complete(6, |_, _| 2i64).unwrap();
        assert_eq!(g.num_edges(), 15);
        assert!(g.nodes().all(|u| g.neighs(u).count() == 5));
        assert!(complete(0, |_, _| 1i64).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_weight() {
        assert!(matches!(path(3, |_, _| 0i64), Err(Error::InvalidWeight(_))));
    }
}
