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

//! Interactive text interface of Kruskal's algorithm.
//!
//! The session reads the number of vertices, the number of edges and then
//! each edge as `origin destination weight` with vertices numbered from 1,
//! one value (or edge) per line. Invalid input is reported by an `ERROR:`
//! line and the same value is asked for again.
//!
//! # Example
//!
//! ```
//! use rs_graph_steps::batch::Session;
//!
//! let input = "3\n2\n1 2 5\n3 2 1\n";
//! let mut output = vec![];
//! Session::new(input.as_bytes(), &mut output).quiet(true).run().unwrap();
//!
//! assert_eq!(
//!     String::from_utf8(output).unwrap(),
//!     "\n=== MINIMUM SPANNING TREE ===\n\
//!      Vertex 3 -- Vertex 2 : Weight 1\n\
//!      Vertex 1 -- Vertex 2 : Weight 5\n\
//!      Total MST weight: 6\n"
//! );
//! ```

use crate::error::{Error, Result};
use crate::mst::kruskal::{self, KruskalResult};

use log::debug;

use std::io::{self, BufRead, Write};

/// Run an interactive session with prompts.
pub fn run<R, O>(input: R, output: O) -> Result<()>
where
    R: BufRead,
    O: Write,
{
    Session::new(input, output).run()
}

/// An edge as entered, vertices are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct InputEdge {
    origin: usize,
    destination: usize,
    weight: i64,
}

/// A session of the text interface.
pub struct Session<R, O> {
    input: R,
    output: O,
    prompts: bool,
    line: String,
}

impl<R, O> Session<R, O>
where
    R: BufRead,
    O: Write,
{
    pub fn new(input: R, output: O) -> Self {
        Session {
            input,
            output,
            prompts: true,
            line: String::new(),
        }
    }

    /// Suppress the prompts, only errors and the result are written.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.prompts = !quiet;
        self
    }

    /// Read the graph, compute the minimum spanning tree and write it.
    ///
    /// Fails with an I/O error of kind `UnexpectedEof` if the input ends
    /// before all values have been read.
    pub fn run(mut self) -> Result<()> {
        let num_vertices = self.read_count("Enter the number of vertices: ", 1)?;
        let num_edges = self.read_count("Enter the number of edges: ", 0)?;

        if self.prompts {
            writeln!(self.output, "Enter edges as: origin destination weight")?;
            writeln!(self.output, "(vertices are numbered 1 to {})", num_vertices)?;
        }
        let mut edges = Vec::new();
        for i in 1..=num_edges {
            edges.push(self.read_edge(i, num_vertices)?);
        }
        debug!("Read {} vertices and {} edges", num_vertices, edges.len());

        let triples: Vec<_> = edges
            .iter()
            .map(|e| (e.origin - 1, e.destination - 1, e.weight))
            .collect();
        writeln!(self.output, "\n=== MINIMUM SPANNING TREE ===")?;
        let result = match kruskal::solve(num_vertices, &triples) {
            Ok(result) => result,
            Err(Error::WeightOverflow) => {
                self.error("the total weight is out of range")?;
                self.output.flush()?;
                return Ok(());
            }
            Err(err) => return Err(err),
        };
        match result {
            KruskalResult::Spanning(tree) => {
                for &i in &tree.edges {
                    let e = edges[i];
                    writeln!(
                        self.output,
                        "Vertex {} -- Vertex {} : Weight {}",
                        e.origin, e.destination, e.weight
                    )?;
                }
                writeln!(self.output, "Total MST weight: {}", tree.total)?;
            }
            KruskalResult::Disconnected(_) => {
                writeln!(self.output, "Disconnected graph! No spanning tree can be formed.")?;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn prompt(&mut self, prompt: &str) -> Result<()> {
        if self.prompts {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;
        }
        Ok(())
    }

    fn error(&mut self, msg: &str) -> Result<()> {
        writeln!(self.output, "ERROR: {}", msg)?;
        Ok(())
    }

    /// Read the next line and parse it as exactly `n` integers.
    ///
    /// Returns `None` if the line is malformed.
    fn read_numbers(&mut self, n: usize) -> Result<Option<Vec<i64>>> {
        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "unexpected end of input").into());
        }
        let nums = self
            .line
            .split_whitespace()
            .map(|tok| tok.parse::<i64>().ok())
            .collect::<Option<Vec<_>>>();
        Ok(nums.filter(|nums| nums.len() == n))
    }

    /// Read a count of at least `min`.
    fn read_count(&mut self, prompt: &str, min: i64) -> Result<usize> {
        loop {
            self.prompt(prompt)?;
            match self.read_numbers(1)? {
                Some(nums) if nums[0] >= min => return Ok(nums[0] as usize),
                Some(_) if min > 0 => self.error("the number must be positive")?,
                Some(_) => self.error("the number must not be negative")?,
                None => self.error("expected a single integer")?,
            }
        }
    }

    /// Read the `i`-th edge.
    fn read_edge(&mut self, i: usize, num_vertices: usize) -> Result<InputEdge> {
        let in_range = |v: i64| v >= 1 && v as u64 <= num_vertices as u64;
        loop {
            self.prompt(&format!("Edge {}: ", i))?;
            match self.read_numbers(3)? {
                Some(nums) if in_range(nums[0]) && in_range(nums[1]) => {
                    return Ok(InputEdge {
                        origin: nums[0] as usize,
                        destination: nums[1] as usize,
                        weight: nums[2],
                    })
                }
                Some(_) => self.error(&format!("vertices must be between 1 and {}", num_vertices))?,
                None => self.error("expected three integers: origin destination weight")?,
            }
        }
    }
}
