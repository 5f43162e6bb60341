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

use rs_graph_steps::batch::Session;
use rustop::opts;

use std::fs::File;
use std::io::{self, BufReader};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let (args, _) = opts! {
        synopsis "Compute a minimum spanning tree with Kruskal's algorithm.";
        opt quiet:bool, desc:"Do not print prompts.";
        param file:Option<String>, desc:"Input file (default: standard input)";
    }
    .parse_or_exit();

    let stdout = io::stdout();
    let output = stdout.lock();
    match args.file {
        Some(ref file) => {
            let input = BufReader::new(File::open(file)?);
            Session::new(input, output).quiet(args.quiet).run()?
        }
        None => {
            let stdin = io::stdin();
            let input = stdin.lock();
            Session::new(input, output).quiet(args.quiet).run()?
        }
    }

    Ok(())
}
