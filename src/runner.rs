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

//! Run algorithms on a worker thread.
//!
//! A [`Runner`] owns a graph. Starting an algorithm moves the graph to a
//! worker thread, which sends every [`StepEvent`] through a channel to the
//! consumer. As long as the run has not been waited for, the graph cannot be
//! accessed or modified, so at most one run works on a graph at any time.
//!
//! The worker sends events as fast as they are computed. Showing them at a
//! certain pace is up to the consumer, see [`Pacing`].
//!
//! # Example
//!
//! ```
//! use rs_graph_steps::classes::spanning_tree_example;
//! use rs_graph_steps::runner::{Algorithm, Outcome, Runner};
//!
//! let mut runner = Runner::new(spanning_tree_example::<i64>());
//! runner.start(Algorithm::FrontierMst { start: "A".to_string() }).unwrap();
//! let events: Vec<_> = runner.events().unwrap().iter().collect();
//! assert_eq!(events.len(), 15);
//!
//! match runner.wait().unwrap() {
//!     Some(Outcome::Prim(result)) => assert_eq!(result.tree.total, 22),
//!     _ => unreachable!(),
//! }
//! assert!(runner.graph().is_some());
//! ```

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, Node, Weight};
use crate::mst::{Kruskal, KruskalResult, Prim, PrimResult};
use crate::shortestpath::{Dijkstra, ShortestPaths};
use crate::step::{Pace, StepEvent};

use crossbeam::channel::{bounded, unbounded, Receiver, SendError, SendTimeoutError, Sender};
use log::{debug, error, warn};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Interval at which a worker blocked on a full channel checks for
/// cancellation.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// The algorithm to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Algorithm {
    /// Dijkstra's shortest path algorithm from the given node.
    ShortestPath { start: String },
    /// Prim's spanning tree algorithm from the given node.
    FrontierMst { start: String },
    /// Kruskal's spanning tree algorithm.
    GlobalSortMst,
}

/// The final result of a completed run.
#[derive(Clone, Debug)]
pub enum Outcome<W> {
    ShortestPaths(ShortestPaths<W>),
    Prim(PrimResult<W>),
    Kruskal(KruskalResult<Edge, W>),
}

/// Configuration of a [`Runner`].
#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// Capacity of the event channel, unbounded if `None`.
    ///
    /// With a bounded channel the worker waits until the consumer has
    /// received enough events, so the events must be received while the run
    /// is in progress.
    pub channel_capacity: Option<usize>,
    /// Name of the worker thread.
    pub thread_name: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            channel_capacity: None,
            thread_name: "graph-steps".to_string(),
        }
    }
}

/// The resolved algorithm handed to the worker.
#[derive(Clone, Copy, Debug)]
enum Job {
    ShortestPath(Node),
    FrontierMst(Node),
    GlobalSortMst,
}

struct Worker<W> {
    handle: JoinHandle<(Graph<W>, Option<Outcome<W>>)>,
    cancel: Arc<AtomicBool>,
}

/// Runs algorithms on a graph in a background thread.
pub struct Runner<W>
where
    W: Weight + Send + 'static,
{
    config: RunnerConfig,
    /// The graph, `None` while a worker owns it.
    graph: Option<Graph<W>>,
    worker: Option<Worker<W>>,
    /// Receiving end of the channel of the last run.
    events: Option<Receiver<StepEvent<W>>>,
}

impl<W> Runner<W>
where
    W: Weight + Send + 'static,
{
    /// Create a runner with the default configuration.
    pub fn new(graph: Graph<W>) -> Self {
        Runner::with_config(graph, RunnerConfig::default())
    }

    pub fn with_config(graph: Graph<W>, config: RunnerConfig) -> Self {
        Runner {
            config,
            graph: Some(graph),
            worker: None,
            events: None,
        }
    }

    /// Return the graph, or `None` while a run is in progress.
    pub fn graph(&self) -> Option<&Graph<W>> {
        self.graph.as_ref()
    }

    /// Return the graph for modification.
    ///
    /// Fails with [`Error::Busy`] while a run is in progress.
    pub fn graph_mut(&mut self) -> Result<&mut Graph<W>> {
        self.graph.as_mut().ok_or(Error::Busy)
    }

    /// Return `true` if a run has been started and not yet waited for.
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Return `true` if the worker has stopped computing.
    ///
    /// The run must still be completed by [`Runner::wait`].
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().map_or(true, |w| w.handle.is_finished())
    }

    /// Return the events of the current (or last) run.
    ///
    /// The channel is closed when the worker has stopped, so iterating the
    /// receiver ends with the last event of the run.
    pub fn events(&self) -> Option<&Receiver<StepEvent<W>>> {
        self.events.as_ref()
    }

    /// Start an algorithm run.
    ///
    /// The start node is checked before anything else happens: if it does
    /// not exist, [`Error::UnknownNode`] is returned and the runner is
    /// unchanged. Fails with [`Error::Busy`] if another run is in progress.
    pub fn start(&mut self, algorithm: Algorithm) -> Result<()> {
        let graph = match self.graph {
            Some(ref graph) if self.worker.is_none() => graph,
            _ => return Err(Error::Busy),
        };
        let job = match algorithm {
            Algorithm::ShortestPath { ref start } => Job::ShortestPath(graph.require(start)?),
            Algorithm::FrontierMst { ref start } => Job::FrontierMst(graph.require(start)?),
            Algorithm::GlobalSortMst => Job::GlobalSortMst,
        };

        let (tx, rx) = match self.config.channel_capacity {
            Some(cap) => bounded(cap),
            None => unbounded(),
        };
        let cancel = Arc::new(AtomicBool::new(false));

        // The graph is handed over only after the thread exists.
        let (graphtx, graphrx) = bounded::<Graph<W>>(1);
        let flag = cancel.clone();
        let handle = thread::Builder::new()
            .name(self.config.thread_name.clone())
            .spawn(move || {
                let mut graph = graphrx.recv().unwrap_or_default();
                let outcome = execute(&mut graph, job, &tx, &flag);
                (graph, outcome)
            })?;

        let graph = self.graph.take().ok_or(Error::Busy)?;
        if let Err(SendError(graph)) = graphtx.send(graph) {
            self.graph = Some(graph);
            let _ = handle.join();
            return Err(Error::WorkerPanicked);
        }

        debug!("Started {:?} on thread '{}'", job, self.config.thread_name);
        self.events = Some(rx);
        self.worker = Some(Worker { handle, cancel });
        Ok(())
    }

    /// Request the current run to stop.
    ///
    /// Events still waiting in the channel are discarded. The worker checks
    /// the request before sending each event, so at most the event it is
    /// sending at this moment may still arrive, and [`Runner::wait`] discards
    /// that one as well. Does nothing if no run is in progress.
    pub fn cancel(&self) {
        if let Some(ref worker) = self.worker {
            worker.cancel.store(true, Ordering::SeqCst);
            self.discard_events();
        }
    }

    /// Wait for the current run to stop and take back the graph.
    ///
    /// Returns the outcome of the run or `None` if it has been cancelled.
    /// Fails with [`Error::Idle`] if no run has been started. If the worker
    /// panicked, [`Error::WorkerPanicked`] is returned and the runner holds an
    /// empty graph afterwards.
    pub fn wait(&mut self) -> Result<Option<Outcome<W>>> {
        let worker = self.worker.take().ok_or(Error::Idle)?;
        match worker.handle.join() {
            Ok((graph, outcome)) => {
                self.graph = Some(graph);
                if outcome.is_none() {
                    warn!("Run has been cancelled");
                    self.discard_events();
                }
                Ok(outcome)
            }
            Err(_) => {
                error!("Worker thread panicked, the graph is lost");
                self.graph = Some(Graph::new());
                Err(Error::WorkerPanicked)
            }
        }
    }

    fn discard_events(&self) {
        if let Some(ref rx) = self.events {
            let n = rx.try_iter().count();
            if n > 0 {
                debug!("Discarded {} events of a cancelled run", n);
            }
        }
    }

    /// Clear the transient algorithm state of the graph.
    ///
    /// Fails with [`Error::Busy`] while a run is in progress.
    pub fn reset(&mut self) -> Result<()> {
        self.graph_mut()?.reset();
        Ok(())
    }

    /// Return the graph, cancelling a run in progress.
    pub fn into_graph(mut self) -> Result<Graph<W>> {
        if self.worker.is_some() {
            self.cancel();
            self.wait()?;
        }
        self.graph.take().ok_or(Error::Busy)
    }
}

impl<W> Drop for Runner<W>
where
    W: Weight + Send + 'static,
{
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.cancel.store(true, Ordering::SeqCst);
            let _ = worker.handle.join();
        }
    }
}

/// Run `job` on the worker thread.
///
/// Returns `None` if the run has been cancelled.
fn execute<W>(graph: &mut Graph<W>, job: Job, tx: &Sender<StepEvent<W>>, cancel: &AtomicBool) -> Option<Outcome<W>>
where
    W: Weight,
{
    match job {
        Job::ShortestPath(src) => {
            let mut steps = Dijkstra::new(graph, src);
            forward(&mut steps, tx, cancel).then(|| Outcome::ShortestPaths(steps.finish()))
        }
        Job::FrontierMst(src) => {
            let mut steps = Prim::new(graph, src);
            forward(&mut steps, tx, cancel).then(|| Outcome::Prim(steps.finish()))
        }
        Job::GlobalSortMst => {
            let mut steps = Kruskal::new(graph);
            forward(&mut steps, tx, cancel).then(|| Outcome::Kruskal(steps.finish()))
        }
    }
}

/// Send all steps to the channel.
///
/// Returns `false` if the run has been cancelled. If the consumer has dropped
/// the receiver, the remaining steps are not sent but the run continues.
fn forward<W, I>(steps: &mut I, tx: &Sender<StepEvent<W>>, cancel: &AtomicBool) -> bool
where
    I: Iterator<Item = StepEvent<W>>,
{
    for mut step in steps {
        loop {
            if cancel.load(Ordering::SeqCst) {
                return false;
            }
            match tx.send_timeout(step, POLL_INTERVAL) {
                Ok(()) => break,
                Err(SendTimeoutError::Timeout(s)) => step = s,
                Err(SendTimeoutError::Disconnected(_)) => {
                    debug!("Event receiver has been dropped");
                    return true;
                }
            }
        }
    }
    !cancel.load(Ordering::SeqCst)
}

/// Presentation pacing of step events.
///
/// Translates the [`Pace`] hint of an event into the time the consumer
/// should wait before showing the next step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    /// The full delay.
    pub step: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing {
            step: Duration::from_millis(1000),
        }
    }
}

impl Pacing {
    /// Slowest speed value.
    pub const MIN_SPEED: u64 = 100;
    /// Fastest speed value.
    pub const MAX_SPEED: u64 = 2000;

    /// Create a pacing from a speed value.
    ///
    /// The speed is clamped to `MIN_SPEED..=MAX_SPEED`, the full delay is
    /// `2100 - speed` milliseconds.
    ///
    /// # Example
    ///
    /// ```
    /// use rs_graph_steps::runner::Pacing;
    /// use std::time::Duration;
    ///
    /// assert_eq!(Pacing::from_speed(1100).step, Duration::from_millis(1000));
    /// assert_eq!(Pacing::from_speed(5000).step, Duration::from_millis(100));
    /// ```
    pub fn from_speed(speed: u64) -> Pacing {
        let speed = speed.max(Self::MIN_SPEED).min(Self::MAX_SPEED);
        Pacing {
            step: Duration::from_millis(Self::MAX_SPEED + 100 - speed),
        }
    }

    /// Return the delay after `event`.
    pub fn delay<W>(&self, event: &StepEvent<W>) -> Duration {
        match event.pace() {
            Pace::Full => self.step,
            Pace::Half => self.step / 2,
            Pace::None => Duration::from_millis(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Algorithm, Outcome, Pacing, Runner, RunnerConfig};
    use crate::classes::{complete, shortest_path_example, spanning_tree_example};
    use crate::error::Error;
    use crate::graph::Distance;
    use crate::mst::kruskal;
    use crate::shortestpath::dijkstra;
    use crate::step::StepEvent;

    use std::time::Duration;

    #[test]
    fn test_shortest_path_events() {
        let mut g = shortest_path_example::<i64>();
        let (_, expected) = dijkstra::run(&mut g, "A").unwrap();

        let mut runner = Runner::new(shortest_path_example::<i64>());
        runner
            .start(Algorithm::ShortestPath { start: "A".to_string() })
            .unwrap();
        let events: Vec<_> = runner.events().unwrap().iter().collect();
        assert_eq!(events, expected);

        let paths = match runner.wait().unwrap() {
            Some(Outcome::ShortestPaths(paths)) => paths,
            _ => panic!("expected shortest paths"),
        };
        assert_eq!(paths.get("D").unwrap().distance, Distance::Finite(22));

        let g = runner.graph().unwrap();
        assert!(g.nodes().all(|u| g.is_visited(u)));
    }

    #[test]
    fn test_kruskal() {
        let mut runner = Runner::new(spanning_tree_example::<i64>());
        runner.start(Algorithm::GlobalSortMst).unwrap();
        match runner.wait().unwrap() {
            Some(Outcome::Kruskal(result)) => {
                assert!(result.is_spanning());
                assert_eq!(result.tree().total, 22);
            }
            _ => panic!("expected kruskal result"),
        }
        // events stay available after waiting
        assert_eq!(runner.events().unwrap().iter().count(), 14);
    }

    #[test]
    fn test_busy() {
        let mut runner = Runner::with_config(
            spanning_tree_example::<i64>(),
            RunnerConfig {
                channel_capacity: Some(1),
                ..RunnerConfig::default()
            },
        );
        runner.start(Algorithm::GlobalSortMst).unwrap();
        assert!(runner.is_running());
        assert!(runner.graph().is_none());
        assert!(matches!(runner.graph_mut(), Err(Error::Busy)));
        assert!(matches!(runner.reset(), Err(Error::Busy)));
        assert!(matches!(runner.start(Algorithm::GlobalSortMst), Err(Error::Busy)));

        let n = runner.events().unwrap().iter().count();
        assert_eq!(n, 14);
        assert!(runner.wait().unwrap().is_some());
        assert!(!runner.is_running());
        assert!(runner.graph_mut().is_ok());
    }

    #[test]
    fn test_unknown_start() {
        let mut runner = Runner::new(spanning_tree_example::<i64>());
        let res = runner.start(Algorithm::FrontierMst { start: "Z".to_string() });
        assert!(matches!(res, Err(Error::UnknownNode(_))));
        assert!(!runner.is_running());
        assert!(runner.graph().is_some());
        assert!(runner.events().is_none());
    }

    #[test]
    fn test_wait_idle() {
        let mut runner = Runner::new(spanning_tree_example::<i64>());
        assert!(matches!(runner.wait(), Err(Error::Idle)));
    }

    #[test]
    fn test_cancel() {
        let g = complete(40, |u, v| (u * 7 + v * 13) as i64 % 50 + 1).unwrap();
        let num_edges = g.num_edges();
        let mut runner = Runner::with_config(
            g,
            RunnerConfig {
                channel_capacity: Some(1),
                thread_name: "cancel-test".to_string(),
            },
        );
        runner
            .start(Algorithm::ShortestPath { start: "1".to_string() })
            .unwrap();

        let first = runner.events().unwrap().recv().unwrap();
        assert!(matches!(first, StepEvent::NodeVisited { .. }));
        runner.cancel();
        assert!(runner.wait().unwrap().is_none());

        // nothing is delivered after cancelling
        assert_eq!(runner.events().unwrap().try_iter().count(), 0);
        let g = runner.graph().unwrap();
        assert_eq!(g.num_edges(), num_edges);

        runner.reset().unwrap();
        let g = runner.graph().unwrap();
        assert!(g.nodes().all(|u| !g.is_visited(u) && g.distance(u) == Distance::Infinite));
    }

    #[test]
    fn test_cancel_discards_queued_events() {
        let mut runner = Runner::with_config(
            spanning_tree_example::<i64>(),
            RunnerConfig {
                channel_capacity: Some(4),
                ..RunnerConfig::default()
            },
        );
        runner.start(Algorithm::GlobalSortMst).unwrap();

        // let the worker fill the channel
        while runner.events().unwrap().len() < 4 {
            std::thread::sleep(Duration::from_millis(1));
        }
        runner.cancel();
        assert!(runner.events().unwrap().len() <= 1);

        assert!(runner.wait().unwrap().is_none());
        assert!(runner.events().unwrap().is_empty());
        assert_eq!(runner.events().unwrap().iter().count(), 0);
    }

    #[test]
    fn test_into_graph() {
        let mut runner = Runner::new(spanning_tree_example::<i64>());
        runner.start(Algorithm::FrontierMst { start: "G".to_string() }).unwrap();
        let outcome = runner.wait().unwrap();
        assert!(matches!(outcome, Some(Outcome::Prim(ref r)) if r.tree.total == 22));

        let mut g = runner.into_graph().unwrap();
        let (result, _) = kruskal::run(&mut g);
        assert_eq!(result.tree().total, 22);
    }

    #[test]
    fn test_pacing() {
        let pacing = Pacing::default();
        let g = spanning_tree_example::<i64>();
        let a = g.node("A").unwrap();
        let e = g.edges().next().unwrap();

        assert_eq!(pacing.delay(&StepEvent::<i64>::NodeAdded { node: a }), Duration::from_millis(1000));
        assert_eq!(pacing.delay(&StepEvent::<i64>::EdgeRejected { edge: e }), Duration::from_millis(500));
        assert_eq!(
            pacing.delay(&StepEvent::RelaxationRejected {
                edge: e,
                node: a,
                candidate: 3i64
            }),
            Duration::from_millis(0)
        );

        assert_eq!(Pacing::from_speed(0).step, Duration::from_millis(2000));
        assert_eq!(Pacing::from_speed(2000).step, Duration::from_millis(100));
    }
}
