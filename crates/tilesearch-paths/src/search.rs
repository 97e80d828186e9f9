//! The best-first search loop shared by Dijkstra and A*.
//!
//! [`Search`] is a resumable state machine. Each call to
//! [`step`](Search::step) runs until the next observable event (a node
//! becoming active, opened, closed or marked on the path) and returns it, so
//! the caller decides the pacing. Between two steps the open and closed sets
//! are always consistent; dropping a `Search` at any point cancels it.

use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};

use crate::error::{ArgumentError, SearchError};
use crate::event::{Event, EventSink, NoopSink};
use crate::heuristic::{Heuristic, HeuristicKind};
use crate::path::{PathWalk, reconstruct};
use crate::record::{RecordTable, RecordView, Relaxation};
use crate::traits::{Edge, Graph};

/// Caller-selected behaviour of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOptions {
    /// Build the start→goal node sequence on success.
    pub collect_path: bool,
    /// Forward events to the sink passed to [`Search::run`].
    pub emit_events: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            collect_path: true,
            emit_events: true,
        }
    }
}

/// Outcome of a completed search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchResult<N> {
    /// The goal was reached. `path` runs start → goal and is empty when
    /// path collection was disabled.
    Found {
        path: Vec<N>,
        cost: f64,
        nodes_expanded: usize,
        elapsed_seconds: f64,
    },
    /// The open set ran dry without reaching the goal.
    NotFound {
        nodes_expanded: usize,
        elapsed_seconds: f64,
    },
}

impl<N> SearchResult<N> {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found { .. })
    }

    /// The path, start first. Empty when not found.
    pub fn path(&self) -> &[N] {
        match self {
            SearchResult::Found { path, .. } => path,
            SearchResult::NotFound { .. } => &[],
        }
    }

    /// Number of edges on the path.
    pub fn path_len(&self) -> usize {
        self.path().len().saturating_sub(1)
    }

    pub fn cost(&self) -> Option<f64> {
        match self {
            SearchResult::Found { cost, .. } => Some(*cost),
            SearchResult::NotFound { .. } => None,
        }
    }

    /// Size of open ∪ closed when the search ended.
    pub fn nodes_expanded(&self) -> usize {
        match self {
            SearchResult::Found { nodes_expanded, .. }
            | SearchResult::NotFound { nodes_expanded, .. } => *nodes_expanded,
        }
    }

    pub fn elapsed_seconds(&self) -> f64 {
        match self {
            SearchResult::Found {
                elapsed_seconds, ..
            }
            | SearchResult::NotFound {
                elapsed_seconds, ..
            } => *elapsed_seconds,
        }
    }
}

/// Where the state machine resumes on the next step.
#[derive(Debug)]
enum Phase<N> {
    /// Pick the best open record.
    Select,
    /// Relax the buffered edges of `current`, starting at `next_edge`.
    Expand { current: usize, next_edge: usize },
    /// Walk the path back from the goal record.
    Walk { goal: usize, walk: PathWalk<N> },
    Done,
}

/// A single in-flight search from `start` to `goal`.
pub struct Search<'g, G: Graph + ?Sized, H> {
    graph: &'g G,
    heuristic: H,
    start: G::Node,
    goal: G::Node,
    options: SearchOptions,
    table: RecordTable<G::Node>,
    edges: Vec<Edge<G::Node>>,
    phase: Phase<G::Node>,
    outcome: Option<Result<SearchResult<G::Node>, SearchError<G::Node>>>,
    elapsed: Duration,
}

impl<'g, G, H> Search<'g, G, H>
where
    G: Graph + ?Sized,
    H: Heuristic<G>,
{
    /// Validate the arguments and open the start record.
    pub fn new(
        graph: &'g G,
        start: G::Node,
        goal: G::Node,
        heuristic: H,
        options: SearchOptions,
    ) -> Result<Self, SearchError<G::Node>> {
        let t0 = Instant::now();
        if graph.node_count() == 0 {
            return Err(ArgumentError::EmptyGraph.into());
        }
        if !graph.contains(start) {
            return Err(ArgumentError::UnknownStart(start).into());
        }
        if !graph.contains(goal) {
            return Err(ArgumentError::UnknownGoal(goal).into());
        }
        debug!("search: {start:?} -> {goal:?}");

        let mut table = RecordTable::new();
        let h = heuristic.estimate(graph, start, start, goal);
        table.open_start(start, h);

        Ok(Self {
            graph,
            heuristic,
            start,
            goal,
            options,
            table,
            edges: Vec::with_capacity(8),
            phase: Phase::Select,
            outcome: None,
            elapsed: t0.elapsed(),
        })
    }

    /// Advance to the next event.
    ///
    /// Returns `Ok(None)` once the search is over; the outcome is then
    /// available from [`outcome`](Self::outcome). An error also ends the
    /// search.
    pub fn step(&mut self) -> Result<Option<Event<G::Node>>, SearchError<G::Node>> {
        let t0 = Instant::now();
        let r = self.advance();
        self.elapsed += t0.elapsed();
        if let Err(e) = &r {
            self.phase = Phase::Done;
            self.outcome = Some(Err(*e));
        }
        r
    }

    fn advance(&mut self) -> Result<Option<Event<G::Node>>, SearchError<G::Node>> {
        loop {
            match self.phase {
                Phase::Done => return Ok(None),
                Phase::Select => {
                    let Some(current) = self.table.pop_min() else {
                        self.conclude_not_found();
                        return Ok(None);
                    };
                    let node = self.table.get(current).node;
                    if node == self.goal {
                        if self.options.collect_path || self.options.emit_events {
                            self.phase = Phase::Walk {
                                goal: current,
                                walk: PathWalk::new(current, self.options.collect_path),
                            };
                        } else {
                            self.conclude_found(current, Vec::new());
                        }
                    } else {
                        self.edges.clear();
                        self.graph.neighbors(node, &mut self.edges);
                        self.phase = Phase::Expand {
                            current,
                            next_edge: 0,
                        };
                    }
                    return Ok(Some(Event::Active(node)));
                }
                Phase::Expand { current, next_edge } => {
                    if let Some(ev) = self.relax_from(current, next_edge)? {
                        return Ok(Some(ev));
                    }
                    let node = self.table.get(current).node;
                    self.table.close(current);
                    self.phase = Phase::Select;
                    return Ok(Some(Event::Closed(node)));
                }
                Phase::Walk {
                    goal,
                    ref mut walk,
                } => {
                    if let Some(node) = walk.advance(&self.table) {
                        return Ok(Some(Event::PathStep(node)));
                    }
                    let Phase::Walk { walk, .. } = std::mem::replace(&mut self.phase, Phase::Done)
                    else {
                        unreachable!()
                    };
                    self.conclude_found(goal, walk.into_path());
                }
            }
        }
    }

    /// Relax edges of `current` from index `from` on until one changes a
    /// record. Returns the resulting `Opened` event, or `None` when the
    /// edges are exhausted.
    fn relax_from(
        &mut self,
        current: usize,
        from: usize,
    ) -> Result<Option<Event<G::Node>>, SearchError<G::Node>> {
        let rec = self.table.get(current);
        let (node, cost_so_far) = (rec.node, rec.cost_so_far);

        for i in from..self.edges.len() {
            let edge = self.edges[i];
            if edge.cost.is_nan() || edge.cost < 0.0 {
                warn!(
                    "search: rejecting edge {node:?} -> {:?} with cost {}",
                    edge.to, edge.cost
                );
                return Err(SearchError::NegativeEdgeCost {
                    from: node,
                    to: edge.to,
                    cost: edge.cost,
                });
            }
            let tentative = cost_so_far + edge.cost;
            let (graph, heuristic, start, goal) = (self.graph, &self.heuristic, self.start, self.goal);
            let outcome = self.table.relax(current, edge.to, tentative, || {
                heuristic.estimate(graph, start, edge.to, goal)
            });
            match outcome {
                Relaxation::Skipped => continue,
                Relaxation::Reopened(_) => trace!("search: reopened {:?} at {tentative}", edge.to),
                Relaxation::Improved(_) => trace!("search: improved {:?} to {tentative}", edge.to),
                Relaxation::Discovered(_) => trace!("search: discovered {:?} at {tentative}", edge.to),
            }
            self.phase = Phase::Expand {
                current,
                next_edge: i + 1,
            };
            return Ok(Some(Event::Opened {
                node: edge.to,
                cost: tentative,
            }));
        }
        Ok(None)
    }

    fn nodes_expanded(&self) -> usize {
        self.table.open_len() + self.table.closed_len()
    }

    fn conclude_found(&mut self, goal: usize, path: Vec<G::Node>) {
        let cost = self.table.get(goal).cost_so_far;
        let nodes_expanded = self.nodes_expanded();
        let elapsed_seconds = self.elapsed.as_secs_f64();
        info!(
            "search: found path of length {} and cost {cost} ({nodes_expanded} nodes expanded, {elapsed_seconds:.6}s)",
            path.len().saturating_sub(1)
        );
        self.phase = Phase::Done;
        self.outcome = Some(Ok(SearchResult::Found {
            path,
            cost,
            nodes_expanded,
            elapsed_seconds,
        }));
    }

    fn conclude_not_found(&mut self) {
        let nodes_expanded = self.nodes_expanded();
        let elapsed_seconds = self.elapsed.as_secs_f64();
        info!(
            "search: failed, no path from {:?} to {:?} ({nodes_expanded} nodes expanded, {elapsed_seconds:.6}s)",
            self.start, self.goal
        );
        self.phase = Phase::Done;
        self.outcome = Some(Ok(SearchResult::NotFound {
            nodes_expanded,
            elapsed_seconds,
        }));
    }

    /// Drive the search to completion, forwarding events to `sink` when
    /// [`SearchOptions::emit_events`] is set.
    pub fn run<S>(mut self, sink: &mut S) -> Result<SearchResult<G::Node>, SearchError<G::Node>>
    where
        S: EventSink<G::Node> + ?Sized,
    {
        while let Some(ev) = self.step()? {
            if self.options.emit_events {
                sink.emit(&ev);
            }
        }
        self.finish()
    }

    /// Drive any remaining steps silently and return the outcome.
    pub fn finish(mut self) -> Result<SearchResult<G::Node>, SearchError<G::Node>> {
        while self.outcome.is_none() {
            self.step()?;
        }
        match self.outcome.take() {
            Some(outcome) => outcome,
            None => unreachable!("search loop ended without an outcome"),
        }
    }

    /// The outcome, once the search is over.
    pub fn outcome(&self) -> Option<&Result<SearchResult<G::Node>, SearchError<G::Node>>> {
        self.outcome.as_ref()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    #[inline]
    pub fn start(&self) -> G::Node {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> G::Node {
        self.goal
    }

    #[inline]
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    #[inline]
    pub fn open_len(&self) -> usize {
        self.table.open_len()
    }

    #[inline]
    pub fn closed_len(&self) -> usize {
        self.table.closed_len()
    }

    /// Time spent inside the engine so far, excluding time between steps.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Current record of `node`, if it has been discovered.
    pub fn record(&self, node: G::Node) -> Option<RecordView<G::Node>> {
        self.table.view(node)
    }

    /// Best route known so far from the start to a discovered `node`.
    pub fn path_to(&self, node: G::Node) -> Option<Vec<G::Node>> {
        let idx = self.table.index_of(node)?;
        Some(reconstruct(&self.table, idx))
    }
}

impl<G, H> Iterator for Search<'_, G, H>
where
    G: Graph + ?Sized,
    H: Heuristic<G>,
{
    type Item = Result<Event<G::Node>, SearchError<G::Node>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step().transpose()
    }
}

/// Search from `start` to `goal` with `heuristic`, discarding events.
pub fn search<G, H>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
    heuristic: H,
    options: SearchOptions,
) -> Result<SearchResult<G::Node>, SearchError<G::Node>>
where
    G: Graph + ?Sized,
    H: Heuristic<G>,
{
    Search::new(graph, start, goal, heuristic, options)?.run(&mut NoopSink)
}

/// Search from `start` to `goal`, forwarding events to `sink`.
pub fn search_with_sink<G, H, S>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
    heuristic: H,
    options: SearchOptions,
    sink: &mut S,
) -> Result<SearchResult<G::Node>, SearchError<G::Node>>
where
    G: Graph + ?Sized,
    H: Heuristic<G>,
    S: EventSink<G::Node> + ?Sized,
{
    Search::new(graph, start, goal, heuristic, options)?.run(sink)
}

/// Dijkstra's algorithm: the search with [`HeuristicKind::Zero`].
pub fn dijkstra<G>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
    options: SearchOptions,
) -> Result<SearchResult<G::Node>, SearchError<G::Node>>
where
    G: Graph + ?Sized,
{
    search(graph, start, goal, HeuristicKind::Zero, options)
}

/// A* with the [`HeuristicKind::Manhattan`] heuristic.
pub fn astar<G>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
    options: SearchOptions,
) -> Result<SearchResult<G::Node>, SearchError<G::Node>>
where
    G: Graph + ?Sized,
{
    search(graph, start, goal, HeuristicKind::Manhattan, options)
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use tilesearch_core::{Point, TileMap};

    #[test]
    fn result_round_trip() {
        let map = TileMap::new(3, 3, 1.0);
        let r = astar(&map, Point::new(0, 0), Point::new(2, 1), SearchOptions::default()).unwrap();
        let json = serde_json::to_string(&r).unwrap();
        let back: SearchResult<Point> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn options_and_kind_round_trip() {
        let o = SearchOptions {
            collect_path: false,
            emit_events: true,
        };
        let back: SearchOptions = serde_json::from_str(&serde_json::to_string(&o).unwrap()).unwrap();
        assert_eq!(back, o);
        let k: HeuristicKind = serde_json::from_str("\"CrossProduct\"").unwrap();
        assert_eq!(k, HeuristicKind::CrossProduct);
    }
}
