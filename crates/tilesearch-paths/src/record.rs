//! Per-search node records and the open/closed partition over them.
//!
//! Records live in an arena indexed by `usize`; predecessor links are arena
//! indices, so re-opening a record and changing its predecessor never
//! invalidates anything. Every discovered node has exactly one record, and
//! that record is either open or closed.

use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

/// Which side of the open/closed partition a record is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordState {
    Open,
    Closed,
}

#[derive(Debug, Clone)]
pub(crate) struct NodeRecord<N> {
    pub(crate) node: N,
    pub(crate) cost_so_far: f64,
    pub(crate) estimated_total_cost: f64,
    pub(crate) predecessor: Option<usize>,
    pub(crate) state: RecordState,
    /// Open-insertion order, used to break ties between equal estimates.
    pub(crate) seq: u64,
    /// Bumped on every push; heap entries with an older stamp are stale.
    pub(crate) stamp: u32,
}

impl<N> NodeRecord<N> {
    /// Heuristic value folded into the estimate.
    #[inline]
    pub(crate) fn heuristic(&self) -> f64 {
        self.estimated_total_cost - self.cost_so_far
    }
}

/// Read-only snapshot of a node record, for inspecting a paused search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordView<N> {
    pub node: N,
    pub cost_so_far: f64,
    pub estimated_total_cost: f64,
    pub predecessor: Option<N>,
    pub state: RecordState,
}

/// Heap entry pointing into the arena, popped by smallest estimate, then
/// smallest insertion sequence.
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f: f64,
    seq: u64,
    idx: usize,
    stamp: u32,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// What a relaxation did to the neighbour's record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Relaxation {
    /// The route was no cheaper than the known one.
    Skipped,
    /// First time this node was seen.
    Discovered(usize),
    /// An open record got a cheaper route.
    Improved(usize),
    /// A closed record got a cheaper route and went back to open.
    Reopened(usize),
}

/// Arena of node records plus the open frontier and closed accounting.
#[derive(Debug)]
pub(crate) struct RecordTable<N> {
    records: Vec<NodeRecord<N>>,
    index: HashMap<N, usize>,
    open: BinaryHeap<OpenEntry>,
    open_len: usize,
    closed_len: usize,
    next_seq: u64,
}

impl<N: Copy + Eq + Hash> RecordTable<N> {
    pub(crate) fn new() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            open: BinaryHeap::new(),
            open_len: 0,
            closed_len: 0,
            next_seq: 0,
        }
    }

    /// Open the start record: cost 0, no predecessor.
    pub(crate) fn open_start(&mut self, node: N, heuristic: f64) -> usize {
        debug_assert!(self.records.is_empty());
        let idx = self.push_record(node);
        self.assign(idx, 0.0, None, heuristic);
        idx
    }

    fn push_record(&mut self, node: N) -> usize {
        let idx = self.records.len();
        self.records.push(NodeRecord {
            node,
            cost_so_far: f64::INFINITY,
            estimated_total_cost: f64::INFINITY,
            predecessor: None,
            state: RecordState::Open,
            seq: self.next_seq,
            stamp: 0,
        });
        self.next_seq += 1;
        self.index.insert(node, idx);
        self.open_len += 1;
        idx
    }

    fn assign(&mut self, idx: usize, cost: f64, predecessor: Option<usize>, heuristic: f64) {
        let rec = &mut self.records[idx];
        rec.cost_so_far = cost;
        rec.predecessor = predecessor;
        rec.estimated_total_cost = cost + heuristic;
        rec.stamp = rec.stamp.wrapping_add(1);
        self.open.push(OpenEntry {
            f: rec.estimated_total_cost,
            seq: rec.seq,
            idx,
            stamp: rec.stamp,
        });
    }

    /// Offer `to` a route through `from` costing `tentative` in total.
    ///
    /// A known record only changes if the route is strictly cheaper; it then
    /// keeps its previously computed heuristic. `fresh_heuristic` is only
    /// called for nodes seen for the first time.
    pub(crate) fn relax(
        &mut self,
        from: usize,
        to: N,
        tentative: f64,
        fresh_heuristic: impl FnOnce() -> f64,
    ) -> Relaxation {
        let (idx, heuristic, outcome) = match self.index_of(to) {
            Some(idx) => {
                let rec = &mut self.records[idx];
                if tentative >= rec.cost_so_far {
                    return Relaxation::Skipped;
                }
                let heuristic = rec.heuristic();
                match rec.state {
                    RecordState::Closed => {
                        rec.state = RecordState::Open;
                        rec.seq = self.next_seq;
                        self.next_seq += 1;
                        self.closed_len -= 1;
                        self.open_len += 1;
                        (idx, heuristic, Relaxation::Reopened(idx))
                    }
                    RecordState::Open => (idx, heuristic, Relaxation::Improved(idx)),
                }
            }
            None => {
                let idx = self.push_record(to);
                (idx, fresh_heuristic(), Relaxation::Discovered(idx))
            }
        };
        self.assign(idx, tentative, Some(from), heuristic);
        outcome
    }

    /// Open record with the smallest estimate; ties go to the earliest
    /// inserted. The record stays open until [`close`](Self::close).
    pub(crate) fn pop_min(&mut self) -> Option<usize> {
        while let Some(entry) = self.open.pop() {
            let rec = &self.records[entry.idx];
            if rec.state == RecordState::Open && rec.stamp == entry.stamp {
                return Some(entry.idx);
            }
        }
        None
    }

    /// Move an open record to closed.
    pub(crate) fn close(&mut self, idx: usize) {
        let rec = &mut self.records[idx];
        debug_assert_eq!(rec.state, RecordState::Open);
        rec.state = RecordState::Closed;
        self.open_len -= 1;
        self.closed_len += 1;
    }

    #[inline]
    pub(crate) fn get(&self, idx: usize) -> &NodeRecord<N> {
        &self.records[idx]
    }

    #[inline]
    pub(crate) fn predecessor(&self, idx: usize) -> Option<usize> {
        self.records[idx].predecessor
    }

    #[inline]
    pub(crate) fn index_of(&self, node: N) -> Option<usize> {
        self.index.get(&node).copied()
    }

    pub(crate) fn view(&self, node: N) -> Option<RecordView<N>> {
        let rec = &self.records[self.index_of(node)?];
        Some(RecordView {
            node: rec.node,
            cost_so_far: rec.cost_so_far,
            estimated_total_cost: rec.estimated_total_cost,
            predecessor: rec.predecessor.map(|p| self.records[p].node),
            state: rec.state,
        })
    }

    #[inline]
    pub(crate) fn open_len(&self) -> usize {
        self.open_len
    }

    #[inline]
    pub(crate) fn closed_len(&self) -> usize {
        self.closed_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_min_orders_by_estimate_then_insertion() {
        let mut t = RecordTable::new();
        let s = t.open_start('s', 0.0);
        assert_eq!(t.pop_min(), Some(s));
        t.close(s);
        let a = t.relax(s, 'a', 2.0, || 0.0);
        let b = t.relax(s, 'b', 1.0, || 1.0);
        let c = t.relax(s, 'c', 1.0, || 0.0);
        assert_eq!(a, Relaxation::Discovered(1));
        assert_eq!(b, Relaxation::Discovered(2));
        assert_eq!(c, Relaxation::Discovered(3));
        // c has f=1; a and b tie at f=2 and a was inserted first.
        assert_eq!(t.pop_min(), Some(3));
        t.close(3);
        assert_eq!(t.pop_min(), Some(1));
        t.close(1);
        assert_eq!(t.pop_min(), Some(2));
        t.close(2);
        assert_eq!(t.pop_min(), None);
        assert_eq!((t.open_len(), t.closed_len()), (0, 4));
    }

    #[test]
    fn improve_open_keeps_heuristic_and_order() {
        let mut t = RecordTable::new();
        let s = t.open_start(0u32, 0.0);
        t.pop_min();
        t.close(s);
        t.relax(s, 1, 5.0, || 2.0);
        t.relax(s, 2, 6.0, || 1.0);
        // Cheaper route to 1; heuristic closure must not run again.
        let r = t.relax(s, 1, 3.0, || panic!("heuristic recomputed"));
        assert_eq!(r, Relaxation::Improved(1));
        let v = t.view(1).unwrap();
        assert_eq!(v.cost_so_far, 3.0);
        assert_eq!(v.estimated_total_cost, 5.0);
        assert_eq!(v.state, RecordState::Open);
        // Not cheaper: skipped.
        assert_eq!(t.relax(s, 1, 3.0, || 0.0), Relaxation::Skipped);
        assert_eq!(t.open_len(), 2);
    }

    #[test]
    fn reopen_closed_record() {
        let mut t = RecordTable::new();
        let s = t.open_start("s", 0.0);
        t.pop_min();
        t.close(s);
        let a = match t.relax(s, "a", 4.0, || 1.0) {
            Relaxation::Discovered(i) => i,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(t.pop_min(), Some(a));
        t.close(a);
        assert_eq!(t.view("a").unwrap().state, RecordState::Closed);

        assert_eq!(t.relax(s, "a", 2.0, || 0.0), Relaxation::Reopened(a));
        let v = t.view("a").unwrap();
        assert_eq!(v.state, RecordState::Open);
        assert_eq!(v.cost_so_far, 2.0);
        assert_eq!(v.estimated_total_cost, 3.0);
        assert_eq!(v.predecessor, Some("s"));
        assert_eq!((t.open_len(), t.closed_len()), (1, 1));
        assert_eq!(t.pop_min(), Some(a));
    }

    #[test]
    fn stale_heap_entries_are_skipped() {
        let mut t = RecordTable::new();
        let s = t.open_start(0u8, 0.0);
        t.pop_min();
        t.close(s);
        t.relax(s, 1, 10.0, || 0.0);
        t.relax(s, 1, 1.0, || 0.0);
        assert_eq!(t.pop_min(), Some(1));
        t.close(1);
        // The f=10 entry is stale and must not resurface.
        assert_eq!(t.pop_min(), None);
    }
}
