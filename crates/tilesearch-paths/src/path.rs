//! Path reconstruction by walking predecessor links.

use std::hash::Hash;

use crate::record::RecordTable;

/// Resumable walk from a terminal record back to the start record.
///
/// Yields nodes goal first. The nodes can be kept as they are walked and
/// handed back start first by [`into_path`](Self::into_path).
#[derive(Debug, Clone)]
pub(crate) struct PathWalk<N> {
    next: Option<usize>,
    walked: Vec<N>,
    keep: bool,
}

impl<N: Copy + Eq + Hash> PathWalk<N> {
    pub(crate) fn new(terminal: usize, keep: bool) -> Self {
        Self {
            next: Some(terminal),
            walked: Vec::new(),
            keep,
        }
    }

    /// Step to the next node toward the start, or `None` once the start
    /// record has been passed.
    pub(crate) fn advance(&mut self, table: &RecordTable<N>) -> Option<N> {
        let idx = self.next?;
        let node = table.get(idx).node;
        self.next = table.predecessor(idx);
        if self.keep {
            self.walked.push(node);
        }
        Some(node)
    }

    /// The kept nodes, start first. Empty if nothing was kept.
    pub(crate) fn into_path(mut self) -> Vec<N> {
        self.walked.reverse();
        self.walked
    }
}

/// Full path from the start record to `terminal`, start first.
pub(crate) fn reconstruct<N: Copy + Eq + Hash>(table: &RecordTable<N>, terminal: usize) -> Vec<N> {
    let mut walk = PathWalk::new(terminal, true);
    while walk.advance(table).is_some() {}
    walk.into_path()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> (RecordTable<char>, usize) {
        let mut t = RecordTable::new();
        let s = t.open_start('s', 0.0);
        t.pop_min();
        t.close(s);
        t.relax(s, 'a', 1.0, || 0.0);
        t.pop_min();
        t.close(1);
        t.relax(1, 'g', 2.0, || 0.0);
        (t, 2)
    }

    #[test]
    fn walk_goal_to_start() {
        let (t, g) = chain();
        let mut w = PathWalk::new(g, false);
        let mut order = Vec::new();
        while let Some(n) = w.advance(&t) {
            order.push(n);
        }
        assert_eq!(order, vec!['g', 'a', 's']);
        assert!(w.into_path().is_empty());
    }

    #[test]
    fn reconstruct_start_first() {
        let (t, g) = chain();
        assert_eq!(reconstruct(&t, g), vec!['s', 'a', 'g']);
    }

    #[test]
    fn trivial_path() {
        let mut t = RecordTable::new();
        let s = t.open_start(7u32, 0.0);
        assert_eq!(reconstruct(&t, s), vec![7]);
    }
}
