//! State-transition events emitted by a running search.

/// One observable step of a search, in emission order.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event<N> {
    /// `node` was selected from the open set for expansion.
    Active(N),
    /// `node` was discovered or given a cheaper route; `cost` is its new
    /// cost so far.
    Opened { node: N, cost: f64 },
    /// `node` finished expanding and moved to the closed set.
    Closed(N),
    /// `node` lies on the final path. Emitted goal first, start last.
    PathStep(N),
}

impl<N: Copy> Event<N> {
    /// The node the event is about.
    #[inline]
    pub fn node(&self) -> N {
        match *self {
            Event::Active(n) | Event::Closed(n) | Event::PathStep(n) => n,
            Event::Opened { node, .. } => node,
        }
    }
}

/// Receiver of search events, e.g. a visualizer.
pub trait EventSink<N> {
    fn emit(&mut self, event: &Event<N>);
}

/// Sink that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl<N> EventSink<N> for NoopSink {
    #[inline]
    fn emit(&mut self, _event: &Event<N>) {}
}

/// Sink that records every event, for tests and replays.
#[derive(Debug, Clone, PartialEq)]
pub struct EventLog<N> {
    events: Vec<Event<N>>,
}

impl<N> EventLog<N> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn events(&self) -> &[Event<N>] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event<N>> {
        self.events
    }
}

impl<N> Default for EventLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone> EventSink<N> for EventLog<N> {
    fn emit(&mut self, event: &Event<N>) {
        self.events.push(event.clone());
    }
}

impl<N, F: FnMut(&Event<N>)> EventSink<N> for F {
    #[inline]
    fn emit(&mut self, event: &Event<N>) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_node() {
        assert_eq!(Event::Active(1).node(), 1);
        assert_eq!(Event::Opened { node: 2, cost: 0.5 }.node(), 2);
        assert_eq!(Event::Closed(3).node(), 3);
        assert_eq!(Event::PathStep(4).node(), 4);
    }

    #[test]
    fn log_records_in_order() {
        let mut log = EventLog::new();
        log.emit(&Event::Active('a'));
        log.emit(&Event::Closed('a'));
        NoopSink.emit(&Event::Active('b'));
        assert_eq!(log.into_events(), vec![Event::Active('a'), Event::Closed('a')]);
    }
}
