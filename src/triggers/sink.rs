//! Event sinks.
//!
//! The engine pushes every `GameEvent` into an `EventSink`. Three sinks
//! ship with the crate:
//!
//! - `EventLog`: keeps events in memory (tests, replays)
//! - `TracingSink`: forwards events to `tracing` at info level
//! - `NullSink`: drops everything

use tracing::info;

use super::event::GameEvent;

/// Receiver of game events.
pub trait EventSink {
    /// Called once per event, in the order events happen.
    fn emit(&mut self, event: GameEvent);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: GameEvent) {
        (**self).emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: GameEvent) {
        (**self).emit(event);
    }
}

/// In-memory event recorder.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Events matching a predicate.
    pub fn filter<'a>(
        &'a self,
        predicate: impl Fn(&GameEvent) -> bool + 'a,
    ) -> impl Iterator<Item = &'a GameEvent> + 'a {
        self.events.iter().filter(move |e| predicate(e))
    }

    /// Number of events matching a predicate.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// Logs each event through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: GameEvent) {
        match event.player() {
            Some(player) => info!(%player, "{event}"),
            None => info!("{event}"),
        }
    }
}

/// Discards events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}
