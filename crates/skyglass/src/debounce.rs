//! Search-as-you-type debouncing.

use std::time::{Duration, Instant};

use crate::gateway::MIN_QUERY_CHARS;

/// What a keystroke did to the pending search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryInput {
    /// Too short to search; suggestions should be cleared now.
    Cleared,
    /// A search is scheduled once the input goes quiet.
    Scheduled,
}

/// Holds the latest query until it has been stable for `delay`.
#[derive(Debug)]
pub struct SearchDebounce {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a new query value. Each call restarts the quiet period.
    pub fn input(&mut self, query: &str, now: Instant) -> QueryInput {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            self.pending = None;
            return QueryInput::Cleared;
        }
        self.pending = Some((query.to_string(), now + self.delay));
        QueryInput::Scheduled
    }

    /// Take the pending query if its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let ready = self.pending.as_ref().is_some_and(|(_, due)| now >= *due);
        if !ready {
            return None;
        }
        self.pending.take().map(|(query, _)| query)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
