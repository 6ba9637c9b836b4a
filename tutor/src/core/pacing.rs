//! Session identity and delayed-transition tickets.
//!
//! A ticket names the session that issued it. Replacing a session makes every
//! ticket it issued stale, so a delayed transition can never land on the
//! session that replaced it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a board or training session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    /// Allocate a fresh id. Ids are never reused within a process.
    pub fn next() -> Self {
        Self(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Token for a pending delayed transition of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub session: SessionId,
    /// Column (board) or problem counter (training) the ticket was issued for.
    pub step: usize,
}

/// A ticket together with the instant it becomes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    pub ticket: Ticket,
    pub due: Instant,
}

impl PendingAdvance {
    pub fn schedule(ticket: Ticket, now: Instant, delay: Duration) -> Self {
        Self {
            ticket,
            due: now + delay,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_unique() {
        let a = SessionId::next();
        let b = SessionId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn pending_advance_becomes_due_after_delay() {
        let now = Instant::now();
        let ticket = Ticket {
            session: SessionId::next(),
            step: 0,
        };
        let pending = PendingAdvance::schedule(ticket, now, Duration::from_millis(500));
        assert!(!pending.is_due(now));
        assert!(pending.is_due(now + Duration::from_millis(500)));
    }
}
