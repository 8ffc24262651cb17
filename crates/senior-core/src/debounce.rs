//! Trailing-edge debounce
//!
//! Each call takes a ticket and waits out the quiet period; only the call
//! holding the newest ticket when its wait ends is allowed to run. A burst of
//! events therefore collapses into one handler run after the last event.

use crate::effects::TimeEffects;
use std::cell::Cell;

/// Ticket issued for one debounced call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct Debouncer {
    wait_ms: u64,
    latest: Cell<u64>,
}

impl Debouncer {
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait_ms,
            latest: Cell::new(0),
        }
    }

    /// Register a call, superseding every earlier ticket.
    pub fn begin(&self) -> Ticket {
        let next = self.latest.get().wrapping_add(1);
        self.latest.set(next);
        Ticket(next)
    }

    /// Whether no newer call has arrived since `ticket` was issued.
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.get() == ticket.0
    }

    /// Take a ticket, wait out the quiet period, and report whether this call
    /// should run the handler.
    pub async fn settle<T: TimeEffects + ?Sized>(&self, time: &T) -> bool {
        let ticket = self.begin();
        time.sleep_ms(self.wait_ms).await;
        self.is_latest(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct TokioTime;

    #[async_trait(?Send)]
    impl TimeEffects for TokioTime {
        async fn sleep_ms(&self, ms: u64) {
            tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
        }
    }

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let debouncer = Debouncer::new(10);
        let first = debouncer.begin();
        assert!(debouncer.is_latest(first));
        let second = debouncer.begin();
        assert!(!debouncer.is_latest(first));
        assert!(debouncer.is_latest(second));
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_runs_only_last_call() {
        let debouncer = Debouncer::new(10);
        let time = TokioTime;

        let (a, b, c) = futures::join!(
            debouncer.settle(&time),
            debouncer.settle(&time),
            debouncer.settle(&time)
        );
        assert_eq!((a, b, c), (false, false, true));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_calls_each_run() {
        let debouncer = Debouncer::new(10);
        let time = TokioTime;

        assert!(debouncer.settle(&time).await);
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(debouncer.settle(&time).await);
    }
}
