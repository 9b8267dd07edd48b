use std::time::Duration;

use scraper::Selector;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, Span};

use super::{Document, Snapshot};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Single-shot wait for elements to be mounted.
///
/// Resolves with the current matches as soon as at least one exists, and
/// otherwise with whatever matches (possibly nothing) when the timeout
/// elapses. It never fails and never keeps observing after it resolves.
pub struct ElementWaiter<'a> {
    document: &'a dyn Document,
    timeout: Duration,
    span: Span,
}

impl<'a> ElementWaiter<'a> {
    pub fn new(document: &'a dyn Document, span: Span) -> Self {
        Self {
            document,
            timeout: DEFAULT_TIMEOUT,
            span,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn wait_for(&self, selector: &Selector) -> Snapshot {
        let deadline = Instant::now() + self.timeout;
        // Subscribed before the first query so a mutation landing in between
        // still wakes us.
        let mut changes = self.document.changes();

        let snapshot = Snapshot::capture(self.document, selector);
        if !snapshot.is_empty() {
            return snapshot;
        }
        drop(snapshot);

        loop {
            match timeout_at(deadline, changes.changed()).await {
                Ok(Ok(())) => {
                    let snapshot = Snapshot::capture(self.document, selector);
                    if !snapshot.is_empty() {
                        debug!(parent: &self.span, generation = *changes.borrow(), "elements appeared");
                        return snapshot;
                    }
                }
                Ok(Err(_)) => {
                    debug!(parent: &self.span, "document closed its change stream");
                    break;
                }
                Err(_) => {
                    debug!(parent: &self.span, timeout_ms = self.timeout.as_millis() as u64, "wait timed out");
                    break;
                }
            }
        }

        Snapshot::capture(self.document, selector)
    }
}
