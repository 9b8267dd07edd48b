//! Point-in-time views over a mutable HTML document.
//!
//! The host page owns the tree and can change it at any moment. Consumers
//! take a [`Snapshot`] and work on that; changes are announced through a
//! watch channel carrying a generation counter.

pub mod waiter;

use std::sync::Mutex;

use scraper::{ElementRef, Html, Selector};
use tokio::sync::watch;

pub use waiter::ElementWaiter;

pub trait Document: Send + Sync {
    /// Parse the current markup.
    fn snapshot(&self) -> Html;

    /// Subscribe to mutation notifications. The value is the generation
    /// counter; a closed channel means the document will not change again.
    fn changes(&self) -> watch::Receiver<u64>;
}

/// A document whose markup can be replaced or extended while observers wait.
pub struct LiveDocument {
    markup: Mutex<String>,
    generation: watch::Sender<u64>,
}

impl LiveDocument {
    pub fn new(markup: impl Into<String>) -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            markup: Mutex::new(markup.into()),
            generation,
        }
    }

    pub fn replace(&self, markup: impl Into<String>) {
        *self.lock() = markup.into();
        self.notify();
    }

    /// Insert `fragment` before the closing body tag, or at the end when the
    /// markup has none.
    pub fn append_to_body(&self, fragment: &str) {
        {
            let mut markup = self.lock();
            match markup.rfind("</body>") {
                Some(at) => markup.insert_str(at, fragment),
                None => markup.push_str(fragment),
            }
        }
        self.notify();
    }

    pub fn generation(&self) -> u64 {
        *self.generation.borrow()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, String> {
        self.markup.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn notify(&self) {
        self.generation.send_modify(|g| *g += 1);
    }
}

impl Document for LiveDocument {
    fn snapshot(&self) -> Html {
        Html::parse_document(&self.lock())
    }

    fn changes(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }
}

/// A document that never changes, e.g. a saved page.
pub struct StaticDocument {
    markup: String,
}

impl StaticDocument {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }
}

impl Document for StaticDocument {
    fn snapshot(&self) -> Html {
        Html::parse_document(&self.markup)
    }

    fn changes(&self) -> watch::Receiver<u64> {
        // Sender dropped on return: the stream is closed from the start.
        let (_, rx) = watch::channel(0);
        rx
    }
}

/// Elements matching a selector at one moment.
pub struct Snapshot {
    html: Html,
    selector: Selector,
}

impl Snapshot {
    pub fn capture(document: &dyn Document, selector: &Selector) -> Self {
        Self {
            html: document.snapshot(),
            selector: selector.clone(),
        }
    }

    /// Matches in document order.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.html.select(&self.selector)
    }

    pub fn len(&self) -> usize {
        self.elements().count()
    }

    pub fn is_empty(&self) -> bool {
        self.elements().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn articles() -> Selector {
        Selector::parse("article").unwrap()
    }

    #[test]
    fn test_append_to_body_inserts_before_closing_tag() {
        let doc = LiveDocument::new("<html><body><p>a</p></body></html>");
        doc.append_to_body("<article>1</article>");
        let snapshot = Snapshot::capture(&doc, &articles());
        assert_eq!(snapshot.len(), 1);
        assert_eq!(doc.generation(), 1);
    }

    #[test]
    fn test_append_without_body_tag() {
        let doc = LiveDocument::new("<div></div>");
        doc.append_to_body("<article>1</article>");
        doc.append_to_body("<article>2</article>");
        let texts: Vec<String> = Snapshot::capture(&doc, &articles())
            .elements()
            .map(|e| e.text().collect())
            .collect();
        assert_eq!(texts, vec!["1", "2"]);
        assert_eq!(doc.generation(), 2);
    }

    #[test]
    fn test_replace_notifies_subscribers() {
        let doc = LiveDocument::new("<article>1</article>");
        let rx = doc.changes();
        doc.replace("<p>gone</p>");
        assert!(rx.has_changed().unwrap());
        assert!(Snapshot::capture(&doc, &articles()).is_empty());
    }

    #[test]
    fn test_snapshot_is_point_in_time() {
        let doc = LiveDocument::new("<article>1</article>");
        let snapshot = Snapshot::capture(&doc, &articles());
        doc.replace("");
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_static_document_change_stream_is_closed() {
        let doc = StaticDocument::new("<article>1</article>");
        assert!(doc.changes().has_changed().is_err());
        assert_eq!(Snapshot::capture(&doc, &articles()).len(), 1);
    }
}
