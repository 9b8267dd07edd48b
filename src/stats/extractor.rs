use std::collections::HashSet;
use std::fmt::Write;
use std::time::Duration;

use chrono::{DateTime, Local};
use scraper::ElementRef;
use tracing::{debug, info, Span};

use super::selectors::{self, Selectors};
use super::{Classifier, ExtractionResult, PostStats, TweetType};
use crate::config::{Config, ExtractorConfig};
use crate::dom::{Document, ElementWaiter, Snapshot};
use crate::error::ExtractError;
use crate::metric_parser::parse_metric;

/// Counter texts as rendered, before decoding.
#[derive(Debug, Default)]
struct RawMetrics {
    comments: Option<String>,
    reposts: Option<String>,
    likes: Option<String>,
    views: Option<String>,
}

pub struct PostExtractor {
    selectors: Selectors,
    classifier: Classifier,
    config: ExtractorConfig,
    span: Span,
}

impl PostExtractor {
    pub fn new(config: &Config, span: Span) -> Result<Self, ExtractError> {
        let selectors = Selectors::compile(&config.selectors)?;
        let classifier = Classifier::new(&config.classifier, selectors.clone(), span.clone())?;
        Ok(Self {
            selectors,
            classifier,
            config: config.extractor.clone(),
            span,
        })
    }

    /// Wait for posts to be mounted, then extract from that snapshot.
    pub async fn collect(&self, document: &dyn Document) -> ExtractionResult {
        let snapshot = ElementWaiter::new(document, self.span.clone())
            .with_timeout(Duration::from_millis(self.config.wait_timeout_ms))
            .wait_for(&self.selectors.post)
            .await;
        self.process(&snapshot)
    }

    /// One synchronous pass over the snapshot, in document order.
    pub fn process(&self, snapshot: &Snapshot) -> ExtractionResult {
        let mut result = ExtractionResult::default();
        let mut seen: HashSet<String> = HashSet::new();
        let mut found = 0usize;

        for (index, post) in snapshot.elements().enumerate() {
            found += 1;

            let Some(id) = self.post_id(post) else {
                debug!(parent: &self.span, index, "skipping post without timestamp");
                continue;
            };
            if !seen.insert(id.to_string()) {
                debug!(parent: &self.span, index, id, "skipping duplicate post");
                continue;
            }

            let kind = self.classifier.classify(post);
            debug!(parent: &self.span, index, id, tweet_type = %kind, "classified post");
            if kind != TweetType::Original {
                continue;
            }

            let raw = self.raw_metrics(post);
            debug!(parent: &self.span, index, ?raw, "raw metrics");

            let stats = PostStats {
                date: self.format_date(id),
                text: self.excerpt(post),
                comments: parse_metric(raw.comments.as_deref()),
                reposts: parse_metric(raw.reposts.as_deref()),
                likes: parse_metric(raw.likes.as_deref()),
                views: parse_metric(raw.views.as_deref()),
            };

            result.total_stats.add(&stats);
            result.posts_data.push(stats);
        }

        info!(
            parent: &self.span,
            found,
            unique = seen.len(),
            counted = result.posts_data.len(),
            "collected post stats"
        );
        result
    }

    fn post_id<'a>(&self, post: ElementRef<'a>) -> Option<&'a str> {
        selectors::first(post, &self.selectors.time)
            .and_then(|time| time.value().attr("datetime"))
            .filter(|id| !id.is_empty())
    }

    fn raw_metrics(&self, post: ElementRef<'_>) -> RawMetrics {
        RawMetrics {
            comments: selectors::first_text(post, &self.selectors.replies),
            reposts: selectors::first_text(post, &self.selectors.reposts),
            likes: selectors::first_text(post, &self.selectors.likes),
            views: selectors::first_text(post, &self.selectors.views),
        }
    }

    fn format_date(&self, timestamp: &str) -> String {
        let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) else {
            return String::new();
        };
        // Invalid patterns report a fmt error here instead of panicking.
        let mut date = String::new();
        match write!(date, "{}", dt.with_timezone(&Local).format(&self.config.date_format)) {
            Ok(()) => date,
            Err(_) => String::new(),
        }
    }

    fn excerpt(&self, post: ElementRef<'_>) -> String {
        let text = selectors::first_text(post, &self.selectors.body_text).unwrap_or_default();
        truncate(&text, self.config.excerpt_len, &self.config.ellipsis)
    }
}

/// Keep the first `max_chars` Unicode scalar values. A page script slicing
/// UTF-16 units cuts earlier on text with astral characters such as emoji,
/// which take two units each.
fn truncate(text: &str, max_chars: usize, ellipsis: &str) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ellipsis),
        None => text.to_string(),
    }
}
