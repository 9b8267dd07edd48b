//! Decides what kind of timeline entry a post is.
//!
//! The page carries no explicit thread flag, so continuity is inferred from
//! social context annotations, list numbering in the text, and whether the
//! cell rendered right above was written by the same author.

use regex::Regex;
use scraper::ElementRef;
use tracing::{trace, Span};

use super::selectors::{self, Selectors};
use super::TweetType;
use crate::config::ClassifierConfig;
use crate::error::ExtractError;

#[derive(Debug, Clone)]
pub struct Classifier {
    selectors: Selectors,
    repost_markers: Vec<String>,
    pinned_markers: Vec<String>,
    numbered_item: Regex,
    thread_starts_as_original: bool,
    span: Span,
}

impl Classifier {
    pub fn new(
        config: &ClassifierConfig,
        selectors: Selectors,
        span: Span,
    ) -> Result<Self, ExtractError> {
        Ok(Self {
            selectors,
            repost_markers: config.repost_markers.clone(),
            pinned_markers: config.pinned_markers.clone(),
            numbered_item: Regex::new(&config.numbered_item_pattern).map_err(|source| {
                ExtractError::InvalidPattern {
                    pattern: config.numbered_item_pattern.clone(),
                    source,
                }
            })?,
            thread_starts_as_original: config.thread_starts_as_original,
            span,
        })
    }

    /// First matching rule wins: social context, numbering, then authorship
    /// of the previous cell.
    pub fn classify(&self, post: ElementRef<'_>) -> TweetType {
        for context in post.select(&self.selectors.social_context) {
            let text: String = context.text().collect();
            trace!(parent: &self.span, context = %text, "checking social context");

            if contains_any(&text, &self.repost_markers) {
                return TweetType::Repost;
            }
            if contains_any(&text, &self.pinned_markers) {
                return TweetType::Pinned;
            }
        }

        let text = selectors::first_text(post, &self.selectors.classifier_text).unwrap_or_default();
        if self.numbered_item.is_match(&text) {
            return TweetType::ThreadReply;
        }

        let previous = selectors::closest(post, &self.selectors.cell)
            .and_then(selectors::previous_element_sibling);
        let starts_run = match previous {
            None => true,
            Some(prev) => self.author_href(prev) != self.author_href(post),
        };

        if !starts_run {
            TweetType::ThreadReply
        } else if self.thread_starts_as_original {
            TweetType::Original
        } else {
            TweetType::Thread
        }
    }

    fn author_href<'a>(&self, element: ElementRef<'a>) -> Option<&'a str> {
        selectors::first(element, &self.selectors.author_link).and_then(|a| a.value().attr("href"))
    }
}

fn contains_any(text: &str, markers: &[String]) -> bool {
    markers.iter().any(|marker| text.contains(marker.as_str()))
}
