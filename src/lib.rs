//! Engagement statistics for posts rendered on an X (Twitter) timeline.
//!
//! A content script waits for post elements to be mounted, classifies each
//! one, decodes its counters and sums the originals. The popup asks for that
//! summary over a message transport and renders it.

pub mod config;
pub mod dom;
pub mod error;
pub mod logging;
pub mod message;
pub mod metric_parser;
pub mod shell;
pub mod stats;
pub mod ui;

pub use config::Config;
pub use dom::{Document, ElementWaiter, LiveDocument, Snapshot, StaticDocument};
pub use error::{ConfigError, ExtractError, TransportError};
pub use message::{Request, Response};
pub use metric_parser::parse_metric;
pub use stats::{AggregateStats, ExtractionResult, PostExtractor, PostStats, TweetType};
