//! Error types shared across the crate.

use std::path::PathBuf;

use crate::shell::TabId;

/// Errors raised while preparing or running an extraction pass.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid {name} selector `{selector}`: {message}")]
    InvalidSelector {
        name: &'static str,
        selector: String,
        message: String,
    },

    #[error("invalid numbering pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors raised while delivering a message between the popup, the
/// background monitor and a tab's content script.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Could not establish connection to tab {tab}. Receiving end does not exist.")]
    NoReceiver { tab: TabId },

    #[error("Message could not be encoded: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Errors raised while loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
