use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub extractor: ExtractorConfig,
    pub classifier: ClassifierConfig,
    pub selectors: SelectorConfig,
    pub shell: ShellConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// How long to wait for the first post to be mounted.
    pub wait_timeout_ms: u64,
    /// Excerpt length in characters.
    pub excerpt_len: usize,
    pub ellipsis: String,
    /// strftime pattern applied to the post timestamp in local time.
    pub date_format: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            wait_timeout_ms: 5000,
            excerpt_len: 100,
            ellipsis: "...".to_string(),
            date_format: "%-m/%-d/%Y".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub repost_markers: Vec<String>,
    pub pinned_markers: Vec<String>,
    /// Regex for text that opens with a list number, e.g. "10. ".
    pub numbered_item_pattern: String,
    /// Count the first post of an author run as original instead of `thread`.
    /// Off by default: with it off, no post is ever classified original by
    /// the adjacency heuristic.
    pub thread_starts_as_original: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            repost_markers: vec!["reposted".to_string(), "Ретвитнул".to_string()],
            pinned_markers: vec!["Pinned".to_string(), "Закреплено".to_string()],
            numbered_item_pattern: r"^[0-9]+\.\s".to_string(),
            thread_starts_as_original: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub post: String,
    pub time: String,
    pub social_context: String,
    pub classifier_text: String,
    pub body_text: String,
    pub cell: String,
    pub author_link: String,
    pub replies: String,
    pub reposts: String,
    pub likes: String,
    pub views: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            post: r#"article[data-testid="tweet"]"#.to_string(),
            time: "time".to_string(),
            social_context: r#"[data-testid="socialContext"]"#.to_string(),
            classifier_text: r#"[data-testid="tweetText"]"#.to_string(),
            body_text: r#"div[data-testid="tweetText"]"#.to_string(),
            cell: r#"div[data-testid="cellInnerDiv"]"#.to_string(),
            author_link: r#"[data-testid="User-Name"] a"#.to_string(),
            replies:
                r#"[data-testid="reply"] span[data-testid="app-text-transition-container"]"#
                    .to_string(),
            reposts:
                r#"[data-testid="retweet"] span[data-testid="app-text-transition-container"]"#
                    .to_string(),
            likes: r#"[data-testid="like"] span[data-testid="app-text-transition-container"]"#
                .to_string(),
            views:
                r#"a[href*="/analytics"] span[data-testid="app-text-transition-container"]"#
                    .to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Hosts whose pages get a `pageLoaded` notification. Subdomains match.
    pub platform_hosts: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            platform_hosts: vec!["twitter.com".to_string(), "x.com".to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    pub locale: Locale,
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("timeline-stats").join("config.toml"))
    }

    /// Load from `path`, or from the default location when `None`.
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !explicit && !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
