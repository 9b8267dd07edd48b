use serde::{Deserialize, Serialize};

use crate::stats::ExtractionResult;

/// Messages addressed to a tab's content script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Request {
    #[serde(rename = "getStats")]
    GetStats,
    /// Fire-and-forget; no response is produced.
    #[serde(rename = "pageLoaded")]
    PageLoaded { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Stats(ExtractionResult),
    Error { error: String },
}
