use serde::{Deserialize, Serialize};
use tracing::{error, info, Span};

use super::{is_platform_url, TabId, Transport};
use crate::config::ShellConfig;
use crate::message::Request;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabStatus {
    Loading,
    Complete,
}

/// A change reported by the browser for one tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabUpdate {
    pub tab_id: TabId,
    pub status: Option<TabStatus>,
    pub url: Option<String>,
}

/// Privileged coordinator that watches tab navigation.
pub struct Background {
    platform_hosts: Vec<String>,
    span: Span,
}

impl Background {
    pub fn new(config: &ShellConfig, span: Span) -> Self {
        Self {
            platform_hosts: config.platform_hosts.clone(),
            span,
        }
    }

    pub fn on_installed(&self) {
        info!(parent: &self.span, "extension installed");
    }

    /// The notification to send for `update`, if any.
    pub fn notification_for(&self, update: &TabUpdate) -> Option<Request> {
        if update.status != Some(TabStatus::Complete) {
            return None;
        }
        let url = update.url.as_deref()?;
        if !is_platform_url(url, &self.platform_hosts) {
            return None;
        }
        Some(Request::PageLoaded {
            url: url.to_string(),
        })
    }

    /// Tell the tab's content script that its page finished loading.
    /// Delivery failures are logged and otherwise ignored. Returns whether a
    /// notification was delivered.
    pub async fn on_tab_updated(&self, update: &TabUpdate, transport: &dyn Transport) -> bool {
        let Some(request) = self.notification_for(update) else {
            return false;
        };
        match transport.send(update.tab_id, request).await {
            Ok(_) => true,
            Err(e) => {
                error!(parent: &self.span, tab = update.tab_id, error = %e, "error sending message");
                false
            }
        }
    }
}
