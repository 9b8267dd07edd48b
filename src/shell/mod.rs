//! The extension shell: the per-tab content script, the background tab
//! monitor and the transport that carries messages between them.

pub mod background;
pub mod content;
pub mod transport;

use serde::{Deserialize, Serialize};

pub use background::{Background, TabStatus, TabUpdate};
pub use content::ContentScript;
pub use transport::{LocalTransport, Transport};

pub type TabId = u32;

/// What the popup knows about the tab it was opened on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    pub url: Option<String>,
}

/// True when `url`'s host is one of `hosts` or a subdomain of one.
pub fn is_platform_url(url: &str, hosts: &[String]) -> bool {
    let Some(host) = host_of(url) else {
        return false;
    };
    hosts.iter().any(|known| {
        let known = known.to_ascii_lowercase();
        host == known || host.ends_with(&format!(".{}", known))
    })
}

fn host_of(url: &str) -> Option<String> {
    let rest = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let authority = rest.split(&['/', '?', '#'][..]).next()?;
    let host_port = authority.rsplit('@').next()?;
    let host = host_port.split(':').next()?;
    if host.is_empty() {
        None
    } else {
        Some(host.to_ascii_lowercase())
    }
}
