use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, Span};

use super::{ContentScript, TabId};
use crate::error::TransportError;
use crate::message::{Request, Response};

/// Delivers a request to the content script of a tab and awaits its reply.
///
/// `Ok(None)` means the message was delivered but the receiver sent nothing
/// back, which is the normal outcome for notifications.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, tab: TabId, request: Request) -> Result<Option<Response>, TransportError>;
}

/// In-process transport. Every message is serialized to JSON and decoded on
/// the other side, as it would be when crossing process boundaries.
pub struct LocalTransport {
    scripts: HashMap<TabId, ContentScript>,
    span: Span,
}

impl LocalTransport {
    pub fn new(span: Span) -> Self {
        Self {
            scripts: HashMap::new(),
            span,
        }
    }

    pub fn register(&mut self, tab: TabId, script: ContentScript) {
        self.scripts.insert(tab, script);
    }
}

#[async_trait(?Send)]
impl Transport for LocalTransport {
    async fn send(&self, tab: TabId, request: Request) -> Result<Option<Response>, TransportError> {
        let script = self
            .scripts
            .get(&tab)
            .ok_or(TransportError::NoReceiver { tab })?;

        let wire = serde_json::to_string(&request)?;
        debug!(parent: &self.span, tab, request = %wire, "sending message");
        let request: Request = serde_json::from_str(&wire)?;

        let Some(response) = script.handle(request).await else {
            return Ok(None);
        };
        let wire = serde_json::to_string(&response)?;
        debug!(parent: &self.span, tab, bytes = wire.len(), "received response");
        Ok(Some(serde_json::from_str(&wire)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dom::StaticDocument;
    use std::sync::Arc;

    fn transport_with_tab(tab: TabId) -> LocalTransport {
        let mut transport = LocalTransport::new(Span::none());
        let doc = Arc::new(StaticDocument::new("<body></body>"));
        transport.register(tab, ContentScript::new(doc, Config::default(), Span::none()));
        transport
    }

    #[tokio::test]
    async fn test_missing_receiver() {
        let transport = transport_with_tab(1);
        let err = transport.send(2, Request::GetStats).await.unwrap_err();
        assert!(matches!(err, TransportError::NoReceiver { tab: 2 }));
    }

    #[tokio::test]
    async fn test_round_trip_through_json() {
        let transport = transport_with_tab(7);
        let response = transport.send(7, Request::GetStats).await.unwrap();
        match response {
            Some(Response::Stats(result)) => assert!(result.posts_data.is_empty()),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_notification_is_delivered_without_reply() {
        let transport = transport_with_tab(7);
        let response = transport
            .send(
                7,
                Request::PageLoaded {
                    url: "https://x.com/".to_string(),
                },
            )
            .await
            .unwrap();
        assert!(response.is_none());
    }
}
