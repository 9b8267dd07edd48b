use std::sync::Arc;

use tracing::{error, info, info_span, Span};

use crate::config::Config;
use crate::dom::Document;
use crate::message::{Request, Response};
use crate::stats::PostExtractor;

/// Script embedded in one tab; answers requests about that tab's document.
pub struct ContentScript {
    document: Arc<dyn Document>,
    config: Config,
    span: Span,
}

impl ContentScript {
    pub fn new(document: Arc<dyn Document>, config: Config, span: Span) -> Self {
        Self {
            document,
            config,
            span,
        }
    }

    /// `None` for notifications, which expect no reply.
    pub async fn handle(&self, request: Request) -> Option<Response> {
        match request {
            Request::GetStats => Some(self.get_stats().await),
            Request::PageLoaded { url } => {
                info!(parent: &self.span, %url, "page loaded");
                None
            }
        }
    }

    async fn get_stats(&self) -> Response {
        let span = info_span!(parent: &self.span, "collect_posts");
        info!(parent: &span, "starting data collection");

        let extractor = match PostExtractor::new(&self.config, span.clone()) {
            Ok(extractor) => extractor,
            Err(e) => {
                error!(parent: &span, error = %e, "data collection failed");
                return Response::Error {
                    error: e.to_string(),
                };
            }
        };

        let result = extractor.collect(&*self.document).await;
        info!(
            parent: &span,
            posts = result.posts_data.len(),
            likes = result.total_stats.likes,
            "data collection completed"
        );
        Response::Stats(result)
    }
}
