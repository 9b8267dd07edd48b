use std::sync::Arc;
use std::time::Duration;

use timeline_stats::config::Config;
use timeline_stats::dom::LiveDocument;
use timeline_stats::shell::{
    Background, ContentScript, LocalTransport, Tab, TabStatus, TabUpdate, Transport,
};
use timeline_stats::ui::{Popup, PopupState};
use timeline_stats::{AggregateStats, PostExtractor, Request, Response, StaticDocument};
use tracing::Span;

fn cell(id: &str, author: &str, context: Option<&str>, text: &str, metrics: [&str; 4]) -> String {
    let context = context
        .map(|c| format!(r#"<div data-testid="socialContext"><span>{c}</span></div>"#))
        .unwrap_or_default();
    let [replies, reposts, likes, views] = metrics
        .map(|m| format!(r#"<span data-testid="app-text-transition-container">{m}</span>"#));
    format!(
        r#"<div data-testid="cellInnerDiv">
             <article data-testid="tweet" role="article">
               {context}
               <div data-testid="User-Name">
                 <a href="/{author}" role="link"><span>{author}</span></a>
                 <a href="/{author}/status/{id}"><time datetime="{id}">Mar 1</time></a>
               </div>
               <div lang="en" data-testid="tweetText"><span>{text}</span></div>
               <div role="group">
                 <button data-testid="reply"><div>{replies}</div></button>
                 <button data-testid="retweet"><div>{reposts}</div></button>
                 <button data-testid="like"><div>{likes}</div></button>
                 <a href="/{author}/status/{id}/analytics"><div>{views}</div></a>
               </div>
             </article>
           </div>"#
    )
}

fn timeline(cells: &[String]) -> String {
    format!(
        r#"<html><body><div aria-label="Timeline: Your Home Timeline"><div>{}</div></div></body></html>"#,
        cells.concat()
    )
}

fn scenario() -> String {
    timeline(&[
        cell(
            "2024-03-01T10:00:00.000Z",
            "alice",
            None,
            "Shipping the new release today",
            ["12", "3", "1.5K", "10,000"],
        ),
        cell(
            "2024-03-01T09:00:00.000Z",
            "bob",
            Some("alice reposted"),
            "Something bob wrote",
            ["1", "400", "2K", "3M"],
        ),
        cell(
            "2024-03-01T10:00:00.000Z",
            "alice",
            None,
            "Shipping the new release today",
            ["12", "3", "1.5K", "10,000"],
        ),
    ])
}

fn counting_config() -> Config {
    let mut config = Config::default();
    config.classifier.thread_starts_as_original = true;
    config
}

#[tokio::test]
async fn original_repost_and_duplicate() {
    let extractor = PostExtractor::new(&counting_config(), Span::none()).unwrap();
    let result = extractor.collect(&StaticDocument::new(scenario())).await;

    assert_eq!(result.posts_data.len(), 1);
    assert_eq!(
        result.total_stats,
        AggregateStats {
            comments: 12,
            reposts: 3,
            likes: 1500,
            views: 10_000,
        }
    );
    assert_eq!(result.posts_data[0].text, "Shipping the new release today");
}

#[tokio::test]
async fn long_text_is_truncated_in_output() {
    let long = "a".repeat(150);
    let page = timeline(&[cell("2024-03-01T10:00:00Z", "alice", None, &long, ["1", "1", "1", "1"])]);
    let extractor = PostExtractor::new(&counting_config(), Span::none()).unwrap();
    let result = extractor.collect(&StaticDocument::new(page)).await;
    assert_eq!(result.posts_data[0].text, format!("{}...", "a".repeat(100)));
}

#[tokio::test(start_paused = true)]
async fn popup_sees_posts_mounted_after_request() {
    let config = counting_config();
    let document = Arc::new(LiveDocument::new(timeline(&[])));

    let mut transport = LocalTransport::new(Span::none());
    transport.register(
        1,
        ContentScript::new(document.clone(), config.clone(), Span::none()),
    );

    let background = Background::new(&config.shell, Span::none());
    let delivered = background
        .on_tab_updated(
            &TabUpdate {
                tab_id: 1,
                status: Some(TabStatus::Complete),
                url: Some("https://twitter.com/home".to_string()),
            },
            &transport,
        )
        .await;
    assert!(delivered);

    let writer = Arc::clone(&document);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(800)).await;
        writer.replace(scenario());
    });

    let tab = Tab {
        id: 1,
        url: Some("https://twitter.com/home".to_string()),
    };
    let mut popup = Popup::new(&config);
    popup.load(&transport, Some(&tab), &config, &Span::none()).await;

    match popup.state() {
        PopupState::Ready(result) => {
            assert_eq!(result.posts_data.len(), 1);
            assert_eq!(result.total_stats.likes, 1500);
        }
        other => panic!("unexpected popup state: {other:?}"),
    }
    assert!(popup.render_plain().contains("Likes: 1.5K"));
}

#[tokio::test(start_paused = true)]
async fn empty_timeline_times_out_with_zero_totals() {
    let document = Arc::new(LiveDocument::new(timeline(&[])));
    let mut transport = LocalTransport::new(Span::none());
    transport.register(7, ContentScript::new(document, Config::default(), Span::none()));

    let started = tokio::time::Instant::now();
    let response = transport.send(7, Request::GetStats).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(5000));

    match response {
        Some(Response::Stats(result)) => {
            assert!(result.posts_data.is_empty());
            assert_eq!(result.total_stats, AggregateStats::default());
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[tokio::test]
async fn default_heuristic_counts_no_standalone_posts() {
    let extractor = PostExtractor::new(&Config::default(), Span::none()).unwrap();
    let result = extractor.collect(&StaticDocument::new(scenario())).await;
    assert!(result.posts_data.is_empty());
}
