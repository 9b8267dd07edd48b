pub mod classifier;
pub mod extractor;
pub mod selectors;

use serde::{Deserialize, Serialize};

pub use classifier::Classifier;
pub use extractor::PostExtractor;
pub use selectors::Selectors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TweetType {
    Original,
    Repost,
    Pinned,
    /// First post of a run by one author. Also covers standalone posts.
    Thread,
    /// Continuation by the same author, or a numbered list item.
    ThreadReply,
}

impl TweetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TweetType::Original => "original",
            TweetType::Repost => "repost",
            TweetType::Pinned => "pinned",
            TweetType::Thread => "thread",
            TweetType::ThreadReply => "thread_reply",
        }
    }
}

impl std::fmt::Display for TweetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostStats {
    pub date: String,
    pub text: String,
    pub comments: u64,
    pub reposts: u64,
    pub likes: u64,
    pub views: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub comments: u64,
    pub reposts: u64,
    pub likes: u64,
    pub views: u64,
}

impl AggregateStats {
    pub fn add(&mut self, post: &PostStats) {
        self.comments = self.comments.saturating_add(post.comments);
        self.reposts = self.reposts.saturating_add(post.reposts);
        self.likes = self.likes.saturating_add(post.likes);
        self.views = self.views.saturating_add(post.views);
    }

    pub fn from_posts(posts: &[PostStats]) -> Self {
        let mut total = Self::default();
        for post in posts {
            total.add(post);
        }
        total
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub posts_data: Vec<PostStats>,
    pub total_stats: AggregateStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_serializes_with_wire_names() {
        let result = ExtractionResult {
            posts_data: vec![PostStats {
                date: "3/1/2024".to_string(),
                text: "hello".to_string(),
                comments: 1,
                reposts: 2,
                likes: 3,
                views: 4,
            }],
            total_stats: AggregateStats {
                comments: 1,
                reposts: 2,
                likes: 3,
                views: 4,
            },
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["postsData"][0]["likes"], 3);
        assert_eq!(json["totalStats"]["views"], 4);
    }

    #[test]
    fn test_aggregate_saturates() {
        let mut total = AggregateStats {
            likes: u64::MAX - 1,
            ..Default::default()
        };
        total.add(&PostStats {
            date: String::new(),
            text: String::new(),
            comments: 0,
            reposts: 0,
            likes: 10,
            views: 0,
        });
        assert_eq!(total.likes, u64::MAX);
    }

    #[test]
    fn test_tweet_type_names() {
        assert_eq!(TweetType::ThreadReply.to_string(), "thread_reply");
        assert_eq!(
            serde_json::to_string(&TweetType::Pinned).unwrap(),
            "\"pinned\""
        );
    }
}
