use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const POST_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A post as handed over by a search feed, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPost {
    pub date: DateTime<Utc>,
    pub id: u64,
    pub url: String,
    pub content: String,
    pub user: String,
    pub reply_count: u64,
    pub retweet_count: u64,
    pub language: String,
    pub source: String,
    pub like_count: u64,
}

/// One normalized post. Field order is the column order of every export.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub date: String,
    pub id: u64,
    pub url: String,
    pub content: String,
    pub user: String,
    pub reply_count: u64,
    pub retweet_count: u64,
    pub language: String,
    pub source: String,
    pub like_count: u64,
}

impl PostRecord {
    pub const COLUMNS: [&'static str; 10] = [
        "date",
        "id",
        "url",
        "content",
        "user",
        "reply_count",
        "retweet_count",
        "language",
        "source",
        "like_count",
    ];

    pub fn to_row(&self) -> [String; 10] {
        return [
            self.date.clone(),
            self.id.to_string(),
            self.url.clone(),
            self.content.clone(),
            self.user.clone(),
            self.reply_count.to_string(),
            self.retweet_count.to_string(),
            self.language.clone(),
            self.source.clone(),
            self.like_count.to_string(),
        ];
    }
}

impl From<RawPost> for PostRecord {
    fn from(post: RawPost) -> Self {
        return PostRecord {
            date: post.date.format(POST_DATE_FORMAT).to_string(),
            id: post.id,
            url: post.url,
            content: post.content,
            user: post.user,
            reply_count: post.reply_count,
            retweet_count: post.retweet_count,
            language: post.language,
            source: post.source,
            like_count: post.like_count,
        };
    }
}
