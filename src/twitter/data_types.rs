use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::commons::post_record::RawPost;

/// One line of `snscrape --jsonl twitter-search` output. Unknown keys are ignored.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Tweet {
    pub date: DateTime<FixedOffset>,
    pub id: u64,
    pub url: String,
    #[serde(rename = "rawContent")]
    pub raw_content: Option<String>,
    pub content: Option<String>,
    pub user: User,
    #[serde(rename = "replyCount")]
    pub reply_count: u64,
    #[serde(rename = "retweetCount")]
    pub retweet_count: u64,
    pub lang: String,
    #[serde(rename = "sourceLabel")]
    pub source_label: Option<String>,
    #[serde(rename = "likeCount")]
    pub like_count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct User {
    pub username: String,
}

impl From<Tweet> for RawPost {
    fn from(tweet: Tweet) -> Self {
        return RawPost {
            date: tweet.date.with_timezone(&Utc),
            id: tweet.id,
            url: tweet.url,
            content: tweet.raw_content.or(tweet.content).unwrap_or_default(),
            user: tweet.user.username,
            reply_count: tweet.reply_count,
            retweet_count: tweet.retweet_count,
            language: tweet.lang,
            source: tweet.source_label.unwrap_or_default(),
            like_count: tweet.like_count,
        };
    }
}
