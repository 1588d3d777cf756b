use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use futures::StreamExt;

use super::{
    error::{CollectionError, StorageError},
    post_record::RawPost,
    run_record::RunRecord,
    run_store::RunStore,
    search_feed::{PostStream, SearchFeed},
};

pub fn raw_post(id: u64) -> RawPost {
    return RawPost {
        date: Utc.with_ymd_and_hms(2023, 1, 31, 23, 0, 0).unwrap() - chrono::Duration::minutes(id as i64),
        id,
        url: format!("https://twitter.com/user{id}/status/{id}"),
        content: format!("post number {id}, with a comma and a \"quote\"\nand a newline"),
        user: format!("user{id}"),
        reply_count: id,
        retweet_count: id * 2,
        language: "en".to_string(),
        source: "Twitter Web App".to_string(),
        like_count: id * 3,
    };
}

pub fn malformed_item() -> CollectionError {
    return CollectionError::Malformed(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
}

/// In-memory feed. Counts how many items were actually pulled from it.
#[derive(Default)]
pub struct StaticFeed {
    pub items: Vec<RawPost>,
    pub fail_at: Option<usize>,
    pub reject: bool,
    pub queries: Mutex<Vec<String>>,
    pub pulled: Arc<AtomicUsize>,
}

impl StaticFeed {
    pub fn with_posts(count: u64) -> StaticFeed {
        return StaticFeed {
            items: (1..=count).map(raw_post).collect(),
            ..Default::default()
        };
    }
}

#[async_trait]
impl SearchFeed for StaticFeed {
    async fn search(&self, query: &str) -> Result<PostStream, CollectionError> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.reject {
            return Err(CollectionError::Unreachable(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "feed down",
            )));
        }
        let pulled = self.pulled.clone();
        let fail_at = self.fail_at;
        let items = self.items.clone();
        let stream = futures::stream::iter(items.into_iter().enumerate()).map(move |(index, post)| {
            pulled.fetch_add(1, Ordering::SeqCst);
            if Some(index) == fail_at {
                return Err(malformed_item());
            }
            return Ok(post);
        });
        return Ok(stream.boxed());
    }
}

#[derive(Default)]
pub struct MemoryRunStore {
    pub runs: Mutex<Vec<RunRecord>>,
}

#[async_trait]
impl RunStore for MemoryRunStore {
    async fn insert_run(&self, run: &RunRecord) -> Result<(), StorageError> {
        self.runs.lock().unwrap().push(run.clone());
        return Ok(());
    }
}

#[async_trait]
impl<T: RunStore> RunStore for Arc<T> {
    async fn insert_run(&self, run: &RunRecord) -> Result<(), StorageError> {
        return self.as_ref().insert_run(run).await;
    }
}

#[async_trait]
impl<T: SearchFeed> SearchFeed for Arc<T> {
    async fn search(&self, query: &str) -> Result<PostStream, CollectionError> {
        return self.as_ref().search(query).await;
    }
}
