use async_trait::async_trait;
use futures::stream::BoxStream;

use super::{error::CollectionError, post_record::RawPost};

/// Lazy, pull-based sequence of posts. Not restartable: a new search re-queries the source.
pub type PostStream = BoxStream<'static, Result<RawPost, CollectionError>>;

#[async_trait]
pub trait SearchFeed: Send + Sync {
    /// Issues `query` against the source and returns its items in feed order.
    async fn search(&self, query: &str) -> Result<PostStream, CollectionError>;
}
