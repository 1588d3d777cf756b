use std::num::NonZeroUsize;

use chrono::NaiveDate;
use futures::{StreamExt, TryStreamExt};
use log::{debug, info};

use crate::commons::{error::CollectionError, post_record::PostRecord, search_feed::SearchFeed};

/// Free-text query with the date window embedded the way the feed expects it.
pub fn build_query(query: &str, start_date: NaiveDate, end_date: NaiveDate) -> String {
    return format!(
        "{} since:{} until:{}",
        query,
        start_date.format("%Y-%m-%d"),
        end_date.format("%Y-%m-%d")
    );
}

pub struct Collector {
    feed: Box<dyn SearchFeed>,
}

impl Collector {
    pub fn new(feed: Box<dyn SearchFeed>) -> Collector {
        return Collector { feed };
    }

    /// Drains the feed until `max_count` posts were taken or it ends.
    /// Any feed failure discards what was pulled so far.
    pub async fn collect(
        &self,
        query: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        max_count: NonZeroUsize,
    ) -> Result<Vec<PostRecord>, CollectionError> {
        let feed_query = build_query(query, start_date, end_date);
        info!("collecting up to {} posts for: {}", max_count, feed_query);

        let records: Vec<PostRecord> = self
            .feed
            .search(&feed_query)
            .await?
            .take(max_count.get())
            .map_ok(PostRecord::from)
            .inspect_ok(|record| debug!("collected post {}", record.id))
            .try_collect()
            .await?;

        info!("collected {} posts for: {}", records.len(), feed_query);
        return Ok(records);
    }
}
