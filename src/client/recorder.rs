use std::sync::Arc;

use chrono::NaiveDateTime;
use log::info;

use crate::{
    client::{db::client::MongoRunStore, settings::MongoSettings},
    commons::{error::StorageError, post_record::PostRecord, run_record::RunRecord, run_store::RunStore},
    utils::time::{self, format_midnight, format_wall_clock, CalendarDate},
};

/// Wraps a finished collection into a [`RunRecord`] and writes it to the store.
pub struct RunRecorder {
    store: Box<dyn RunStore>,
}

impl RunRecorder {
    pub fn new(store: Box<dyn RunStore>) -> RunRecorder {
        return RunRecorder { store };
    }

    pub fn mongo(settings: &MongoSettings) -> RunRecorder {
        return RunRecorder::new(Box::new(MongoRunStore::new(settings)));
    }

    pub fn record(
        &self,
        query: &str,
        start_date: &impl CalendarDate,
        end_date: &impl CalendarDate,
        records: impl Into<Arc<[PostRecord]>>,
    ) -> RunRecord {
        return self.record_at(query, start_date, end_date, records, time::now());
    }

    pub fn record_at(
        &self,
        query: &str,
        start_date: &impl CalendarDate,
        end_date: &impl CalendarDate,
        records: impl Into<Arc<[PostRecord]>>,
        scraped_at: NaiveDateTime,
    ) -> RunRecord {
        return RunRecord {
            scraped_word: query.to_string(),
            scraped_date_range: format!("{} - {}", format_midnight(start_date), format_midnight(end_date)),
            scraped_date: format_wall_clock(&scraped_at),
            scraped_data: records.into(),
        };
    }

    /// Always an insert. On failure `run` is untouched and stays usable.
    pub async fn persist(&self, run: &RunRecord) -> Result<(), StorageError> {
        info!("persisting run for `{}` with {} posts", run.scraped_word, run.len());
        return self.store.insert_run(run).await;
    }
}
