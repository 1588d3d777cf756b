use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::post_record::PostRecord;

/// One persisted collection run. Built once by the recorder and never mutated.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RunRecord {
    pub scraped_word: String,
    pub scraped_date_range: String,
    pub scraped_date: String,
    pub scraped_data: Arc<[PostRecord]>,
}

impl RunRecord {
    pub fn len(&self) -> usize {
        return self.scraped_data.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.scraped_data.is_empty();
    }
}
