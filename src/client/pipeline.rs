use std::num::NonZeroUsize;

use chrono::NaiveDate;
use log::{error, info};

use crate::commons::{
    error::{InvalidRangeError, PipelineError, StorageError},
    run_record::RunRecord,
};

use super::{collector::Collector, recorder::RunRecorder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub query: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_count: NonZeroUsize,
    pub persist: bool,
}

impl RunRequest {
    pub fn validate(&self) -> Result<(), InvalidRangeError> {
        if self.end_date < self.start_date {
            return Err(InvalidRangeError {
                start: self.start_date,
                end: self.end_date,
            });
        }
        return Ok(());
    }
}

/// Result of a completed collection. The run is kept even if storing it failed.
#[derive(Debug)]
pub struct RunOutcome {
    pub run: RunRecord,
    pub persisted: Option<Result<(), StorageError>>,
}

pub struct Pipeline {
    collector: Collector,
    recorder: RunRecorder,
}

impl Pipeline {
    pub fn new(collector: Collector, recorder: RunRecorder) -> Pipeline {
        return Pipeline { collector, recorder };
    }

    pub async fn run(&self, request: &RunRequest) -> Result<RunOutcome, PipelineError> {
        request.validate()?;

        let records = self
            .collector
            .collect(&request.query, request.start_date, request.end_date, request.max_count)
            .await?;
        let run = self
            .recorder
            .record(&request.query, &request.start_date, &request.end_date, records);

        let persisted = if request.persist {
            let result = self.recorder.persist(&run).await;
            if let Err(err) = &result {
                error!("run for `{}` was not stored: {}", run.scraped_word, err);
            }
            Some(result)
        } else {
            info!("persistence disabled, run for `{}` kept in memory", run.scraped_word);
            None
        };

        return Ok(RunOutcome { run, persisted });
    }
}
