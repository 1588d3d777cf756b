use std::process::ExitStatus;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("search feed is unreachable: {0}")]
    Unreachable(#[source] std::io::Error),

    #[error("search feed rejected query `{query}` ({status})")]
    Rejected { status: ExitStatus, query: String },

    #[error("malformed item from search feed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("failed reading from search feed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid store configuration: {0}")]
    Config(#[source] mongodb::error::Error),

    #[error("document store is unreachable: {0}")]
    Unreachable(#[source] mongodb::error::Error),

    #[error("document store rejected the write: {0}")]
    Rejected(#[source] mongodb::error::Error),
}

impl From<mongodb::error::Error> for StorageError {
    fn from(err: mongodb::error::Error) -> Self {
        return match *err.kind {
            mongodb::error::ErrorKind::ServerSelection { .. }
            | mongodb::error::ErrorKind::Io(_)
            | mongodb::error::ErrorKind::DnsResolve { .. } => StorageError::Unreachable(err),
            _ => StorageError::Rejected(err),
        };
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("end date {end} is before start date {start}")]
pub struct InvalidRangeError {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unable to write export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    InvalidRange(#[from] InvalidRangeError),

    #[error(transparent)]
    Collection(#[from] CollectionError),
}
