use async_trait::async_trait;

use super::{error::StorageError, run_record::RunRecord};

#[async_trait]
pub trait RunStore: Send + Sync {
    /// Inserts `run` as a new document. Never updates an existing one.
    async fn insert_run(&self, run: &RunRecord) -> Result<(), StorageError>;
}
