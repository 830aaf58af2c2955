//! Record publishing port

use async_trait::async_trait;
use decision_domain::DecisionRecord;
use thiserror::Error;

/// Errors while publishing a decision record
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("I/O error while publishing record: {0}")]
    Io(#[from] std::io::Error),

    #[error("A different record already exists at {0}")]
    AlreadyExists(String),

    #[error("Publishing failed: {0}")]
    Other(String),
}

/// Destination for rendered decision records
#[async_trait]
pub trait RecordPublisher: Send + Sync {
    /// Publish a record, returning where it ended up (path, URL, ...)
    async fn publish(&self, record: &DecisionRecord) -> Result<String, PublishError>;
}

/// Publisher that drops records, for tests and when records are disabled
pub struct NoRecordPublisher;

#[async_trait]
impl RecordPublisher for NoRecordPublisher {
    async fn publish(&self, record: &DecisionRecord) -> Result<String, PublishError> {
        Ok(record.file_name())
    }
}
