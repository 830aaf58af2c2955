//! Write decision records as Markdown files

use async_trait::async_trait;
use decision_application::{PublishError, RecordPublisher};
use decision_domain::DecisionRecord;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

/// Publisher writing `<output_dir>/ADR-<number>-<slug>.md`
///
/// Never overwrites a different record. Publishing identical content
/// again succeeds.
pub struct FileRecordPublisher {
    output_dir: PathBuf,
}

impl FileRecordPublisher {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl RecordPublisher for FileRecordPublisher {
    async fn publish(&self, record: &DecisionRecord) -> Result<String, PublishError> {
        fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(record.file_name());
        let location = path.display().to_string();

        match OpenOptions::new().write(true).create_new(true).open(&path).await {
            Ok(mut file) => {
                file.write_all(record.content.as_bytes()).await?;
                file.flush().await?;
                info!("Wrote decision record {}", location);
                Ok(location)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if fs::read_to_string(&path).await? == record.content {
                    Ok(location)
                } else {
                    warn!("Refusing to overwrite decision record {}", location);
                    Err(PublishError::AlreadyExists(location))
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}
