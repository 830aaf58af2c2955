//! Infrastructure layer for decision-quorum
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod clock;
pub mod config;
pub mod directory;
pub mod logging;
pub mod publishing;
pub mod storage;

// Re-export commonly used types
pub use clock::SystemClock;
pub use config::{
    ConfigLoader, FileConfig, FileEngineConfig, FileLoggingConfig, FileOutputConfig,
    FileRecordsConfig, FileStorageConfig,
};
pub use directory::StaticUserDirectory;
pub use logging::JsonlDecisionLogger;
pub use publishing::FileRecordPublisher;
pub use storage::{InMemoryStore, JsonFileStore};
