//! Record publishing adapters

mod file_publisher;

pub use file_publisher::FileRecordPublisher;
