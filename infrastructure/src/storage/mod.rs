//! Storage adapters for decisions, votes and rosters
//!
//! Both adapters implement all three repository ports:
//!
//! - [`InMemoryStore`]: process-local maps; can simulate lagging vote
//!   queries to exercise the eventually consistent read path
//! - [`JsonFileStore`]: one JSON document per entity under a data directory

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;
