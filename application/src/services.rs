//! Collaborators shared by all use cases.

use crate::config::EngineConfig;
use crate::ports::clock::Clock;
use crate::ports::decision_store::{DecisionRepository, RosterRepository, VoteRepository};
use crate::ports::event_logger::{DecisionEventLogger, NoDecisionLogger};
use crate::ports::record_publisher::{NoRecordPublisher, RecordPublisher};
use crate::ports::user_directory::{NoUserDirectory, UserDirectory};
use std::sync::Arc;

/// Ports injected into every use case
///
/// Cheap to clone; every field is reference counted.
#[derive(Clone)]
pub struct DecisionServices {
    pub decisions: Arc<dyn DecisionRepository>,
    pub votes: Arc<dyn VoteRepository>,
    pub roster: Arc<dyn RosterRepository>,
    pub clock: Arc<dyn Clock>,
    pub directory: Arc<dyn UserDirectory>,
    pub publisher: Arc<dyn RecordPublisher>,
    pub logger: Arc<dyn DecisionEventLogger>,
    pub config: EngineConfig,
}

impl DecisionServices {
    /// Services over a single store that holds decisions, votes and rosters
    pub fn from_store<S>(store: Arc<S>, clock: Arc<dyn Clock>) -> Self
    where
        S: DecisionRepository + VoteRepository + RosterRepository + 'static,
    {
        Self {
            decisions: store.clone(),
            votes: store.clone(),
            roster: store,
            clock,
            directory: Arc::new(NoUserDirectory),
            publisher: Arc::new(NoRecordPublisher),
            logger: Arc::new(NoDecisionLogger),
            config: EngineConfig::default(),
        }
    }

    pub fn with_directory(mut self, directory: Arc<dyn UserDirectory>) -> Self {
        self.directory = directory;
        self
    }

    pub fn with_publisher(mut self, publisher: Arc<dyn RecordPublisher>) -> Self {
        self.publisher = publisher;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn DecisionEventLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }
}
