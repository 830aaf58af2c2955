//! Display names from configuration

use async_trait::async_trait;
use decision_application::UserDirectory;
use decision_domain::UserId;
use std::collections::{BTreeMap, HashMap};

/// Directory fed from the `[users]` config table
///
/// Blank names are ignored so the raw user ID is shown instead.
#[derive(Debug, Clone, Default)]
pub struct StaticUserDirectory {
    names: HashMap<UserId, String>,
}

impl StaticUserDirectory {
    pub fn new(names: HashMap<UserId, String>) -> Self {
        Self { names }
    }

    /// Build from the raw `[users]` table
    pub fn from_config(users: &BTreeMap<String, String>) -> Self {
        let names = users
            .iter()
            .filter(|(_, name)| !name.trim().is_empty())
            .map(|(id, name)| (UserId::new(id.as_str()), name.trim().to_string()))
            .collect();
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn display_name(&self, user_id: &UserId) -> Option<String> {
        self.names.get(user_id).cloned()
    }
}
