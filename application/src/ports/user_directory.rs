//! User directory port
//!
//! Resolves user IDs to display names for decision records.

use async_trait::async_trait;
use decision_domain::UserId;
use std::collections::HashMap;

/// Display-name lookup
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Display name for a user, if known
    async fn display_name(&self, user_id: &UserId) -> Option<String>;

    /// Resolve many users at once; unknown users map to their raw ID
    async fn display_names(&self, user_ids: &[UserId]) -> HashMap<UserId, String> {
        let lookups = user_ids.iter().map(|id| async move {
            let name = self
                .display_name(id)
                .await
                .unwrap_or_else(|| id.to_string());
            (id.clone(), name)
        });
        futures::future::join_all(lookups).await.into_iter().collect()
    }
}

/// Directory that knows nobody; every user is shown by ID
pub struct NoUserDirectory;

#[async_trait]
impl UserDirectory for NoUserDirectory {
    async fn display_name(&self, _user_id: &UserId) -> Option<String> {
        None
    }
}
