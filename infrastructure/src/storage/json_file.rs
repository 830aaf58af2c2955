//! JSON file store
//!
//! Layout under the data directory:
//!
//! ```text
//! decisions/<decision-id>.json
//! voters/<decision-id>.json
//! votes/<decision-id>/<user-id>.json
//! ```
//!
//! Each write goes to a temporary file first and is renamed into place, so
//! readers never observe a half-written document. Temporary names are
//! unique per write, so overlapping writes of the same document each
//! rename their own file and the last rename wins.

use async_trait::async_trait;
use decision_application::{DecisionRepository, RosterRepository, StoreError, VoteRepository};
use decision_domain::{Decision, DecisionId, UserId, Vote, Voter};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tracing::{debug, warn};

/// Store that keeps one JSON document per entity
pub struct JsonFileStore {
    base_path: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `base_path`
    pub async fn open(base_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_path = base_path.into();
        for dir in ["decisions", "voters", "votes"] {
            fs::create_dir_all(base_path.join(dir)).await?;
        }
        debug!("Opened decision store at {}", base_path.display());
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn decision_path(&self, id: &DecisionId) -> PathBuf {
        self.base_path
            .join("decisions")
            .join(file_name(id.as_str()))
    }

    fn voters_path(&self, id: &DecisionId) -> PathBuf {
        self.base_path.join("voters").join(file_name(id.as_str()))
    }

    fn votes_dir(&self, id: &DecisionId) -> PathBuf {
        self.base_path.join("votes").join(path_segment(id.as_str()))
    }

    fn vote_path(&self, decision_id: &DecisionId, user_id: &UserId) -> PathBuf {
        self.votes_dir(decision_id)
            .join(file_name(user_id.as_str()))
    }
}

/// Sequence for temporary file names within this process
static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Encode an ID as a single, non-hidden path segment
///
/// Percent-encodes everything outside `[A-Za-z0-9._-]`, plus a leading
/// `.` and `%` itself, so distinct IDs never share a file. The empty ID
/// becomes a lone `%`, which no other ID encodes to.
fn path_segment(raw: &str) -> String {
    if raw.is_empty() {
        return "%".to_string();
    }
    let mut segment = String::with_capacity(raw.len());
    for (i, c) in raw.char_indices() {
        let keep = c.is_ascii_alphanumeric() || c == '-' || c == '_' || (c == '.' && i > 0);
        if keep {
            segment.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                let _ = write!(segment, "%{:02X}", byte);
            }
        }
    }
    segment
}

fn file_name(raw: &str) -> String {
    format!("{}.json", path_segment(raw))
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| StoreError::Corrupt {
            key: path.display().to_string(),
            message: e.to_string(),
        })
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let bytes = serde_json::to_vec_pretty(value).map_err(|e| StoreError::Corrupt {
        key: path.display().to_string(),
        message: e.to_string(),
    })?;
    let tmp = path.with_extension(format!(
        "json.{}-{}.tmp",
        std::process::id(),
        TMP_SEQ.fetch_add(1, Ordering::Relaxed)
    ));
    fs::write(&tmp, bytes).await?;
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

/// Parse every `*.json` file in `dir`; unreadable entries are skipped with a warning
async fn read_all<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>, StoreError> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut items = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        match read_json(&path).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }
    Ok(items)
}

#[async_trait]
impl DecisionRepository for JsonFileStore {
    async fn get_decision(&self, id: &DecisionId) -> Result<Option<Decision>, StoreError> {
        read_json(&self.decision_path(id)).await
    }

    async fn put_decision(&self, decision: &Decision) -> Result<(), StoreError> {
        write_json(&self.decision_path(&decision.id), decision).await
    }

    async fn list_active_decisions(&self) -> Result<Vec<Decision>, StoreError> {
        let mut active: Vec<Decision> = read_all::<Decision>(&self.base_path.join("decisions"))
            .await?
            .into_iter()
            .filter(|d| d.is_active())
            .collect();
        active.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(active)
    }
}

#[async_trait]
impl VoteRepository for JsonFileStore {
    async fn put_vote(&self, vote: &Vote) -> Result<(), StoreError> {
        write_json(&self.vote_path(&vote.decision_id, &vote.user_id), vote).await
    }

    async fn get_vote(
        &self,
        decision_id: &DecisionId,
        user_id: &UserId,
    ) -> Result<Option<Vote>, StoreError> {
        read_json(&self.vote_path(decision_id, user_id)).await
    }

    async fn query_votes(&self, decision_id: &DecisionId) -> Result<Vec<Vote>, StoreError> {
        let mut votes: Vec<Vote> = read_all(&self.votes_dir(decision_id)).await?;
        votes.sort_by(|a, b| a.voted_at.cmp(&b.voted_at));
        Ok(votes)
    }
}

#[async_trait]
impl RosterRepository for JsonFileStore {
    async fn put_voters(
        &self,
        decision_id: &DecisionId,
        voters: &[Voter],
    ) -> Result<(), StoreError> {
        write_json(&self.voters_path(decision_id), voters).await
    }

    async fn voters(&self, decision_id: &DecisionId) -> Result<Vec<Voter>, StoreError> {
        Ok(read_json(&self.voters_path(decision_id))
            .await?
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use decision_domain::{SuccessCriteria, VoteType, build_roster};

    fn decision(id: &str) -> Decision {
        Decision::new(
            DecisionId::new(id),
            "Rename the service",
            "Call it `ledger` from now on",
            SuccessCriteria::SuperMajority,
            NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            UserId::new("U1"),
            Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_decision_roundtrip_and_listing() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        store.put_decision(&decision("1792314000.000001")).await.unwrap();
        store.put_decision(&decision("1792314000.000002")).await.unwrap();

        let loaded = store
            .get_decision(&DecisionId::new("1792314000.000001"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, decision("1792314000.000001"));
        assert!(
            store
                .get_decision(&DecisionId::new("missing"))
                .await
                .unwrap()
                .is_none()
        );

        let active = store.list_active_decisions().await.unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].id, DecisionId::new("1792314000.000001"));
    }

    #[tokio::test]
    async fn test_votes_and_roster() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        let id = DecisionId::new("1792314000.000003");
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();

        store
            .put_voters(&id, &build_roster(&id, &["U1".into(), "U2".into()]))
            .await
            .unwrap();
        store
            .put_vote(&Vote::new(id.clone(), "U2".into(), VoteType::No, at))
            .await
            .unwrap();
        store
            .put_vote(&Vote::new(id.clone(), "U2".into(), VoteType::Yes, at))
            .await
            .unwrap();

        assert_eq!(store.voters(&id).await.unwrap().len(), 2);
        let votes = store.query_votes(&id).await.unwrap();
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].vote_type, VoteType::Yes);
        assert!(
            store
                .voters(&DecisionId::new("none"))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_corrupt_document_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        std::fs::write(dir.path().join("decisions").join("bad.json"), "{not json").unwrap();

        let err = store
            .get_decision(&DecisionId::new("bad"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        // Listing skips the broken file instead of failing
        assert!(store.list_active_decisions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_overlapping_writes_of_same_decision() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(JsonFileStore::open(dir.path()).await.unwrap());
        let id = "1792314000.000004";

        let writes: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.put_decision(&decision(id)).await })
            })
            .collect();
        for handle in writes {
            handle.await.unwrap().unwrap();
        }

        let loaded = store.get_decision(&DecisionId::new(id)).await.unwrap();
        assert_eq!(loaded, Some(decision(id)));
        let leftovers = std::fs::read_dir(dir.path().join("decisions"))
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .ends_with(".tmp")
            })
            .count();
        assert_eq!(leftovers, 0);
    }

    #[tokio::test]
    async fn test_dot_and_empty_ids_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        let ids = ["", ".", "..", "_"];
        for id in ids {
            store.put_decision(&decision(id)).await.unwrap();
        }
        for id in ids {
            let loaded = store.get_decision(&DecisionId::new(id)).await.unwrap();
            assert_eq!(loaded.map(|d| d.id), Some(DecisionId::new(id)));
        }
        assert_eq!(store.list_active_decisions().await.unwrap().len(), 4);
        assert_ne!(store.votes_dir(&DecisionId::new("..")), dir.path().join("votes"));
    }

    #[test]
    fn test_path_segment_escapes_separators() {
        assert_eq!(path_segment("../etc/passwd"), "%2E.%2Fetc%2Fpasswd");
        assert_eq!(path_segment("a/b"), "a%2Fb");
        assert_ne!(path_segment("a/b"), path_segment("a_b"));
        assert_eq!(path_segment("1792314000.000001"), "1792314000.000001");
        assert_eq!(path_segment(""), "%");
        assert_eq!(path_segment("."), "%2E");
        assert_eq!(path_segment(".."), "%2E.");
    }
}
