use super::storage::{KeyValueStore, VOTED_IDEAS_KEY};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Client-side cache of the ideas this browser profile has a confirmed vote on.
///
/// The server stays authoritative; the ledger only gates vote attempts before a
/// round trip. It is persisted as a JSON array in [`VOTED_IDEAS_KEY`] and every
/// write is best-effort: a failing store is logged, never surfaced.
#[derive(Clone)]
pub struct VoteLedger {
    store: Arc<dyn KeyValueStore>,
}

impl VoteLedger {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn voted_ideas(&self) -> BTreeSet<String> {
        let Some(raw) = self.store.get(VOTED_IDEAS_KEY) else {
            return BTreeSet::new();
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => ids.into_iter().collect(),
            Err(e) => {
                tracing::warn!("Discarding unreadable voted-ideas slot: {}", e);
                BTreeSet::new()
            }
        }
    }

    pub fn has_voted(&self, idea_id: &str) -> bool {
        self.voted_ideas().contains(idea_id)
    }

    pub fn add_vote(&self, idea_id: &str) {
        let mut ids = self.voted_ideas();
        if ids.insert(idea_id.to_string()) {
            tracing::debug!("Recorded vote for idea {}", idea_id);
            self.write(&ids);
        }
    }

    /// Rollback path for an optimistic record that the server rejected.
    pub fn remove_vote(&self, idea_id: &str) {
        let mut ids = self.voted_ideas();
        if ids.remove(idea_id) {
            tracing::debug!("Removed vote for idea {}", idea_id);
            self.write(&ids);
        }
    }

    pub fn replace_all<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: BTreeSet<String> = ids.into_iter().map(Into::into).collect();
        tracing::debug!("Replacing voted ideas with {} server entries", ids.len());
        self.write(&ids);
    }

    /// Union with a server-provided list. Local entries the server does not
    /// mention are kept. Returns whether the stored set changed.
    pub fn reconcile<I, S>(&self, server_ids: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ids = self.voted_ideas();
        let before = ids.len();
        ids.extend(server_ids.into_iter().map(Into::into));

        if ids.len() == before {
            return false;
        }

        tracing::debug!("Reconciled voted ideas: {} -> {}", before, ids.len());
        self.write(&ids);
        true
    }

    pub fn clear(&self) {
        self.store.remove(VOTED_IDEAS_KEY);
    }

    fn write(&self, ids: &BTreeSet<String>) {
        let json = match serde_json::to_string(ids) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to encode voted ideas: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(VOTED_IDEAS_KEY, &json) {
            tracing::warn!("Failed to persist voted ideas: {}", e);
        }
    }
}
