pub mod snapshot;
pub mod sqlite;

pub use sqlite::Store;

use crate::models::BotRecord;

/// Two-tier persistence: a durable SQLite store plus a local JSON/CSV
/// snapshot. Either tier may be absent or failing; writes always attempt
/// both and never raise to the sync loop.
pub struct Persistence {
    store: Option<Store>,
    snapshot_base: String,
}

impl Persistence {
    pub fn new(store: Option<Store>, snapshot_base: impl Into<String>) -> Self {
        Self {
            store,
            snapshot_base: snapshot_base.into(),
        }
    }

    /// Rewrites the snapshot with the full accumulated list and upserts every
    /// record into the durable store.
    pub fn persist(&self, records: &[BotRecord]) {
        snapshot::write(&self.snapshot_base, records);

        match &self.store {
            None => tracing::debug!("No durable store configured, skipping upsert"),
            Some(store) => {
                if let Err(e) = store.upsert_all(records) {
                    tracing::warn!("Durable store upsert failed: {}", e);
                }
            }
        }
    }

    /// Read side: durable store first, then the local snapshot, then empty.
    /// Ordered by stars descending when served from the store.
    pub fn fetch_all(&self) -> Vec<BotRecord> {
        if let Some(store) = &self.store {
            match store.list_by_stars() {
                Ok(records) if !records.is_empty() => return records,
                Ok(_) => {}
                Err(e) => tracing::warn!("Durable store read failed: {}", e),
            }
        }
        snapshot::read(&self.snapshot_base)
    }
}
