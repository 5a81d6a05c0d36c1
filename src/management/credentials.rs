use std::{collections::HashMap, io::ErrorKind, path::PathBuf};

use tokio::sync::Mutex;

use crate::types::TokenRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Durable per-user credential records, keyed by `user_id`.
///
/// The full record map lives in memory behind an async mutex and is written
/// back to a single JSON file on every mutation. Writes go through a
/// temporary file followed by a rename, so a record update is all-or-nothing
/// on disk. Opening the store is an explicit step; nothing touches the file
/// system at import time.
pub struct CredentialStore {
    path: PathBuf,
    records: Mutex<HashMap<String, TokenRecord>>,
}

impl CredentialStore {
    /// Opens the store at `path`, loading any previously persisted records.
    ///
    /// A missing file yields an empty store; any other IO or parse failure
    /// is an error.
    pub async fn open(path: PathBuf) -> Result<Self, StoreError> {
        let records = match async_fs::read_to_string(&path).await {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StoreError::Io(e)),
        };

        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    /// Returns the record for `user_id`, if one exists.
    pub async fn get(&self, user_id: &str) -> Option<TokenRecord> {
        let records = self.records.lock().await;
        records.get(user_id).cloned()
    }

    /// Inserts or replaces the record for `record.user_id` and persists.
    pub async fn upsert(&self, record: TokenRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        records.insert(record.user_id.clone(), record);
        self.persist(&records).await
    }

    /// Removes the record for `user_id` and persists.
    ///
    /// Returns whether a record was present. Deleting an absent user is a
    /// successful no-op, which keeps logout idempotent.
    pub async fn delete(&self, user_id: &str) -> Result<bool, StoreError> {
        let mut records = self.records.lock().await;
        let existed = records.remove(user_id).is_some();
        if existed {
            self.persist(&records).await?;
        }
        Ok(existed)
    }

    /// User ids of all stored records.
    pub async fn list(&self) -> Vec<String> {
        let records = self.records.lock().await;
        let mut ids: Vec<String> = records.keys().cloned().collect();
        ids.sort();
        ids
    }

    async fn persist(&self, records: &HashMap<String, TokenRecord>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("tmp");
        async_fs::write(&tmp, json).await?;
        async_fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
