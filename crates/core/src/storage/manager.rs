use std::path::Path;

use crate::errors::CoreError;

use super::format;
use super::memory::{MemoryStore, StoreContents};

/// Save/load the in-process store to/from portable bytes or files.
pub struct SnapshotManager;

impl SnapshotManager {
    /// Flow: StoreContents → bincode → FNTK framing
    pub fn save_to_bytes(contents: &StoreContents) -> Result<Vec<u8>, CoreError> {
        let payload = bincode::serialize(contents)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize store: {e}")))?;
        Ok(format::write_snapshot(format::CURRENT_VERSION, &payload))
    }

    /// Flow: FNTK framing → bincode → StoreContents
    pub fn load_from_bytes(data: &[u8]) -> Result<StoreContents, CoreError> {
        let (_, payload) = format::read_snapshot(data)?;
        bincode::deserialize(payload)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize store: {e}")))
    }

    /// Snapshot a live store.
    pub async fn save_store(store: &MemoryStore) -> Result<Vec<u8>, CoreError> {
        Self::save_to_bytes(&store.snapshot().await)
    }

    /// Rebuild a store from a snapshot.
    pub fn load_store(data: &[u8]) -> Result<MemoryStore, CoreError> {
        Ok(MemoryStore::from_contents(Self::load_from_bytes(data)?))
    }

    pub async fn save_to_file<P: AsRef<Path>>(store: &MemoryStore, path: P) -> Result<(), CoreError> {
        let bytes = Self::save_store(store).await?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<MemoryStore, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_store(&bytes)
    }
}
