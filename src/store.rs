//! Persistent duel records.
//!
//! The engine keeps everything it needs between commands in a key-value
//! [`StateStore`]. Keys come from [`crate::core::player_key`],
//! [`crate::core::duel_key`] and [`crate::core::turn_key`]; values are
//! bincode-encoded records.

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::trace;

use crate::error::{DuelError, DuelResult};

/// Byte-valued key-value storage owned by the embedder.
pub trait StateStore {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: Vec<u8>);

    /// Delete `key`. Missing keys are ignored.
    fn remove(&mut self, key: &str);
}

/// In-process store backed by a hash map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: FxHashMap<String, Vec<u8>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether `key` holds a record.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.records.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Vec<u8>) {
        self.records.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.records.remove(key);
    }
}

/// Decode the record under `key`.
pub fn load<T, S>(store: &S, key: &str) -> DuelResult<Option<T>>
where
    T: DeserializeOwned,
    S: StateStore + ?Sized,
{
    let Some(bytes) = store.get(key) else {
        return Ok(None);
    };
    bincode::deserialize(&bytes)
        .map(Some)
        .map_err(|source| DuelError::CorruptState {
            key: key.to_string(),
            source,
        })
}

/// Encode `value` under `key`.
pub fn save<T, S>(store: &mut S, key: &str, value: &T) -> DuelResult<()>
where
    T: Serialize,
    S: StateStore + ?Sized,
{
    let bytes = bincode::serialize(value).map_err(|source| DuelError::CorruptState {
        key: key.to_string(),
        source,
    })?;
    trace!(key, len = bytes.len(), "record saved");
    store.set(key, bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{player_key, BaseStats, DuelStatus, PlayerState};

    #[test]
    fn test_round_trip_player_record() {
        let mut store = MemoryStore::new();
        let state = PlayerState::new("alice", true, "bob", BaseStats::default());

        save(&mut store, &player_key("alice"), &state).unwrap();
        let loaded: Option<PlayerState> = load(&store, &player_key("alice")).unwrap();

        assert_eq!(loaded, Some(state));
    }

    #[test]
    fn test_missing_key() {
        let store = MemoryStore::new();
        let loaded: Option<DuelStatus> = load(&store, "duel-status:a-b").unwrap();

        assert!(loaded.is_none());
    }

    #[test]
    fn test_corrupt_record() {
        let mut store = MemoryStore::new();
        store.set("alice.duel-info", vec![0xff]);

        let err = load::<PlayerState, _>(&store, "alice.duel-info").unwrap_err();
        assert!(matches!(err, DuelError::CorruptState { ref key, .. } if key == "alice.duel-info"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_remove() {
        let mut store = MemoryStore::new();
        save(&mut store, "k", &DuelStatus::Dueling).unwrap();
        assert!(store.contains("k"));

        store.remove("k");
        store.remove("k");
        assert!(store.is_empty());
    }
}
