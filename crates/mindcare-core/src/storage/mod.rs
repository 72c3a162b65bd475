//! Persistence: the key-value store, its key space, and TOML configuration.

mod config;
pub mod database;
pub mod keys;
mod memory;

pub use config::{BreathingConfig, Config, ProfileDefaults};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StorageError};

/// String-keyed storage that survives restarts.
///
/// Values are plain strings or JSON-encoded strings. The store is owned by a
/// single process; concurrent writers are last-write-wins.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Read a JSON value. Missing keys and malformed JSON both yield `None`.
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring malformed persisted value");
            Ok(None)
        }
    }
}

pub fn write_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// Read a plain value with `FromStr`. Unparseable values yield `None`.
pub fn read_parsed<T: FromStr>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match raw.trim().parse() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable persisted value");
            Ok(None)
        }
    }
}

/// Returns the data directory, creating it if needed.
///
/// `MINDCARE_DATA_DIR` wins when set. Otherwise `~/.config/mindcare`, or
/// `~/.config/mindcare-dev` when `MINDCARE_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("MINDCARE_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("MINDCARE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("mindcare-dev")
            } else {
                base_dir.join("mindcare")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_json_treats_garbage_as_absent() {
        let store = MemoryStore::new();
        store.set("k", "{not json").unwrap();
        let value: Option<Vec<u32>> = read_json(&store, "k").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn read_parsed_trims_and_rejects() {
        let store = MemoryStore::new();
        store.set("n", " 42 ").unwrap();
        store.set("bad", "forty-two").unwrap();
        assert_eq!(read_parsed::<u64>(&store, "n").unwrap(), Some(42));
        assert_eq!(read_parsed::<u64>(&store, "bad").unwrap(), None);
        assert_eq!(read_parsed::<u64>(&store, "missing").unwrap(), None);
    }

    #[test]
    fn write_then_read_json() {
        let store = MemoryStore::new();
        write_json(&store, "list", &vec![1, 2, 3]).unwrap();
        assert_eq!(store.get("list").unwrap().as_deref(), Some("[1,2,3]"));
    }
}
