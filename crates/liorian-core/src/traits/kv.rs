//! Key-value store trait.
//!
//! Models the string-to-string storage areas the web client persists its
//! state in: one store shared by every window (local storage) and one
//! store per window (session storage).

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::result::AppResult;

/// Read-modify-write closure passed to [`KeyValueStore::update`].
///
/// Receives the current value (if any) and returns the value to store;
/// returning `None` removes the key.
pub type UpdateFn = Box<dyn FnOnce(Option<String>) -> Option<String> + Send>;

/// Trait for string key-value backends.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend name (e.g., "memory", "file").
    fn provider_type(&self) -> &str;

    /// Get a value. Returns `None` if the key is absent.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value, replacing any existing one.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// List every key currently stored.
    async fn keys(&self) -> AppResult<Vec<String>>;

    /// Remove every key.
    async fn clear(&self) -> AppResult<()>;

    /// Apply a read-modify-write to one key and return the new value.
    ///
    /// The default implementation is a plain get followed by set/remove and
    /// is **not** atomic. Serialized stores override it.
    async fn update(&self, key: &str, f: UpdateFn) -> AppResult<Option<String>> {
        let current = self.get(key).await?;
        let next = f(current);
        match &next {
            Some(value) => self.set(key, value).await?,
            None => self.remove(key).await?,
        }
        Ok(next)
    }
}

impl dyn KeyValueStore {
    /// Get a typed value by deserializing from JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Set a typed value by serializing to JSON.
    pub async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.set(key, &json).await
    }

    /// Remove several keys, stopping at the first failure.
    pub async fn remove_all(&self, keys: &[&str]) -> AppResult<()> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }
}
