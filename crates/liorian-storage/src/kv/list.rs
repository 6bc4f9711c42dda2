//! A typed JSON array stored under one key.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;

use liorian_core::error::AppError;
use liorian_core::result::AppResult;
use liorian_core::traits::KeyValueStore;

/// JSON array of `T` kept under `key`.
///
/// [`modify`](Self::modify) runs as one [`KeyValueStore::update`], so on a
/// [`SerializedStore`](crate::SerializedStore) concurrent modifications
/// never lose each other's writes.
pub struct JsonList<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonList<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for JsonList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonList").field("key", &self.key).finish()
    }
}

impl<T> JsonList<T>
where
    T: Serialize + DeserializeOwned + Send + 'static,
{
    /// Bind a list to `key` in `store`.
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _marker: PhantomData,
        }
    }

    /// Storage key of the list.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current entries; an absent key is an empty list.
    pub async fn load(&self) -> AppResult<Vec<T>> {
        Ok(self.store.get_json::<Vec<T>>(&self.key).await?.unwrap_or_default())
    }

    /// Apply `f` to the entries and store the result.
    ///
    /// When `f` fails, or the stored value cannot be parsed, nothing is
    /// written and the error is returned.
    pub async fn modify<R, F>(&self, f: F) -> AppResult<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut Vec<T>) -> AppResult<R> + Send + 'static,
    {
        let outcome: Arc<Mutex<Option<AppResult<R>>>> = Arc::new(Mutex::new(None));
        let slot = outcome.clone();

        self.store
            .update(
                &self.key,
                Box::new(move |current| {
                    let parsed = match &current {
                        Some(raw) => serde_json::from_str::<Vec<T>>(raw).map_err(AppError::from),
                        None => Ok(Vec::new()),
                    };
                    let result = parsed.and_then(|mut items| {
                        let value = f(&mut items)?;
                        Ok((value, serde_json::to_string(&items)?))
                    });
                    let (next, result) = match result {
                        Ok((value, json)) => (Some(json), Ok(value)),
                        Err(e) => (current, Err(e)),
                    };
                    if let Ok(mut slot) = slot.lock() {
                        *slot = Some(result);
                    }
                    next
                }),
            )
            .await?;

        let result = outcome.lock().ok().and_then(|mut slot| slot.take());
        result.unwrap_or_else(|| Err(AppError::internal("List update produced no result")))
    }
}
