//! Single-writer storage actor.
//!
//! Every operation on the wrapped backend is sent over a channel and
//! executed one at a time by a dedicated task. Read-modify-write updates
//! therefore never interleave, even when several managers (or several
//! simulated windows) share the same store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace};

use liorian_core::error::AppError;
use liorian_core::result::AppResult;
use liorian_core::traits::{KeyValueStore, UpdateFn};

type Reply<T> = oneshot::Sender<AppResult<T>>;

/// Requests processed by the actor task.
enum Command {
    Get {
        key: String,
        reply: Reply<Option<String>>,
    },
    Set {
        key: String,
        value: String,
        reply: Reply<()>,
    },
    Remove {
        key: String,
        reply: Reply<()>,
    },
    Keys {
        reply: Reply<Vec<String>>,
    },
    Clear {
        reply: Reply<()>,
    },
    Update {
        key: String,
        f: UpdateFn,
        reply: Reply<Option<String>>,
    },
}

/// Handle to a storage actor. Clones talk to the same actor.
#[derive(Clone)]
pub struct SerializedStore {
    tx: mpsc::Sender<Command>,
    provider: String,
}

impl std::fmt::Debug for SerializedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializedStore")
            .field("provider", &self.provider)
            .finish()
    }
}

impl SerializedStore {
    /// Queue depth of the actor channel.
    const QUEUE_DEPTH: usize = 256;

    /// Spawn the actor task owning `inner`. Must be called inside a Tokio runtime.
    ///
    /// The task exits once every handle has been dropped.
    pub fn spawn(inner: Arc<dyn KeyValueStore>) -> Self {
        let provider = format!("serialized:{}", inner.provider_type());
        let (tx, mut rx) = mpsc::channel::<Command>(Self::QUEUE_DEPTH);

        tokio::spawn(async move {
            debug!(provider = inner.provider_type(), "Storage actor started");
            while let Some(command) = rx.recv().await {
                Self::handle(inner.as_ref(), command).await;
            }
            debug!(provider = inner.provider_type(), "Storage actor stopped");
        });

        Self { tx, provider }
    }

    async fn handle(inner: &dyn KeyValueStore, command: Command) {
        // A dropped receiver only means the caller stopped waiting.
        match command {
            Command::Get { key, reply } => {
                let _ = reply.send(inner.get(&key).await);
            }
            Command::Set { key, value, reply } => {
                trace!(key = %key, "Actor set");
                let _ = reply.send(inner.set(&key, &value).await);
            }
            Command::Remove { key, reply } => {
                let _ = reply.send(inner.remove(&key).await);
            }
            Command::Keys { reply } => {
                let _ = reply.send(inner.keys().await);
            }
            Command::Clear { reply } => {
                let _ = reply.send(inner.clear().await);
            }
            Command::Update { key, f, reply } => {
                let result = async {
                    let current = inner.get(&key).await?;
                    let next = f(current);
                    match &next {
                        Some(value) => inner.set(&key, value).await?,
                        None => inner.remove(&key).await?,
                    }
                    Ok(next)
                }
                .await;
                let _ = reply.send(result);
            }
        }
    }

    async fn request<T>(&self, build: impl FnOnce(Reply<T>) -> Command) -> AppResult<T> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(build(reply))
            .await
            .map_err(|_| AppError::storage("Storage actor has stopped"))?;
        rx.await
            .map_err(|_| AppError::storage("Storage actor dropped the request"))?
    }
}

#[async_trait]
impl KeyValueStore for SerializedStore {
    fn provider_type(&self) -> &str {
        &self.provider
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let key = key.to_string();
        self.request(|reply| Command::Get { key, reply }).await
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.request(|reply| Command::Set { key, value, reply }).await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let key = key.to_string();
        self.request(|reply| Command::Remove { key, reply }).await
    }

    async fn keys(&self) -> AppResult<Vec<String>> {
        self.request(|reply| Command::Keys { reply }).await
    }

    async fn clear(&self) -> AppResult<()> {
        self.request(|reply| Command::Clear { reply }).await
    }

    async fn update(&self, key: &str, f: UpdateFn) -> AppResult<Option<String>> {
        let key = key.to_string();
        self.request(|reply| Command::Update { key, f, reply }).await
    }
}
