//! Lightweight presence-only auth helper.
//!
//! Keeps the signed-in user, role, token and login time in the shared
//! store and treats their presence as "signed in". It has no expiry and no
//! window pinning, so a second window that the session manager rejects is
//! still signed in as far as this helper is concerned.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use liorian_core::result::AppResult;
use liorian_core::traits::{Clock, KeyValueStore};
use liorian_entity::user::UserType;
use liorian_storage::keys;

use crate::authenticator::{AuthGrant, Authenticator};

/// Presence-only sign-in helper.
#[derive(Debug, Clone)]
pub struct SimpleAuth {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl SimpleAuth {
    /// Creates the helper over the shared store.
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Record `user` as signed in with `user_type` and `token`.
    pub async fn login(
        &self,
        user: &serde_json::Value,
        user_type: UserType,
        token: &str,
    ) -> AppResult<()> {
        self.store.set_json(keys::CURRENT_USER, user).await?;
        self.store.set(keys::USER_TYPE, user_type.as_str()).await?;
        self.store.set(keys::AUTH_TOKEN, token).await?;
        self.store
            .set(keys::LOGIN_TIME, &self.clock.now_millis().to_string())
            .await?;
        info!(user_type = %user_type, "Signed in");
        Ok(())
    }

    /// Remove the four keys written by [`login`](Self::login).
    pub async fn logout(&self) -> AppResult<()> {
        self.store
            .remove_all(&[
                keys::CURRENT_USER,
                keys::USER_TYPE,
                keys::AUTH_TOKEN,
                keys::LOGIN_TIME,
            ])
            .await
    }

    /// Whether a user, role and token are all present.
    pub async fn is_authenticated(&self) -> bool {
        let check = async {
            let user = self.store.get(keys::CURRENT_USER).await?;
            let user_type = self.store.get(keys::USER_TYPE).await?;
            let token = self.store.get(keys::AUTH_TOKEN).await?;
            AppResult::Ok(user.is_some() && user_type.is_some() && token.is_some())
        };
        check.await.unwrap_or_else(|e| {
            warn!(error = %e, "Auth check failed");
            false
        })
    }

    /// The stored user object, if readable.
    pub async fn current_user(&self) -> Option<serde_json::Value> {
        match self.store.get_json(keys::CURRENT_USER).await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Stored user unreadable");
                None
            }
        }
    }

    /// The stored role, if present and known.
    pub async fn user_type(&self) -> Option<UserType> {
        let raw = self.store.get(keys::USER_TYPE).await.ok().flatten()?;
        raw.parse().ok()
    }

    /// The stored token.
    pub async fn token(&self) -> Option<String> {
        self.store.get(keys::AUTH_TOKEN).await.ok().flatten()
    }

    /// Login time in epoch milliseconds.
    pub async fn login_time(&self) -> Option<i64> {
        let raw = self.store.get(keys::LOGIN_TIME).await.ok().flatten()?;
        raw.parse().ok()
    }
}

#[async_trait]
impl Authenticator for SimpleAuth {
    async fn login(&self, grant: &AuthGrant) -> AppResult<()> {
        SimpleAuth::login(self, &grant.user, grant.user_type, &grant.token).await
    }

    async fn logout(&self) -> AppResult<()> {
        SimpleAuth::logout(self).await
    }

    async fn is_authenticated(&self) -> bool {
        SimpleAuth::is_authenticated(self).await
    }
}
