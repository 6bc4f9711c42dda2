//! Server-side email/password checks against the system user list.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use liorian_core::config::auth::AuthConfig;
use liorian_core::error::AppError;
use liorian_core::result::AppResult;
use liorian_core::traits::{Clock, KeyValueStore};
use liorian_entity::user::{SystemUser, UserProfile, UserStatus, UserType};
use liorian_storage::{JsonList, keys};

use crate::password::{PasswordHasher, PasswordValidator};
use crate::token::generate_token;

/// Message returned for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Input for creating a system user.
#[derive(Debug, Clone)]
pub struct NewSystemUser {
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role.
    pub user_type: UserType,
    /// Plaintext password (hashed before storage).
    pub password: String,
}

/// A successful login: the opaque token and the user it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginGrant {
    /// Opaque bearer token.
    pub token: String,
    /// The signed-in user.
    pub user: UserProfile,
}

/// Verifies credentials and manages the `systemUsers` list.
#[derive(Debug, Clone)]
pub struct CredentialService {
    users: JsonList<SystemUser>,
    clock: Arc<dyn Clock>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
    token_length: usize,
}

impl CredentialService {
    /// Creates the service over the shared store.
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, config: &AuthConfig) -> Self {
        Self {
            users: JsonList::new(store, keys::SYSTEM_USERS),
            clock,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(config),
            token_length: config.token_length,
        }
    }

    /// Every system user.
    pub async fn list_users(&self) -> AppResult<Vec<SystemUser>> {
        self.users.load().await
    }

    /// Create a system user. Emails are unique, case-insensitively.
    pub async fn add_user(&self, input: NewSystemUser) -> AppResult<SystemUser> {
        let email = input.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("A valid email is required"));
        }
        if input.name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        self.validator.validate(&input.password)?;

        let user = SystemUser {
            id: Uuid::new_v4(),
            email,
            name: input.name.trim().to_string(),
            user_type: input.user_type,
            password_hash: self.hasher.hash_password(&input.password)?,
            status: UserStatus::Active,
            created_at: self.clock.now(),
        };

        let new_user = user.clone();
        self.users
            .modify(move |users| {
                if users.iter().any(|u| u.matches_email(&new_user.email)) {
                    return Err(AppError::conflict(format!(
                        "A user with email '{}' already exists",
                        new_user.email
                    )));
                }
                users.push(new_user);
                Ok(())
            })
            .await?;

        info!(email = %user.email, user_type = %user.user_type, "System user created");
        Ok(user)
    }

    /// Check `email`/`password` for a user whose role is in `allowed`.
    ///
    /// Every failure yields the same authentication error so callers
    /// cannot tell unknown emails from wrong passwords.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        allowed: &[UserType],
    ) -> AppResult<LoginGrant> {
        let users = self.list_users().await?;
        let Some(user) = users.into_iter().find(|u| u.matches_email(email)) else {
            warn!(email, "Login for unknown email");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !allowed.contains(&user.user_type) || !user.is_active() {
            warn!(email, user_type = %user.user_type, "Login refused for role or status");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        match self.hasher.verify_password(password, &user.password_hash) {
            Ok(true) => {}
            Ok(false) => {
                warn!(email, "Login with wrong password");
                return Err(AppError::authentication(INVALID_CREDENTIALS));
            }
            Err(e) => {
                warn!(email, error = %e, "Stored password hash unusable");
                return Err(AppError::authentication(INVALID_CREDENTIALS));
            }
        }

        info!(email, user_type = %user.user_type, "Login succeeded");
        Ok(LoginGrant {
            token: generate_token(self.token_length),
            user: user.profile(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liorian_core::error::ErrorKind;
    use liorian_core::traits::SystemClock;
    use liorian_storage::{MemoryKvStore, SerializedStore};

    fn service() -> CredentialService {
        let store = SerializedStore::spawn(Arc::new(MemoryKvStore::new()));
        CredentialService::new(Arc::new(store), Arc::new(SystemClock), &AuthConfig::default())
    }

    fn staff(email: &str) -> NewSystemUser {
        NewSystemUser {
            email: email.to_string(),
            name: "Staff Member".to_string(),
            user_type: UserType::Staff,
            password: "Training2024".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_and_authenticate() {
        let svc = service();
        let user = svc.add_user(staff("Staff@Liorian.com")).await.unwrap();
        assert_eq!(user.email, "staff@liorian.com");
        assert_ne!(user.password_hash, "Training2024");

        let grant = svc
            .authenticate("STAFF@liorian.com ", "Training2024", &[UserType::Staff, UserType::Admin])
            .await
            .unwrap();
        assert_eq!(grant.user.email, "staff@liorian.com");
        assert_eq!(grant.token.len(), AuthConfig::default().token_length);
    }

    #[tokio::test]
    async fn test_failures_share_one_message() {
        let svc = service();
        svc.add_user(staff("staff@liorian.com")).await.unwrap();

        let cases = [
            ("nobody@liorian.com", "Training2024", &[UserType::Staff][..]),
            ("staff@liorian.com", "wrong-password1", &[UserType::Staff][..]),
            ("staff@liorian.com", "Training2024", &[UserType::Candidate][..]),
        ];
        for (email, password, allowed) in cases {
            let err = svc.authenticate(email, password, allowed).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authentication);
            assert_eq!(err.message, INVALID_CREDENTIALS);
        }
    }

    #[tokio::test]
    async fn test_unreadable_hash_is_generic_failure() {
        let store: Arc<dyn KeyValueStore> =
            Arc::new(SerializedStore::spawn(Arc::new(MemoryKvStore::new())));
        let svc = CredentialService::new(store.clone(), Arc::new(SystemClock), &AuthConfig::default());
        svc.add_user(staff("staff@liorian.com")).await.unwrap();

        let users = JsonList::<SystemUser>::new(store, keys::SYSTEM_USERS);
        users
            .modify(|users| {
                users[0].password_hash = "not-a-phc-string".to_string();
                Ok(())
            })
            .await
            .unwrap();

        let err = svc
            .authenticate("staff@liorian.com", "Training2024", &[UserType::Staff])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let svc = service();
        svc.add_user(staff("staff@liorian.com")).await.unwrap();
        let err = svc.add_user(staff("STAFF@liorian.com")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(svc.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let svc = service();
        let mut input = staff("staff@liorian.com");
        input.password = "short".to_string();
        let err = svc.add_user(input).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
