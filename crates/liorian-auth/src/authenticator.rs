//! The interface shared by the two client-side auth helpers.

use async_trait::async_trait;

use liorian_core::result::AppResult;
use liorian_entity::user::UserType;

/// Everything a helper may need to record a sign-in.
#[derive(Debug, Clone)]
pub struct AuthGrant {
    /// Role being signed in.
    pub user_type: UserType,
    /// Opaque token handed out by the server.
    pub token: String,
    /// User object as returned by the login endpoint.
    pub user: serde_json::Value,
}

/// Sign-in bookkeeping for one window.
///
/// [`SessionManager`](crate::SessionManager) and [`SimpleAuth`](crate::SimpleAuth)
/// implement this with different rules, and can disagree about the same
/// storage (see the second-window tests).
#[async_trait]
pub trait Authenticator: Send + Sync + std::fmt::Debug {
    /// Record a sign-in.
    async fn login(&self, grant: &AuthGrant) -> AppResult<()>;

    /// Forget the sign-in.
    async fn logout(&self) -> AppResult<()>;

    /// Whether the window counts as signed in. Never fails; storage errors
    /// read as "not signed in".
    async fn is_authenticated(&self) -> bool;
}
