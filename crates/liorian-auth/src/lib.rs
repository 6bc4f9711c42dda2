//! # liorian-auth
//!
//! Sign-in state for the Liorian site.
//!
//! ## Modules
//!
//! - `session`: the full session manager: role tokens, device pinning,
//!   absolute/idle timeouts, recovery and background upkeep
//! - `simple`: the lightweight presence-only helper
//! - `authenticator`: the trait both helpers implement
//! - `password`: Argon2id hashing and password policy
//! - `credentials`: server-side email/password checks against system users
//! - `token`: opaque token generation

pub mod authenticator;
pub mod credentials;
pub mod password;
pub mod session;
pub mod simple;
pub mod token;

pub use authenticator::{AuthGrant, Authenticator};
pub use credentials::{CredentialService, INVALID_CREDENTIALS, LoginGrant, NewSystemUser};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{BackgroundTasks, LogoutOutcome, SessionManager};
pub use simple::SimpleAuth;
pub use token::generate_token;
