//! User roles and system user accounts.

pub mod model;
pub mod role;

pub use model::{SystemUser, UserProfile, UserStatus};
pub use role::UserType;
