//! User type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three roles that can sign in to the site.
///
/// Each role has its own token key in client storage; at most one of them
/// is populated at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Site administrator.
    Admin,
    /// Training staff.
    Staff,
    /// Candidate enrolled in training.
    Candidate,
}

impl UserType {
    /// Every role, in token-clearing order.
    pub const ALL: [UserType; 3] = [Self::Admin, Self::Staff, Self::Candidate];

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Candidate => "candidate",
        }
    }

    /// The client storage key holding this role's token.
    pub fn token_key(&self) -> &'static str {
        match self {
            Self::Admin => "adminToken",
            Self::Staff => "staffToken",
            Self::Candidate => "candidateToken",
        }
    }

    /// Dashboard route for this role.
    pub fn dashboard_route(&self) -> &'static str {
        match self {
            Self::Admin => "/admin/dashboard",
            Self::Staff => "/staff/dashboard",
            Self::Candidate => "/candidate/dashboard",
        }
    }

    /// Whether the role may use the staff login endpoint.
    pub fn is_staff_or_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::Staff)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserType {
    type Err = liorian_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "staff" => Ok(Self::Staff),
            "candidate" => Ok(Self::Candidate),
            _ => Err(liorian_core::AppError::validation(format!(
                "Invalid user type: '{s}'. Expected one of: admin, staff, candidate"
            ))),
        }
    }
}
