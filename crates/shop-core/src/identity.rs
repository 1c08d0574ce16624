//! # Caller Identity
//!
//! The identity service in front of this system verifies credentials and
//! forwards the resolved user id and role with every protected request.
//! Those values are parsed once at the boundary into an [`Identity`]; the
//! core never inspects raw headers or tokens.

use crate::error::ShopError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::UserId;

/// Role granted to a user by the identity service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Seller,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Seller => "seller",
            Role::User => "user",
        }
    }

    /// Whether this role may manage platform resources such as payment
    /// providers.
    pub fn can_administer(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Whether this role may list products for sale.
    pub fn can_sell(&self) -> bool {
        matches!(self, Role::Admin | Role::Seller)
    }
}

impl Default for Role {
    // "user" is the role granted at registration
    fn default() -> Self {
        Role::User
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = ShopError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "admin" => Ok(Role::Admin),
            "seller" => Ok(Role::Seller),
            "user" => Ok(Role::User),
            _ => Err(ShopError::validation("Role invalid!")),
        }
    }
}

/// Resolved caller identity attached by the upstream identity service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }
}
