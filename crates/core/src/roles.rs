//! User role sum type.
//!
//! The identity layer attaches a role to every user row as a text column.
//! An unknown or missing value parses to [`Role::None`], so "no profile"
//! and "no role granted" collapse into the same variant.

use serde::{Deserialize, Serialize};

/// Stored column value for a user with no granted role.
pub const ROLE_NONE: &str = "none";

/// Stored column value for a trainer.
pub const ROLE_TRAINER: &str = "trainer";

/// Role attached to a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    None,
    Trainer,
}

impl Role {
    /// Parse the stored role column value. Unknown values map to `None`.
    pub fn parse(value: &str) -> Self {
        match value {
            ROLE_TRAINER => Role::Trainer,
            _ => Role::None,
        }
    }

    /// The stored column value for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::None => ROLE_NONE,
            Role::Trainer => ROLE_TRAINER,
        }
    }

    pub fn is_trainer(self) -> bool {
        matches!(self, Role::Trainer)
    }
}
