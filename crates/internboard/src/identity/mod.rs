//! Caller identity: who is making a request and what they may do.
//!
//! Identities arrive as HS256 bearer tokens, are verified by [`JwtAuthority`]
//! and handed to the registries as explicit values rather than ambient state.

pub mod directory;
pub mod extract;
pub mod token;

use serde::{Deserialize, Serialize};

pub use directory::{UserDirectory, UserProfile};
pub use extract::{AdminUser, AuthUser, IdentityRejection};
pub use token::{Claims, JwtAuthority, TokenError};

/// Identifier of an authenticated user as issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Role carried by every identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[serde(alias = "user")]
    Applicant,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Applicant => "applicant",
        }
    }
}

/// Decoded caller passed into registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.user_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}
