use serde::{Deserialize, Serialize};

use super::UserId;
use crate::board::RepositoryError;

/// Public projection of a user used when joining applications and postings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Lookup of user profiles known to the service.
pub trait UserDirectory: Send + Sync {
    /// Insert or refresh a profile.
    fn upsert(&self, profile: UserProfile) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &UserId) -> Result<Option<UserProfile>, RepositoryError>;
}
