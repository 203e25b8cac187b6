use serde::Serialize;
use uuid::Uuid;

use crate::domain::{email::Email, password::PasswordHash, reset::ResetRequest};

/// Opaque user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user as read from the credential store.
///
/// `password_hash` and `reset_request` are privileged fields: they are
/// populated only when the read opted in with `include_sensitive`, and
/// they never appear in serialized output.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    pub id: UserId,
    pub email: Email,
    #[serde(skip)]
    pub password_hash: Option<PasswordHash>,
    #[serde(skip)]
    pub reset_request: Option<ResetRequest>,
}

impl UserRecord {
    pub fn new(id: UserId, email: Email) -> Self {
        Self {
            id,
            email,
            password_hash: None,
            reset_request: None,
        }
    }

    /// The outward-safe view: identity only, privileged fields stripped.
    pub fn redacted(self) -> Self {
        Self {
            id: self.id,
            email: self.email,
            password_hash: None,
            reset_request: None,
        }
    }
}
