use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::{Password, PasswordHash},
    reset::ResetRequest,
    user::{UserId, UserRecord},
};

// CredentialStore port trait and errors
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("User not found")]
    UserNotFound,
    #[error("Persistence error: {0}")]
    PersistError(String),
}

impl PartialEq for CredentialStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::PersistError(_), Self::PersistError(_)) => true,
            _ => false,
        }
    }
}

/// Port over user credentials and their persisted reset state.
///
/// Implementations own the password hashing primitive and must provide
/// read-modify-write atomicity per user record: each mutating method is
/// one logical record update, never a sequence a concurrent caller can
/// observe half-applied.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Case-insensitive lookup by address. The record's `password_hash`
    /// and `reset_request` fields are populated only when
    /// `include_sensitive` is set.
    async fn find_by_email(
        &self,
        email: &Email,
        include_sensitive: bool,
    ) -> Result<UserRecord, CredentialStoreError>;

    /// Salted, slow one-way comparison of a candidate against a stored
    /// hash. Reveals nothing beyond the boolean outcome.
    async fn verify_password(
        &self,
        candidate: &Password,
        stored: &PasswordHash,
    ) -> Result<bool, CredentialStoreError>;

    /// Hash `new_password` and persist it. Any stored reset request is
    /// left untouched; clearing it is the reset flow's decision.
    async fn set_password(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), CredentialStoreError>;

    /// Persist a reset request, unconditionally overwriting any prior
    /// one. A user therefore holds at most one active token.
    async fn store_reset_request(
        &self,
        id: &UserId,
        request: ResetRequest,
    ) -> Result<(), CredentialStoreError>;

    /// Hash `new_password`, persist it, and clear the stored reset
    /// request in the same logical update. On failure the stored
    /// request must survive so the consumption can be retried.
    async fn complete_password_reset(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), CredentialStoreError>;
}
