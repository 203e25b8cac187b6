use std::collections::HashMap;
use std::sync::Arc;

use portcullis_core::{
    CredentialStore, CredentialStoreError, Email, Password, PasswordHash, ResetRequest, UserId,
    UserRecord,
};
use tokio::sync::RwLock;

use super::password_hashing::{compute_password_hash, verify_password_hash};

#[derive(Clone)]
struct StoredUser {
    id: UserId,
    email: Email,
    password_hash: PasswordHash,
    reset_request: Option<ResetRequest>,
}

impl StoredUser {
    fn as_record(&self, include_sensitive: bool) -> UserRecord {
        let mut record = UserRecord::new(self.id, self.email.clone());
        if include_sensitive {
            record.password_hash = Some(self.password_hash.clone());
            record.reset_request = self.reset_request.clone();
        }
        record
    }
}

/// Reference in-memory credential store.
///
/// Every mutation happens under one write-lock section, which gives the
/// per-record read-modify-write atomicity the port demands. Cloning the
/// store shares the underlying map.
#[derive(Default, Clone)]
pub struct InMemoryCredentialStore {
    users: Arc<RwLock<HashMap<Email, StoredUser>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed a user with a hashed password. Registration business rules
    /// live with the embedding application; this is a plain insert.
    pub async fn insert_user(
        &self,
        email: Email,
        password: Password,
    ) -> Result<UserId, CredentialStoreError> {
        let password_hash = compute_password_hash(password)
            .await
            .map_err(CredentialStoreError::PersistError)?;

        let mut users = self.users.write().await;
        if users.contains_key(&email) {
            return Err(CredentialStoreError::PersistError(
                "user already exists".to_owned(),
            ));
        }
        let id = UserId::new();
        users.insert(
            email.clone(),
            StoredUser {
                id,
                email,
                password_hash,
                reset_request: None,
            },
        );
        Ok(id)
    }
}

#[async_trait::async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(
        &self,
        email: &Email,
        include_sensitive: bool,
    ) -> Result<UserRecord, CredentialStoreError> {
        let users = self.users.read().await;
        users
            .get(email)
            .map(|user| user.as_record(include_sensitive))
            .ok_or(CredentialStoreError::UserNotFound)
    }

    async fn verify_password(
        &self,
        candidate: &Password,
        stored: &PasswordHash,
    ) -> Result<bool, CredentialStoreError> {
        verify_password_hash(stored.clone(), candidate.clone())
            .await
            .map_err(CredentialStoreError::PersistError)
    }

    async fn set_password(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), CredentialStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(CredentialStoreError::PersistError)?;

        let mut users = self.users.write().await;
        let user = users
            .values_mut()
            .find(|user| user.id == *id)
            .ok_or(CredentialStoreError::UserNotFound)?;
        user.password_hash = password_hash;
        Ok(())
    }

    async fn store_reset_request(
        &self,
        id: &UserId,
        request: ResetRequest,
    ) -> Result<(), CredentialStoreError> {
        let mut users = self.users.write().await;
        let user = users
            .values_mut()
            .find(|user| user.id == *id)
            .ok_or(CredentialStoreError::UserNotFound)?;
        user.reset_request = Some(request);
        Ok(())
    }

    async fn complete_password_reset(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), CredentialStoreError> {
        // Hash before taking the lock; a hashing failure leaves the
        // stored request untouched.
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(CredentialStoreError::PersistError)?;

        let mut users = self.users.write().await;
        let user = users
            .values_mut()
            .find(|user| user.id == *id)
            .ok_or(CredentialStoreError::UserNotFound)?;
        user.password_hash = password_hash;
        user.reset_request = None;
        Ok(())
    }
}
