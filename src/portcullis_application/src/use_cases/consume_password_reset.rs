use chrono::Utc;
use portcullis_core::{CredentialStore, CredentialStoreError, Email, Password, ResetToken};

/// Error types specific to the consume password reset use case
#[derive(Debug, thiserror::Error)]
pub enum ConsumePasswordResetError {
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid password reset token")]
    InvalidToken,
    #[error("Password reset token has expired")]
    TokenExpired,
    #[error("Persistence error: {0}")]
    PersistError(String),
}

impl From<CredentialStoreError> for ConsumePasswordResetError {
    fn from(err: CredentialStoreError) -> Self {
        match err {
            CredentialStoreError::UserNotFound => Self::UserNotFound,
            CredentialStoreError::PersistError(reason) => Self::PersistError(reason),
        }
    }
}

/// Consume password reset use case - trades a valid token for a new
/// password, spending the token in the process
pub struct ConsumePasswordResetUseCase<'a, C>
where
    C: CredentialStore,
{
    credential_store: &'a C,
}

impl<'a, C> ConsumePasswordResetUseCase<'a, C>
where
    C: CredentialStore,
{
    pub fn new(credential_store: &'a C) -> Self {
        Self { credential_store }
    }

    /// Execute the consume password reset use case
    ///
    /// # Arguments
    /// * `email` - Address of the account being reset
    /// * `token` - The token received out of band
    /// * `new_password` - Replacement password
    ///
    /// # Returns
    /// Ok(()) once the new password is persisted and the token cleared;
    /// both happen in one store update, so the token cannot survive a
    /// successful consumption. On `PersistError` the token is still
    /// stored and the call can be retried.
    #[tracing::instrument(
        name = "ConsumePasswordResetUseCase::execute",
        skip(self, token, new_password)
    )]
    pub async fn execute(
        &self,
        email: Email,
        token: ResetToken,
        new_password: Password,
    ) -> Result<(), ConsumePasswordResetError> {
        let user = self.credential_store.find_by_email(&email, true).await?;

        // A cleared or never-issued request fails the same way as a
        // mismatched token.
        let request = user
            .reset_request
            .ok_or(ConsumePasswordResetError::InvalidToken)?;

        if !request.matches(&token) {
            return Err(ConsumePasswordResetError::InvalidToken);
        }

        if request.is_expired(Utc::now()) {
            return Err(ConsumePasswordResetError::TokenExpired);
        }

        self.credential_store
            .complete_password_reset(&user.id, new_password)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use portcullis_core::{PasswordHash, ResetRequest, UserId, UserRecord};
    use secrecy::{ExposeSecret, Secret};
    use tokio::sync::RwLock;

    use super::*;

    #[derive(Clone)]
    struct UserState {
        password: String,
        reset_request: Option<ResetRequest>,
    }

    struct MockCredentialStore {
        id: UserId,
        email: Email,
        state: Arc<RwLock<UserState>>,
        fail_completion: bool,
    }

    impl MockCredentialStore {
        fn new(email: Email, reset_request: Option<ResetRequest>) -> Self {
            Self {
                id: UserId::new(),
                email,
                state: Arc::new(RwLock::new(UserState {
                    password: "Secret1!".to_owned(),
                    reset_request,
                })),
                fail_completion: false,
            }
        }
    }

    #[async_trait::async_trait]
    impl CredentialStore for MockCredentialStore {
        async fn find_by_email(
            &self,
            email: &Email,
            include_sensitive: bool,
        ) -> Result<UserRecord, CredentialStoreError> {
            if *email != self.email {
                return Err(CredentialStoreError::UserNotFound);
            }
            let state = self.state.read().await;
            let mut record = UserRecord::new(self.id, self.email.clone());
            if include_sensitive {
                record.password_hash =
                    Some(PasswordHash::new(Secret::from(state.password.clone())));
                record.reset_request = state.reset_request.clone();
            }
            Ok(record)
        }

        async fn verify_password(
            &self,
            _candidate: &Password,
            _stored: &PasswordHash,
        ) -> Result<bool, CredentialStoreError> {
            unimplemented!()
        }

        async fn set_password(
            &self,
            _id: &UserId,
            _new_password: Password,
        ) -> Result<(), CredentialStoreError> {
            unimplemented!()
        }

        async fn store_reset_request(
            &self,
            _id: &UserId,
            _request: ResetRequest,
        ) -> Result<(), CredentialStoreError> {
            unimplemented!()
        }

        async fn complete_password_reset(
            &self,
            id: &UserId,
            new_password: Password,
        ) -> Result<(), CredentialStoreError> {
            assert_eq!(*id, self.id);
            if self.fail_completion {
                return Err(CredentialStoreError::PersistError(
                    "storage offline".to_owned(),
                ));
            }
            let mut state = self.state.write().await;
            state.password = new_password.as_ref().expose_secret().clone();
            state.reset_request = None;
            Ok(())
        }
    }

    fn email(raw: &str) -> Email {
        Email::try_from(Secret::from(raw.to_owned())).unwrap()
    }

    fn password(raw: &str) -> Password {
        Password::try_from(Secret::from(raw.to_owned())).unwrap()
    }

    #[tokio::test]
    async fn consumes_a_valid_token_and_clears_it() {
        let request = ResetRequest::issue(Utc::now());
        let token = request.token().clone();
        let store = MockCredentialStore::new(email("a@b.com"), Some(request));
        let use_case = ConsumePasswordResetUseCase::new(&store);

        use_case
            .execute(email("a@b.com"), token, password("NewPass2!"))
            .await
            .unwrap();

        let state = store.state.read().await;
        assert_eq!(state.password, "NewPass2!");
        assert!(state.reset_request.is_none());
    }

    #[tokio::test]
    async fn mismatched_token_is_invalid() {
        let store = MockCredentialStore::new(
            email("a@b.com"),
            Some(ResetRequest::issue(Utc::now())),
        );
        let use_case = ConsumePasswordResetUseCase::new(&store);

        let result = use_case
            .execute(
                email("a@b.com"),
                ResetToken::from("deadbeef".to_owned()),
                password("NewPass2!"),
            )
            .await;

        assert!(matches!(
            result,
            Err(ConsumePasswordResetError::InvalidToken)
        ));
        assert!(store.state.read().await.reset_request.is_some());
    }

    #[tokio::test]
    async fn missing_request_is_invalid_token() {
        let store = MockCredentialStore::new(email("a@b.com"), None);
        let use_case = ConsumePasswordResetUseCase::new(&store);

        let result = use_case
            .execute(
                email("a@b.com"),
                ResetToken::from("deadbeef".to_owned()),
                password("NewPass2!"),
            )
            .await;

        assert!(matches!(
            result,
            Err(ConsumePasswordResetError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn correct_but_stale_token_is_expired() {
        let request = ResetRequest::new(ResetToken::generate(), Utc::now() - Duration::minutes(5));
        let token = request.token().clone();
        let store = MockCredentialStore::new(email("a@b.com"), Some(request));
        let use_case = ConsumePasswordResetUseCase::new(&store);

        let result = use_case
            .execute(email("a@b.com"), token, password("NewPass2!"))
            .await;

        assert!(matches!(
            result,
            Err(ConsumePasswordResetError::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let store = MockCredentialStore::new(email("a@b.com"), None);
        let use_case = ConsumePasswordResetUseCase::new(&store);

        let result = use_case
            .execute(
                email("nobody@b.com"),
                ResetToken::from("deadbeef".to_owned()),
                password("NewPass2!"),
            )
            .await;

        assert!(matches!(
            result,
            Err(ConsumePasswordResetError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn storage_failure_leaves_the_token_intact_for_retry() {
        let request = ResetRequest::issue(Utc::now());
        let token = request.token().clone();
        let mut store = MockCredentialStore::new(email("a@b.com"), Some(request));
        store.fail_completion = true;
        let use_case = ConsumePasswordResetUseCase::new(&store);

        let result = use_case
            .execute(email("a@b.com"), token.clone(), password("NewPass2!"))
            .await;

        assert!(matches!(
            result,
            Err(ConsumePasswordResetError::PersistError(_))
        ));
        let state = store.state.read().await;
        assert_eq!(state.password, "Secret1!");
        assert!(state.reset_request.as_ref().unwrap().matches(&token));
    }
}
