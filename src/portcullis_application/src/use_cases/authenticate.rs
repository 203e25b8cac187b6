use portcullis_core::{
    CredentialStore, CredentialStoreError, Email, Password, SessionToken, SessionTokenError,
    SessionTokenIssuer, UserRecord,
};

/// Response from a successful authentication: the user without any
/// privileged fields, plus a freshly issued session token.
#[derive(Debug)]
pub struct AuthenticatedUser {
    pub user: UserRecord,
    pub session_token: SessionToken,
}

/// Error types specific to the authenticate use case
#[derive(Debug, thiserror::Error)]
pub enum AuthenticateError {
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Credential store error: {0}")]
    Store(CredentialStoreError),
    #[error("Session token error: {0}")]
    SessionToken(#[from] SessionTokenError),
}

impl From<CredentialStoreError> for AuthenticateError {
    fn from(err: CredentialStoreError) -> Self {
        match err {
            CredentialStoreError::UserNotFound => Self::UserNotFound,
            other => Self::Store(other),
        }
    }
}

/// Authenticate use case - verifies credentials and issues a session token
pub struct AuthenticateUseCase<'a, C, S>
where
    C: CredentialStore,
    S: SessionTokenIssuer,
{
    credential_store: &'a C,
    session_issuer: &'a S,
}

impl<'a, C, S> AuthenticateUseCase<'a, C, S>
where
    C: CredentialStore,
    S: SessionTokenIssuer,
{
    pub fn new(credential_store: &'a C, session_issuer: &'a S) -> Self {
        Self {
            credential_store,
            session_issuer,
        }
    }

    /// Execute the authenticate use case
    ///
    /// # Arguments
    /// * `email` - User's email address
    /// * `password` - Password candidate to verify
    ///
    /// # Returns
    /// The redacted user record and a signed session token whose subject
    /// is the user's id
    #[tracing::instrument(name = "AuthenticateUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<AuthenticatedUser, AuthenticateError> {
        let user = self.credential_store.find_by_email(&email, true).await?;

        let stored_hash = user.password_hash.as_ref().ok_or_else(|| {
            AuthenticateError::Store(CredentialStoreError::PersistError(
                "credential record is missing its password hash".to_owned(),
            ))
        })?;

        if !self
            .credential_store
            .verify_password(&password, stored_hash)
            .await?
        {
            return Err(AuthenticateError::InvalidCredentials);
        }

        let session_token = self.session_issuer.issue(&user.id)?;

        Ok(AuthenticatedUser {
            user: user.redacted(),
            session_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use portcullis_core::{PasswordHash, ResetRequest, UserId};
    use secrecy::{ExposeSecret, Secret};

    use super::*;

    // Mock store that treats the stored "hash" as the plaintext password
    struct MockCredentialStore {
        id: UserId,
        email: Email,
        password: String,
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
            let mut record = UserRecord::new(self.id, self.email.clone());
            if include_sensitive {
                record.password_hash =
                    Some(PasswordHash::new(Secret::from(self.password.clone())));
            }
            Ok(record)
        }

        async fn verify_password(
            &self,
            candidate: &Password,
            stored: &PasswordHash,
        ) -> Result<bool, CredentialStoreError> {
            Ok(candidate.as_ref().expose_secret() == stored.as_ref().expose_secret())
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
            _id: &UserId,
            _new_password: Password,
        ) -> Result<(), CredentialStoreError> {
            unimplemented!()
        }
    }

    struct MockSessionIssuer;

    impl SessionTokenIssuer for MockSessionIssuer {
        fn issue(&self, subject: &UserId) -> Result<SessionToken, SessionTokenError> {
            Ok(SessionToken::new(format!("token-for-{subject}")))
        }
    }

    fn mock_store() -> MockCredentialStore {
        MockCredentialStore {
            id: UserId::new(),
            email: Email::try_from(Secret::from("a@b.com".to_owned())).unwrap(),
            password: "Secret1!".to_owned(),
        }
    }

    fn email(raw: &str) -> Email {
        Email::try_from(Secret::from(raw.to_owned())).unwrap()
    }

    fn password(raw: &str) -> Password {
        Password::try_from(Secret::from(raw.to_owned())).unwrap()
    }

    #[tokio::test]
    async fn authenticates_with_correct_credentials() {
        let store = mock_store();
        let issuer = MockSessionIssuer;
        let use_case = AuthenticateUseCase::new(&store, &issuer);

        let authenticated = use_case
            .execute(email("a@b.com"), password("Secret1!"))
            .await
            .unwrap();

        assert_eq!(authenticated.user.id, store.id);
        assert_eq!(
            authenticated.session_token.as_str(),
            format!("token-for-{}", store.id)
        );
    }

    #[tokio::test]
    async fn returned_user_carries_no_privileged_fields() {
        let store = mock_store();
        let issuer = MockSessionIssuer;
        let use_case = AuthenticateUseCase::new(&store, &issuer);

        let authenticated = use_case
            .execute(email("a@b.com"), password("Secret1!"))
            .await
            .unwrap();

        assert!(authenticated.user.password_hash.is_none());
        assert!(authenticated.user.reset_request.is_none());
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let store = mock_store();
        let issuer = MockSessionIssuer;
        let use_case = AuthenticateUseCase::new(&store, &issuer);

        let result = use_case.execute(email("a@b.com"), password("wrong-pass")).await;
        assert!(matches!(result, Err(AuthenticateError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let store = mock_store();
        let issuer = MockSessionIssuer;
        let use_case = AuthenticateUseCase::new(&store, &issuer);

        let result = use_case
            .execute(email("nobody@b.com"), password("Secret1!"))
            .await;
        assert!(matches!(result, Err(AuthenticateError::UserNotFound)));
    }

    #[tokio::test]
    async fn lookup_is_case_insensitive() {
        let store = mock_store();
        let issuer = MockSessionIssuer;
        let use_case = AuthenticateUseCase::new(&store, &issuer);

        let result = use_case.execute(email("A@B.COM"), password("Secret1!")).await;
        assert!(result.is_ok());
    }
}
