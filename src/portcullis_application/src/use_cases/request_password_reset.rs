use chrono::Utc;
use portcullis_core::{
    CredentialStore, CredentialStoreError, Email, MailError, MailTemplate, Mailer, ResetRequest,
};

/// Error types specific to the request password reset use case
#[derive(Debug, thiserror::Error)]
pub enum RequestPasswordResetError {
    #[error("User not found")]
    UserNotFound,
    #[error("{0}")]
    Mail(#[from] MailError),
    #[error("Credential store error: {0}")]
    Store(CredentialStoreError),
}

impl From<CredentialStoreError> for RequestPasswordResetError {
    fn from(err: CredentialStoreError) -> Self {
        match err {
            CredentialStoreError::UserNotFound => Self::UserNotFound,
            other => Self::Store(other),
        }
    }
}

/// Request password reset use case - issues a fresh single-use token and
/// mails it to the user
pub struct RequestPasswordResetUseCase<'a, C, M>
where
    C: CredentialStore,
    M: Mailer,
{
    credential_store: &'a C,
    mailer: &'a M,
}

impl<'a, C, M> RequestPasswordResetUseCase<'a, C, M>
where
    C: CredentialStore,
    M: Mailer,
{
    pub fn new(credential_store: &'a C, mailer: &'a M) -> Self {
        Self {
            credential_store,
            mailer,
        }
    }

    /// Execute the request password reset use case
    ///
    /// # Arguments
    /// * `email` - Address of the account to reset
    ///
    /// # Returns
    /// Ok(()) once the token is persisted and the mail dispatched. A
    /// delivery failure surfaces as `Mail` but the persisted token is
    /// not rolled back; it stays consumable until it expires.
    #[tracing::instrument(name = "RequestPasswordResetUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<(), RequestPasswordResetError> {
        let user = self.credential_store.find_by_email(&email, false).await?;

        // Overwrites any earlier request: at most one active token per user.
        let request = ResetRequest::issue(Utc::now());
        self.credential_store
            .store_reset_request(&user.id, request.clone())
            .await?;

        if let Err(err) = self
            .mailer
            .send(
                &user.email,
                MailTemplate::PasswordReset {
                    token: request.token().clone(),
                },
            )
            .await
        {
            tracing::warn!(error = %err, "reset token persisted but mail delivery failed");
            return Err(err.into());
        }

        Ok(())
    }
}
