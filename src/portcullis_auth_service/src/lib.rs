pub mod telemetry;

use portcullis_application::{
    AuthenticateError, AuthenticateUseCase, AuthenticatedUser, ConsumePasswordResetError,
    ConsumePasswordResetUseCase, RequestPasswordResetError, RequestPasswordResetUseCase,
};
use portcullis_core::{CredentialStore, Email, Mailer, Password, ResetToken, SessionTokenIssuer};

/// The caller-facing authentication surface, transport-agnostic.
///
/// Bundles a credential store, a mailer and a session-token issuer and
/// exposes the three operations a transport layer maps onto its routes.
/// Every call is stateless; the service holds no mutable state between
/// calls.
pub struct AuthService<C, M, S> {
    credential_store: C,
    mailer: M,
    session_issuer: S,
}

impl<C, M, S> AuthService<C, M, S>
where
    C: CredentialStore,
    M: Mailer,
    S: SessionTokenIssuer,
{
    /// Create a new AuthService over the provided collaborators
    ///
    /// # Arguments
    /// * `credential_store` - Persistence and hashing for user credentials
    /// * `mailer` - Outbound delivery for reset tokens
    /// * `session_issuer` - Signed session-token production
    pub fn new(credential_store: C, mailer: M, session_issuer: S) -> Self {
        Self {
            credential_store,
            mailer,
            session_issuer,
        }
    }

    /// Verify credentials and issue a session token for the subject.
    pub async fn authenticate(
        &self,
        email: Email,
        password: Password,
    ) -> Result<AuthenticatedUser, AuthenticateError> {
        AuthenticateUseCase::new(&self.credential_store, &self.session_issuer)
            .execute(email, password)
            .await
    }

    /// Issue a fresh single-use reset token and mail it to the user.
    pub async fn request_password_reset(
        &self,
        email: Email,
    ) -> Result<(), RequestPasswordResetError> {
        RequestPasswordResetUseCase::new(&self.credential_store, &self.mailer)
            .execute(email)
            .await
    }

    /// Trade a valid reset token for a new password, spending the token.
    pub async fn consume_password_reset(
        &self,
        email: Email,
        token: ResetToken,
        new_password: Password,
    ) -> Result<(), ConsumePasswordResetError> {
        ConsumePasswordResetUseCase::new(&self.credential_store)
            .execute(email, token, new_password)
            .await
    }
}
