use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{email::Email, reset::ResetToken, session::SessionToken, user::UserId};

// Mailer port trait and errors
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Failed to deliver email: {0}")]
    Delivery(String),
}

/// Template-addressed outbound mail: the template identifier plus the
/// context the provider needs to render it.
#[derive(Debug, Clone)]
pub enum MailTemplate {
    PasswordReset { token: ResetToken },
}

/// Port trait for outbound mail delivery.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, recipient: &Email, template: MailTemplate) -> Result<(), MailError>;
}

// SessionTokenIssuer port trait and errors
#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("Failed to sign session token: {0}")]
    Signing(String),
    #[error("Invalid session token: {0}")]
    Invalid(String),
}

/// Port trait for producing signed, expiring session tokens.
///
/// The signing key is immutable configuration loaded before first use;
/// issuance itself cannot fail on a well-configured issuer.
pub trait SessionTokenIssuer: Send + Sync {
    fn issue(&self, subject: &UserId) -> Result<SessionToken, SessionTokenError>;
}
