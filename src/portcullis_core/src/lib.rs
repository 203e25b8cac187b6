pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::{Email, EmailError},
    password::{Password, PasswordError, PasswordHash},
    reset::{ResetRequest, ResetToken, RESET_TOKEN_TTL_SECONDS},
    session::SessionToken,
    user::{UserId, UserRecord},
};

pub use ports::{
    repositories::{CredentialStore, CredentialStoreError},
    services::{MailError, MailTemplate, Mailer, SessionTokenError, SessionTokenIssuer},
};
