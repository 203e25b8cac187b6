pub mod config;
pub mod email;
pub mod persistence;
pub mod session;

pub use config::{ConfigError, MailSettings, SessionSettings, Settings};
pub use email::{FailingMailer, PostmarkMailer, RecordingMailer};
pub use persistence::InMemoryCredentialStore;
pub use session::{JwtSessionIssuer, SessionClaims, SESSION_TOKEN_TTL_SECONDS};
