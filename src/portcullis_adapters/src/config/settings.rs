use portcullis_core::{Email, EmailError};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Signing secret must not be blank")]
    MissingJwtSecret,
    #[error("Invalid sender email: {0}")]
    InvalidSenderEmail(#[from] EmailError),
    #[error("Failed to construct HTTP client: {0}")]
    HttpClient(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub session: SessionSettings,
    pub mail: MailSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub jwt_secret: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailSettings {
    pub base_url: String,
    pub sender_email: String,
    pub authorization_token: Secret<String>,
    #[serde(default = "default_mail_timeout_milliseconds")]
    pub timeout_milliseconds: u64,
}

fn default_mail_timeout_milliseconds() -> u64 {
    10_000
}

impl MailSettings {
    pub fn sender(&self) -> Result<Email, ConfigError> {
        Ok(Email::try_from(self.sender_email.clone())?)
    }
}

impl Settings {
    /// Load configuration once, before first use: an optional
    /// `configuration` file overridden by `PORTCULLIS__`-prefixed
    /// environment variables (e.g. `PORTCULLIS__SESSION__JWT_SECRET`).
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("PORTCULLIS").separator("__"))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.session.jwt_secret.expose_secret().trim().is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }
        Ok(self)
    }
}
