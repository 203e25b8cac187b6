pub mod settings;

pub use settings::{ConfigError, MailSettings, SessionSettings, Settings};
