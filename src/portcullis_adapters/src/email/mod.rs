pub mod mock_mailer;
pub mod postmark_mailer;

pub use mock_mailer::{FailingMailer, RecordingMailer, SentMail};
pub use postmark_mailer::PostmarkMailer;
