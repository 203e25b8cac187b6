use std::sync::Arc;

use portcullis_core::{Email, MailError, MailTemplate, Mailer};
use tokio::sync::RwLock;

/// A delivery captured by [`RecordingMailer`].
#[derive(Debug, Clone)]
pub struct SentMail {
    pub recipient: Email,
    pub template: MailTemplate,
}

/// Mailer that records every send instead of delivering it. Cloning
/// shares the captured log.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<RwLock<Vec<SentMail>>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentMail> {
        self.sent.read().await.clone()
    }
}

#[async_trait::async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, recipient: &Email, template: MailTemplate) -> Result<(), MailError> {
        self.sent.write().await.push(SentMail {
            recipient: recipient.clone(),
            template,
        });
        Ok(())
    }
}

/// Mailer whose every delivery fails.
#[derive(Debug, Clone, Default)]
pub struct FailingMailer;

impl FailingMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _recipient: &Email, _template: MailTemplate) -> Result<(), MailError> {
        Err(MailError::Delivery("mail provider unavailable".to_owned()))
    }
}
