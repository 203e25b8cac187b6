use portcullis_core::{Email, MailError, MailTemplate, Mailer};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use crate::config::{ConfigError, MailSettings};

pub struct PostmarkMailer {
    http_client: Client,
    base_url: String,
    sender: Email,
    authorization_token: Secret<String>,
}

impl PostmarkMailer {
    pub fn new(
        base_url: String,
        sender: Email,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        }
    }

    pub fn from_settings(settings: &MailSettings) -> Result<Self, ConfigError> {
        let sender = settings.sender()?;
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_millis(
                settings.timeout_milliseconds,
            ))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self::new(
            settings.base_url.clone(),
            sender,
            settings.authorization_token.clone(),
            http_client,
        ))
    }
}

#[async_trait::async_trait]
impl Mailer for PostmarkMailer {
    #[tracing::instrument(name = "Sending templated email", skip_all)]
    async fn send(&self, recipient: &Email, template: MailTemplate) -> Result<(), MailError> {
        let base = Url::parse(&self.base_url).map_err(|e| MailError::Delivery(e.to_string()))?;
        let url = base
            .join("/email/withTemplate")
            .map_err(|e| MailError::Delivery(e.to_string()))?;

        let (template_alias, template_model) = match &template {
            MailTemplate::PasswordReset { token } => (
                PASSWORD_RESET_TEMPLATE,
                TemplateModel {
                    token: token.as_str(),
                },
            ),
        };

        let request_body = SendTemplatedEmailRequest {
            from: self.sender.as_ref().expose_secret(),
            to: recipient.as_ref().expose_secret(),
            template_alias,
            template_model,
            message_stream: MESSAGE_STREAM,
        };

        let request = self
            .http_client
            .post(url)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body);

        request
            .send()
            .await
            .map_err(|e| MailError::Delivery(e.to_string()))?
            .error_for_status()
            .map_err(|e| MailError::Delivery(e.to_string()))?;

        Ok(())
    }
}

const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";
const PASSWORD_RESET_TEMPLATE: &str = "password-reset";

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendTemplatedEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    template_alias: &'a str,
    template_model: TemplateModel<'a>,
    message_stream: &'a str,
}

#[derive(serde::Serialize, Debug)]
struct TemplateModel<'a> {
    token: &'a str,
}
