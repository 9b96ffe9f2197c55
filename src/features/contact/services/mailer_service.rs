use async_trait::async_trait;
use chrono::Utc;
use minijinja::context;
use serde::Serialize;

use crate::core::config::MailerConfig;
use crate::core::error::{AppError, Result};
use crate::features::contact::dtos::SanitizedSubmission;
use crate::shared::templates;

/// A rendered notification, ready for the provider's send API.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Seam for the transactional email provider so handler tests can observe
/// dispatches without network access.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<()>;
}

/// Render the text and HTML notification bodies for a sanitized submission.
/// Submission values arrive pre-escaped, so the templates emit them verbatim.
pub fn render_notification(submission: &SanitizedSubmission) -> Result<EmailMessage> {
    let service_label = submission.service.label();
    let received_at = Utc::now().format("%B %e, %Y %H:%M UTC").to_string();

    let ctx = context! {
        name => submission.name,
        business_name => submission
            .business_name
            .clone()
            .unwrap_or_else(|| "Not provided".to_string()),
        email => submission.email,
        phone => submission.phone,
        service_name => service_label,
        message => submission.message,
        received_at => received_at,
    };

    let text_body = templates::render(templates::CONTACT_NOTIFICATION_TEXT, &ctx)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let html_body = templates::render(templates::CONTACT_NOTIFICATION_HTML, &ctx)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(EmailMessage {
        subject: format!("New Contact Inquiry - {} - {}", service_label, submission.name),
        text_body,
        html_body,
    })
}

/// Mailjet v3.1 send API payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendRequest<'a> {
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Message<'a> {
    from: Party<'a>,
    to: Vec<Party<'a>>,
    subject: &'a str,
    text_part: &'a str,
    #[serde(rename = "HTMLPart")]
    html_part: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Party<'a> {
    email: &'a str,
    name: &'a str,
}

/// Client for the Mailjet transactional send API. One call per submission,
/// no retry; a provider failure surfaces as a generic 500 to the caller.
pub struct MailjetClient {
    client: reqwest::Client,
    config: MailerConfig,
}

impl MailjetClient {
    pub fn new(config: MailerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl EmailSender for MailjetClient {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        let (Some(api_key), Some(secret_key)) = (
            self.config.api_key.as_deref(),
            self.config.secret_key.as_deref(),
        ) else {
            tracing::error!("Mailjet credentials not configured");
            return Err(AppError::Configuration(
                "Email service not configured".to_string(),
            ));
        };

        let payload = SendRequest {
            messages: vec![Message {
                from: Party {
                    email: &self.config.from_email,
                    name: &self.config.from_name,
                },
                to: vec![Party {
                    email: &self.config.to_email,
                    name: &self.config.to_name,
                }],
                subject: &message.subject,
                text_part: &message.text_body,
                html_part: &message.html_body,
            }],
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .basic_auth(api_key, Some(secret_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Mailjet request failed: {:?}", e);
                AppError::ExternalService(format!("Mailjet request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Mailjet returned status {}: {}", status, body);
            return Err(AppError::ExternalService(format!(
                "Mailjet returned status {}",
                status
            )));
        }

        Ok(())
    }
}
