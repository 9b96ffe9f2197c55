#[cfg(test)]
use std::sync::{Arc, Mutex};

#[cfg(test)]
use async_trait::async_trait;

#[cfg(test)]
use crate::core::config::RateLimitConfig;
#[cfg(test)]
use crate::core::error::{AppError, Result};
#[cfg(test)]
use crate::features::contact::services::{
    CaptchaVerifier, EmailMessage, EmailSender, RateLimitService,
};
#[cfg(test)]
use crate::features::contact::ContactState;

/// CAPTCHA verifier with a fixed outcome.
#[cfg(test)]
pub struct StaticCaptcha {
    pub outcome: bool,
}

#[cfg(test)]
#[async_trait]
impl CaptchaVerifier for StaticCaptcha {
    async fn verify(&self, _token: &str, _remote_ip: Option<&str>) -> bool {
        self.outcome
    }
}

/// Email sender that records every dispatched message instead of sending.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingMailer {
    messages: Mutex<Vec<EmailMessage>>,
}

#[cfg(test)]
impl RecordingMailer {
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[cfg(test)]
#[async_trait]
impl EmailSender for RecordingMailer {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message);
        Ok(())
    }
}

/// Email sender that always fails, simulating a provider outage.
#[cfg(test)]
pub struct FailingMailer;

#[cfg(test)]
#[async_trait]
impl EmailSender for FailingMailer {
    async fn send(&self, _message: EmailMessage) -> Result<()> {
        Err(AppError::ExternalService(
            "Mailjet returned status 503".to_string(),
        ))
    }
}

#[cfg(test)]
fn rate_limiter() -> Arc<RateLimitService> {
    Arc::new(RateLimitService::new(&RateLimitConfig {
        max_requests: 3,
        window_secs: 300,
    }))
}

/// State with a passing CAPTCHA and a recording mailer.
#[cfg(test)]
pub fn test_state() -> (ContactState, Arc<RecordingMailer>) {
    test_state_with_captcha(true)
}

#[cfg(test)]
pub fn test_state_with_captcha(captcha_outcome: bool) -> (ContactState, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::default());
    let state = ContactState {
        rate_limiter: rate_limiter(),
        captcha: Arc::new(StaticCaptcha {
            outcome: captcha_outcome,
        }),
        mailer: mailer.clone(),
    };
    (state, mailer)
}

#[cfg(test)]
pub fn failing_mailer_state() -> (ContactState, Arc<FailingMailer>) {
    let mailer = Arc::new(FailingMailer);
    let state = ContactState {
        rate_limiter: rate_limiter(),
        captcha: Arc::new(StaticCaptcha { outcome: true }),
        mailer: mailer.clone(),
    };
    (state, mailer)
}
