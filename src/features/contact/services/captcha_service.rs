use async_trait::async_trait;
use serde::Deserialize;

use crate::core::config::CaptchaConfig;

/// Seam for CAPTCHA verification so handler tests can run without network
/// access. Every error path verifies false (fail closed).
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    async fn verify(&self, token: &str, remote_ip: Option<&str>) -> bool;
}

/// hCaptcha siteverify API response structure
#[derive(Debug, Deserialize)]
pub struct SiteVerifyResponse {
    pub success: bool,
    #[serde(rename = "error-codes")]
    pub error_codes: Option<Vec<String>>,
}

/// Client for the hCaptcha siteverify endpoint
pub struct HcaptchaClient {
    client: reqwest::Client,
    config: CaptchaConfig,
}

impl HcaptchaClient {
    pub fn new(config: CaptchaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl CaptchaVerifier for HcaptchaClient {
    async fn verify(&self, token: &str, remote_ip: Option<&str>) -> bool {
        let Some(secret) = self.config.secret.as_deref() else {
            tracing::error!("CAPTCHA secret key not configured");
            return false;
        };

        let mut params = vec![("secret", secret), ("response", token)];
        if let Some(ip) = remote_ip {
            params.push(("remoteip", ip));
        }

        let response = match self
            .client
            .post(&self.config.verify_url)
            .form(&params)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("CAPTCHA verification request failed: {:?}", e);
                return false;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                "CAPTCHA verification returned status: {}",
                response.status()
            );
            return false;
        }

        match response.json::<SiteVerifyResponse>().await {
            Ok(body) => {
                if !body.success {
                    tracing::warn!(
                        "CAPTCHA verification rejected the token: {:?}",
                        body.error_codes
                    );
                }
                body.success
            }
            Err(e) => {
                tracing::error!("Failed to parse CAPTCHA verification response: {:?}", e);
                false
            }
        }
    }
}
