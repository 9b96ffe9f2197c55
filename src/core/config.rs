use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub rate_limit: RateLimitConfig,
    pub captcha: CaptchaConfig,
    pub mailer: MailerConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Hostname of the site allowed to call the contact endpoint from a
    /// browser. Localhost origins are always accepted for development.
    pub allowed_hostname: String,
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_secs: u64,
}

/// CAPTCHA verification configuration (hCaptcha siteverify API)
#[derive(Debug, Clone)]
pub struct CaptchaConfig {
    pub verify_url: String,
    /// Server-side secret. Verification fails closed when this is absent.
    pub secret: Option<String>,
}

/// Transactional email provider configuration (Mailjet v3.1 send API)
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub secret_key: Option<String>,
    pub from_email: String,
    pub from_name: String,
    pub to_email: String,
    pub to_name: String,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            rate_limit: RateLimitConfig::from_env()?,
            captcha: CaptchaConfig::from_env()?,
            mailer: MailerConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let allowed_hostname =
            env::var("ALLOWED_ORIGIN_HOSTNAME").unwrap_or_else(|_| "localhost".to_string());

        Ok(Self {
            host,
            port,
            allowed_hostname,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl RateLimitConfig {
    // 3 requests per 5 minutes per client IP
    const DEFAULT_MAX_REQUESTS: u32 = 3;
    const DEFAULT_WINDOW_SECS: u64 = 300;

    pub fn from_env() -> Result<Self, String> {
        let max_requests = env::var("RATE_LIMIT_MAX_REQUESTS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUESTS.to_string())
            .parse::<u32>()
            .map_err(|_| "RATE_LIMIT_MAX_REQUESTS must be a valid number".to_string())?;

        let window_secs = env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_WINDOW_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "RATE_LIMIT_WINDOW_SECS must be a valid number".to_string())?;

        Ok(Self {
            max_requests,
            window_secs,
        })
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl CaptchaConfig {
    pub fn from_env() -> Result<Self, String> {
        let verify_url = env::var("HCAPTCHA_VERIFY_URL")
            .unwrap_or_else(|_| "https://hcaptcha.com/siteverify".to_string());

        // Only use the secret if it is non-empty
        let secret = env::var("HCAPTCHA_SECRET_KEY").ok().filter(|s| !s.is_empty());

        Ok(Self { verify_url, secret })
    }
}

impl MailerConfig {
    pub fn from_env() -> Result<Self, String> {
        let api_url = env::var("MAILJET_API_URL")
            .unwrap_or_else(|_| "https://api.mailjet.com/v3.1/send".to_string());

        let api_key = env::var("MAILJET_API_KEY").ok().filter(|s| !s.is_empty());
        let secret_key = env::var("MAILJET_SECRET_KEY").ok().filter(|s| !s.is_empty());

        let from_email =
            env::var("MAILJET_FROM_EMAIL").unwrap_or_else(|_| "noreply@example.com".to_string());
        let from_name =
            env::var("MAILJET_FROM_NAME").unwrap_or_else(|_| "Website Contact".to_string());
        let to_email =
            env::var("MAILJET_TO_EMAIL").unwrap_or_else(|_| "inbox@example.com".to_string());
        let to_name = env::var("MAILJET_TO_NAME").unwrap_or_else(|_| "Site Owner".to_string());

        Ok(Self {
            api_url,
            api_key,
            secret_key,
            from_email,
            from_name,
            to_email,
            to_name,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Contact API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Contact form endpoint for the company website".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_window_is_a_duration() {
        let config = RateLimitConfig {
            max_requests: 3,
            window_secs: 300,
        };
        assert_eq!(config.window(), Duration::from_secs(300));
    }

    #[test]
    fn swagger_credentials_require_both_parts() {
        let config = SwaggerConfig {
            username: Some("admin".to_string()),
            password: None,
            title: "t".to_string(),
            version: "v".to_string(),
            description: "d".to_string(),
        };
        assert_eq!(config.credentials(), None);
    }
}
