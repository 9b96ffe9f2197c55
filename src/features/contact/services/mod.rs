pub mod captcha_service;
pub mod mailer_service;
pub mod rate_limit_service;

pub use captcha_service::{CaptchaVerifier, HcaptchaClient};
pub use mailer_service::{render_notification, EmailMessage, EmailSender, MailjetClient};
pub use rate_limit_service::RateLimitService;
