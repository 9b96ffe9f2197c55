use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::contact::handlers::contact_handler;
use crate::features::contact::services::{CaptchaVerifier, EmailSender, RateLimitService};

/// Everything the contact handler needs, injected at construction so tests
/// can substitute the outbound clients.
#[derive(Clone)]
pub struct ContactState {
    pub rate_limiter: Arc<RateLimitService>,
    pub captcha: Arc<dyn CaptchaVerifier>,
    pub mailer: Arc<dyn EmailSender>,
}

/// Create routes for the contact feature
///
/// Note: This feature is public (no authentication required) as it's called
/// directly by the website contact form.
pub fn routes(state: ContactState) -> Router {
    Router::new()
        .route(
            "/api/send-contact-email",
            post(contact_handler::send_contact_email)
                .options(contact_handler::preflight)
                .fallback(contact_handler::method_not_allowed),
        )
        .with_state(state)
}
