//! Embedded email templates rendered with Jinja2 syntax.
//!
//! Templates are compiled into the binary so the service has no runtime file
//! dependency. Submission values are HTML-escaped during sanitization, before
//! they reach the templates, so rendering applies no further escaping.

use minijinja::{Environment, Value};
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

pub const CONTACT_NOTIFICATION_HTML: &str = "email/contact_notification_html.jinja";
pub const CONTACT_NOTIFICATION_TEXT: &str = "email/contact_notification_text.jinja";

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    let sources = [
        (
            CONTACT_NOTIFICATION_HTML,
            include_str!("../../templates/email/contact_notification_html.jinja"),
        ),
        (
            CONTACT_NOTIFICATION_TEXT,
            include_str!("../../templates/email/contact_notification_text.jinja"),
        ),
    ];

    for (name, source) in sources {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        }
    }

    env
}

/// Get the global template environment
fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a template with the given context.
pub fn render(template_name: &str, ctx: &Value) -> Result<String, TemplateError> {
    let env = get_environment();

    let template = env
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}
