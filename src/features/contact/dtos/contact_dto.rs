use std::borrow::Cow;

use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::core::error::AppError;
use crate::shared::validation::{phone_digits, sanitize_input, EMAIL_REGEX};

/// Incoming contact form payload.
///
/// All fields are optional at the wire level so that presence checks can
/// produce the endpoint's own error message instead of a serde rejection.
/// `recaptchaToken` is accepted as an alias for `captchaToken` to keep the
/// older site client working.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmissionDto {
    pub name: Option<String>,
    pub business_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Service category code, e.g. "msp" or "web-development"
    pub service: Option<String>,
    pub message: Option<String>,
    #[serde(alias = "recaptchaToken")]
    pub captcha_token: Option<String>,
    /// Hidden anti-bot field; legitimate users never fill it
    pub honeypot: Option<String>,
}

impl ContactSubmissionDto {
    pub fn honeypot_triggered(&self) -> bool {
        self.honeypot.as_deref().is_some_and(|value| !value.is_empty())
    }

    pub fn captcha_token(&self) -> Option<&str> {
        self.captcha_token.as_deref().filter(|token| !token.is_empty())
    }

    /// Trim, HTML-escape, and cap every free-text field, rejecting the
    /// request when a required field is absent or blank. Length and format
    /// bounds are checked afterwards, on the sanitized values.
    pub fn sanitized(&self) -> Result<SanitizedSubmission, AppError> {
        let name = self.name.as_deref().map(sanitize_input).unwrap_or_default();
        let phone = self.phone.as_deref().map(sanitize_input).unwrap_or_default();
        let email = self.email.as_deref().map(sanitize_input).unwrap_or_default();
        let message = self
            .message
            .as_deref()
            .map(sanitize_input)
            .unwrap_or_default();
        let service_code = self.service.as_deref().map(str::trim).unwrap_or_default();

        if name.is_empty()
            || phone.is_empty()
            || email.is_empty()
            || service_code.is_empty()
            || message.is_empty()
        {
            return Err(AppError::BadRequest("Missing required fields".to_string()));
        }

        let business_name = self
            .business_name
            .as_deref()
            .map(sanitize_input)
            .filter(|value| !value.is_empty());

        Ok(SanitizedSubmission {
            name,
            business_name,
            phone,
            email,
            service: ServiceCategory::from_code(service_code),
            message,
        })
    }
}

/// A submission whose free-text fields have been trimmed, escaped, and
/// capped. This is the only form that reaches the email templates.
#[derive(Debug, Clone, Validate)]
pub struct SanitizedSubmission {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(length(max = 100, message = "Business name must be less than 100 characters"))]
    pub business_name: Option<String>,

    #[validate(custom(function = validate_phone))]
    pub phone: String,

    #[validate(
        regex(path = *EMAIL_REGEX, message = "Please enter a valid email address"),
        email(message = "Please enter a valid email address")
    )]
    pub email: String,

    pub service: ServiceCategory,

    #[validate(length(
        min = 10,
        max = 5000,
        message = "Message must be between 10 and 5000 characters"
    ))]
    pub message: String,
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone_digits(phone).len() == 10 {
        return Ok(());
    }
    let mut error = ValidationError::new("phone");
    error.message = Some(Cow::Borrowed("Please enter a valid 10-digit phone number"));
    Err(error)
}

/// Field order mirrors the order the checks are reported in, so the caller
/// always sees a stable message when several fields fail at once.
const FIELD_MESSAGE_ORDER: [&str; 5] = ["name", "message", "business_name", "email", "phone"];

pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    for field in FIELD_MESSAGE_ORDER {
        if let Some(list) = field_errors.get(field) {
            if let Some(message) = list.first().and_then(|error| error.message.as_ref()) {
                return message.to_string();
            }
        }
    }
    "Invalid input".to_string()
}

/// Service category offered on the contact form. Unrecognized codes are
/// accepted and labeled "Not specified".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCategory {
    Msp,
    AppDevelopment,
    WebDevelopment,
    SoftwareDevelopment,
    ItConsultation,
    Other,
    NotSpecified,
}

impl ServiceCategory {
    pub fn from_code(code: &str) -> Self {
        match code {
            "msp" => Self::Msp,
            "app-development" => Self::AppDevelopment,
            "web-development" => Self::WebDevelopment,
            "software-development" => Self::SoftwareDevelopment,
            "it-consultation" => Self::ItConsultation,
            "other" => Self::Other,
            _ => Self::NotSpecified,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Msp => "Managed Services (MSP)",
            Self::AppDevelopment => "App Development",
            Self::WebDevelopment => "Web Development",
            Self::SoftwareDevelopment => "Software Development",
            Self::ItConsultation => "IT Consultation",
            Self::Other => "Other",
            Self::NotSpecified => "Not specified",
        }
    }
}
