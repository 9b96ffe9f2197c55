use axum::{http::StatusCode, Json};
use axum::extract::State;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, ClientIp};
use crate::features::contact::dtos::{first_validation_message, ContactSubmissionDto};
use crate::features::contact::routes::ContactState;
use crate::features::contact::services::render_notification;
use crate::shared::types::{ErrorResponse, SuccessResponse};

/// Accept a contact form submission and forward it by email
///
/// This is a public endpoint (no authentication required). The request walks
/// a single pipeline: honeypot, rate limit, CAPTCHA, validation, delivery.
/// Every rejection is a JSON error body; internal detail stays in the logs.
#[utoipa::path(
    post,
    path = "/api/send-contact-email",
    request_body = ContactSubmissionDto,
    responses(
        (status = 200, description = "Inquiry accepted and forwarded", body = SuccessResponse),
        (status = 400, description = "Validation or CAPTCHA failure", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse),
        (status = 500, description = "Configuration or provider failure", body = ErrorResponse)
    ),
    tag = "contact"
)]
pub async fn send_contact_email(
    State(state): State<ContactState>,
    ClientIp(client_ip): ClientIp,
    AppJson(dto): AppJson<ContactSubmissionDto>,
) -> Result<Json<SuccessResponse>> {
    // A filled honeypot means a bot. Answer with a fabricated success so the
    // submitter gets no signal, and skip everything else including delivery.
    if dto.honeypot_triggered() {
        tracing::warn!(ip = %client_ip, "Honeypot triggered, dropping submission");
        return Ok(Json(SuccessResponse::ok()));
    }

    if !state.rate_limiter.check(&client_ip) {
        tracing::warn!(ip = %client_ip, "Rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    let Some(token) = dto.captcha_token() else {
        return Err(AppError::BadRequest(
            "CAPTCHA verification required".to_string(),
        ));
    };
    let remote_ip = (client_ip != "unknown").then_some(client_ip.as_str());
    if !state.captcha.verify(token, remote_ip).await {
        tracing::warn!(ip = %client_ip, "CAPTCHA verification failed");
        return Err(AppError::BadRequest(
            "CAPTCHA verification failed. Please try again.".to_string(),
        ));
    }

    let submission = dto.sanitized()?;
    submission
        .validate()
        .map_err(|e| AppError::Validation(first_validation_message(&e)))?;

    let message = render_notification(&submission)?;
    state.mailer.send(message).await?;

    tracing::info!(ip = %client_ip, "Contact inquiry forwarded");
    Ok(Json(SuccessResponse::ok()))
}

/// Bare `OPTIONS` requests that are not CORS preflights land here; real
/// preflights are answered by the CORS layer before they reach the router.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use axum::http::{header, HeaderName, Method, StatusCode};
    use axum_test::TestServer;
    use serde_json::json;

    use crate::core::middleware;
    use crate::features::contact::routes;
    use crate::shared::test_helpers::{test_state, test_state_with_captcha};

    const ENDPOINT: &str = "/api/send-contact-email";
    const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

    fn valid_body() -> serde_json::Value {
        json!({
            "name": "Ada Lovelace",
            "businessName": "Analytical Engines",
            "phone": "(555) 123-4567",
            "email": "ada@example.com",
            "service": "web-development",
            "message": "We need help modernizing our infrastructure.",
            "captchaToken": "token-123",
        })
    }

    #[tokio::test]
    async fn valid_submission_sends_one_email() {
        let (state, mailer) = test_state();
        let server = TestServer::new(routes::routes(state)).unwrap();

        let response = server.post(ENDPOINT).json(&valid_body()).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<serde_json::Value>(), json!({"success": true}));
        assert_eq!(mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn honeypot_fakes_success_without_sending() {
        let (state, mailer) = test_state();
        let server = TestServer::new(routes::routes(state)).unwrap();

        let mut body = valid_body();
        body["honeypot"] = json!("gotcha");
        let response = server.post(ENDPOINT).json(&body).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<serde_json::Value>(), json!({"success": true}));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn fourth_request_from_same_ip_is_rate_limited() {
        // Failing CAPTCHA keeps the mailbox quiet while still consuming the
        // rate-limit budget, since the limiter runs before verification.
        let (state, mailer) = test_state_with_captcha(false);
        let server = TestServer::new(routes::routes(state)).unwrap();

        for _ in 0..3 {
            let response = server.post(ENDPOINT).json(&valid_body()).await;
            assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        }
        let response = server.post(ENDPOINT).json(&valid_body()).await;
        assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn rate_limit_buckets_are_per_ip() {
        let (state, _mailer) = test_state();
        let server = TestServer::new(routes::routes(state)).unwrap();

        for _ in 0..3 {
            let response = server
                .post(ENDPOINT)
                .add_header(X_FORWARDED_FOR, "203.0.113.7")
                .json(&valid_body())
                .await;
            assert_eq!(response.status_code(), StatusCode::OK);
        }
        let response = server
            .post(ENDPOINT)
            .add_header(X_FORWARDED_FOR, "203.0.113.7")
            .json(&valid_body())
            .await;
        assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);

        let response = server
            .post(ENDPOINT)
            .add_header(X_FORWARDED_FOR, "198.51.100.4")
            .json(&valid_body())
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_captcha_token_is_rejected() {
        let (state, mailer) = test_state();
        let server = TestServer::new(routes::routes(state)).unwrap();

        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("captchaToken");
        let response = server.post(ENDPOINT).json(&body).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "CAPTCHA verification required"
        );
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn failed_captcha_is_rejected_without_sending() {
        let (state, mailer) = test_state_with_captcha(false);
        let server = TestServer::new(routes::routes(state)).unwrap();

        let response = server.post(ENDPOINT).json(&valid_body()).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "CAPTCHA verification failed. Please try again."
        );
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let (state, mailer) = test_state();
        let server = TestServer::new(routes::routes(state)).unwrap();

        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("phone");
        let response = server.post(ENDPOINT).json(&body).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "Missing required fields"
        );
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn out_of_bounds_fields_never_reach_the_mailer() {
        let (state, mailer) = test_state();
        let server = TestServer::new(routes::routes(state)).unwrap();

        for (field, value, expected) in [
            ("name", "A", "Name must be between 2 and 100 characters"),
            (
                "message",
                "too short",
                "Message must be between 10 and 5000 characters",
            ),
            (
                "phone",
                "555-123-456",
                "Please enter a valid 10-digit phone number",
            ),
        ] {
            let mut body = valid_body();
            body[field] = json!(value);
            let response = server.post(ENDPOINT).json(&body).await;
            assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
            assert_eq!(response.json::<serde_json::Value>()["error"], expected);
        }
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn html_markup_in_message_is_escaped_in_the_email() {
        let (state, mailer) = test_state();
        let server = TestServer::new(routes::routes(state)).unwrap();

        let mut body = valid_body();
        body["message"] = json!("<script>alert(\"pwned\")</script> & then some");
        let response = server.post(ENDPOINT).json(&body).await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let sent = mailer.sent();
        let message = sent.first().unwrap();
        assert!(message.html_body.contains("&lt;script&gt;"));
        assert!(message.html_body.contains("&amp; then some"));
        assert!(!message.html_body.contains("<script>alert"));
    }

    #[tokio::test]
    async fn provider_failure_surfaces_as_generic_500() {
        let (state, _mailer) = crate::shared::test_helpers::failing_mailer_state();
        let server = TestServer::new(routes::routes(state)).unwrap();

        let response = server.post(ENDPOINT).json(&valid_body()).await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "An error occurred while processing your request. Please try again later."
        );
    }

    #[tokio::test]
    async fn other_methods_get_405() {
        let (state, _mailer) = test_state();
        let server = TestServer::new(routes::routes(state)).unwrap();

        let response = server.get(ENDPOINT).await;
        assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.json::<serde_json::Value>()["error"],
            "Method not allowed"
        );
    }

    #[tokio::test]
    async fn preflight_gets_cors_headers_and_no_body_processing() {
        let (state, mailer) = test_state();
        let app = routes::routes(state).layer(middleware::cors_layer("example.com".to_string()));
        let server = TestServer::new(app).unwrap();

        let response = server
            .method(Method::OPTIONS, ENDPOINT)
            .add_header(header::ORIGIN, "https://www.example.com")
            .add_header(
                header::ACCESS_CONTROL_REQUEST_METHOD,
                "POST",
            )
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("https://www.example.com")
        );
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn disallowed_origin_gets_no_cors_headers() {
        let (state, _mailer) = test_state();
        let app = routes::routes(state).layer(middleware::cors_layer("example.com".to_string()));
        let server = TestServer::new(app).unwrap();

        let response = server
            .method(Method::OPTIONS, ENDPOINT)
            .add_header(header::ORIGIN, "https://evil.test")
            .add_header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .await;

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
