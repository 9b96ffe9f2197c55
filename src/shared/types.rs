use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned on every successful submission, including the fabricated
/// success for honeypot-triggered requests.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Body returned on every error exit path.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_shape() {
        let body = serde_json::to_value(SuccessResponse::ok()).unwrap();
        assert_eq!(body, serde_json::json!({ "success": true }));
    }
}
