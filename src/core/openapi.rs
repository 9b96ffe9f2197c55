use utoipa::{Modify, OpenApi};

use crate::features::contact::{dtos as contact_dtos, handlers as contact_handlers};
use crate::shared::types::{ErrorResponse, SuccessResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Contact (public)
        contact_handlers::contact_handler::send_contact_email,
    ),
    components(
        schemas(
            contact_dtos::ContactSubmissionDto,
            SuccessResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "contact", description = "Contact form submission (public)"),
    ),
    info(
        title = "Contact API",
        version = "0.1.0",
        description = "Contact form endpoint for the company website",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
