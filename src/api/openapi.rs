//! OpenAPI documentation configuration.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::config::STAFF_KEY_HEADER;
use crate::{api, error, models, services};

/// Registers the staff key header as a security scheme.
struct StaffKeySecurity;

impl Modify for StaffKeySecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "staff_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(STAFF_KEY_HEADER))),
            );
        }
    }
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tattoo Memorials Server",
        version = "0.3.0",
        description = "Order intake and staff administration API for custom memorial artwork"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    modifiers(&StaffKeySecurity),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Order endpoints
        api::orders::submit_living_order,
        api::orders::submit_memoriam_order,
        api::orders::get_living_order,
        api::orders::get_memoriam_order,
        api::orders::update_living_order,
        api::orders::update_memoriam_order,
        // Attachment endpoints
        api::attachments::upload_photographs,
        api::attachments::list_photographs,
        api::attachments::delete_photograph,
        api::attachments::upload_form,
        api::attachments::delete_form,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Orders
            models::Medium,
            models::order::OrderType,
            models::order::Disposition,
            models::order::PhotographDisposition,
            models::order::FormKind,
            models::LivingFormData,
            models::MemoriamFormData,
            models::LivingOrder,
            models::MemoriamOrder,
            models::LivingOrderPatch,
            models::MemoriamOrderPatch,
            api::orders::SubmitLivingRequest,
            api::orders::SubmitMemoriamRequest,
            api::orders::SubmissionResponse,
            api::orders::LivingOrderResponse,
            api::orders::MemoriamOrderResponse,
            api::orders::OrderNotFoundResponse,
            // Attachments
            services::UploadStatus,
            services::FileUploadStatus,
            api::attachments::PhotographEntry,
            api::attachments::PhotographListResponse,
            api::attachments::PhotographUploadResponse,
            api::attachments::FormUploadResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Orders", description = "Order submission and administration"),
        (name = "Attachments", description = "Order photographs and signed documents"),
    )
)]
pub struct ApiDoc;
