//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `inbound::http`, the shared
//! error envelope schema and the session cookie security scheme. Swagger UI
//! serves it in debug builds and `openapi-dump` prints it for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::listings::{AvailableListingResponse, CreateListingBody, ListingResponse};
use crate::inbound::http::requests::{
    CreateRequestBody, FoodRequestResponse, RequestOverviewResponse, ReviewBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{
    LoginRequest, RegisterRequest, UserResponse, UserSummaryResponse,
};

/// Session cookie name shared by the server and the security scheme.
pub const SESSION_COOKIE_NAME: &str = "session";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Foodshare API",
        description = "Donors post surplus food, NGOs request it and admins arbitrate claims and requests."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::listings::create_listing,
        crate::inbound::http::listings::list_available,
        crate::inbound::http::listings::claim_listing,
        crate::inbound::http::requests::create_request,
        crate::inbound::http::requests::list_requests,
        crate::inbound::http::requests::review_request,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RegisterRequest,
        LoginRequest,
        UserResponse,
        UserSummaryResponse,
        CreateListingBody,
        ListingResponse,
        AvailableListingResponse,
        CreateRequestBody,
        ReviewBody,
        FoodRequestResponse,
        RequestOverviewResponse,
    )),
    tags(
        (name = "users", description = "Sign-up, login, logout and the current account"),
        (name = "food", description = "Food listings posted by donors"),
        (name = "requests", description = "NGO requests reviewed by admins"),
        (name = "health", description = "Liveness and readiness checks")
    )
)]
pub struct ApiDoc;
