//! Food listing HTTP handlers.
//!
//! ```text
//! POST /api/v1/food {"name":"Bread","quantity":10,"expiryDate":"2026-11-01","location":"Main St"}
//! GET /api/v1/food
//! PUT /api/v1/food/{id}/claim
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{AvailableListing, ClaimListingRequest, CreateListingRequest};
use crate::domain::{Action, Error, FoodListing, ListingDraft, ListingId, ListingValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{authorize_actor, resolve_actor};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserSummaryResponse;
use crate::inbound::http::validation::{
    FieldName, decode_body, invalid_value_error, parse_date, parse_quantity, parse_uuid, require,
};

const NAME: FieldName = FieldName::new("name");
const QUANTITY: FieldName = FieldName::new("quantity");
const EXPIRY_DATE: FieldName = FieldName::new("expiryDate");
const LOCATION: FieldName = FieldName::new("location");
const LISTING_ID: FieldName = FieldName::new("id");

/// Request payload for `POST /api/v1/food`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingBody {
    #[schema(example = "Bread")]
    pub name: Option<String>,
    #[schema(example = 10)]
    pub quantity: Option<i64>,
    /// Calendar date in `YYYY-MM-DD` form.
    #[schema(example = "2026-11-01")]
    pub expiry_date: Option<String>,
    #[schema(example = "Main St pantry")]
    pub location: Option<String>,
}

/// Response payload for a food listing.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    #[schema(example = "2026-11-01")]
    pub expiry_date: String,
    pub location: String,
    pub donor_id: String,
    /// `available` or `claimed`.
    #[schema(example = "available")]
    pub status: String,
    pub created_at: String,
}

impl From<FoodListing> for ListingResponse {
    fn from(listing: FoodListing) -> Self {
        Self {
            id: listing.id().to_string(),
            name: listing.name().to_owned(),
            quantity: listing.quantity().get(),
            expiry_date: listing.expiry_date().format("%Y-%m-%d").to_string(),
            location: listing.location().to_owned(),
            donor_id: listing.donor_id().to_string(),
            status: listing.status().as_str().to_owned(),
            created_at: listing.created_at().to_rfc3339(),
        }
    }
}

/// Available listing with the donor's contact details.
///
/// `donor` is `null` when the donor account no longer exists.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailableListingResponse {
    #[serde(flatten)]
    pub listing: ListingResponse,
    pub donor: Option<UserSummaryResponse>,
}

impl From<AvailableListing> for AvailableListingResponse {
    fn from(entry: AvailableListing) -> Self {
        Self {
            listing: ListingResponse::from(entry.listing),
            donor: entry.donor.map(UserSummaryResponse::from),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListingPath {
    id: String,
}

fn parse_draft(body: CreateListingBody) -> Result<ListingDraft, Error> {
    let name = require(body.name, NAME)?;
    let quantity = parse_quantity(require(body.quantity, QUANTITY)?, QUANTITY)?;
    let expiry_date = parse_date(&require(body.expiry_date, EXPIRY_DATE)?, EXPIRY_DATE)?;
    let location = require(body.location, LOCATION)?;
    ListingDraft::new(&name, quantity, expiry_date, &location).map_err(map_draft_error)
}

fn map_draft_error(err: ListingValidationError) -> Error {
    let field = match err {
        ListingValidationError::EmptyName | ListingValidationError::NameTooLong { .. } => NAME,
        ListingValidationError::EmptyLocation | ListingValidationError::LocationTooLong { .. } => {
            LOCATION
        }
    };
    invalid_value_error(field, err.to_string())
}

fn parse_listing_id(path: ListingPath) -> Result<ListingId, Error> {
    parse_uuid(&path.id, LISTING_ID).map(ListingId::from_uuid)
}

/// Post surplus food. Donors only.
///
/// The role is checked before the body is decoded, so non-donors get 403
/// even for malformed payloads.
#[utoipa::path(
    post,
    path = "/api/v1/food",
    request_body = CreateListingBody,
    responses(
        (status = 201, description = "Listing created", body = ListingResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not a donor", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["food"],
    operation_id = "createListing"
)]
#[post("/food")]
pub async fn create_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Result<web::Json<CreateListingBody>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let actor =
        authorize_actor(&session, state.current_user.as_ref(), Action::CreateListing).await?;
    let draft = parse_draft(decode_body(payload)?)?;
    let listing = state
        .listings
        .create_listing(CreateListingRequest { actor, draft })
        .await?;
    Ok(HttpResponse::Created().json(ListingResponse::from(listing)))
}

/// List food that is still available, with donor details attached.
#[utoipa::path(
    get,
    path = "/api/v1/food",
    responses(
        (status = 200, description = "Available listings", body = [AvailableListingResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["food"],
    operation_id = "listAvailableListings"
)]
#[get("/food")]
pub async fn list_available(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<AvailableListingResponse>>> {
    let actor = resolve_actor(&session, state.current_user.as_ref()).await?;
    let listings = state.listings_query.list_available(&actor).await?;
    Ok(web::Json(
        listings
            .into_iter()
            .map(AvailableListingResponse::from)
            .collect(),
    ))
}

/// Mark a listing as claimed. Allowed for the owning donor and admins.
#[utoipa::path(
    put,
    path = "/api/v1/food/{id}/claim",
    params(
        ("id" = String, Path, description = "Listing identifier")
    ),
    responses(
        (status = 200, description = "Listing claimed", body = ListingResponse),
        (status = 400, description = "Invalid listing id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller may not claim this listing", body = ErrorSchema),
        (status = 404, description = "Listing not found", body = ErrorSchema),
        (status = 409, description = "Listing already claimed", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["food"],
    operation_id = "claimListing"
)]
#[put("/food/{id}/claim")]
pub async fn claim_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ListingPath>,
) -> ApiResult<web::Json<ListingResponse>> {
    let actor = resolve_actor(&session, state.current_user.as_ref()).await?;
    let listing_id = parse_listing_id(path.into_inner())?;
    let listing = state
        .listings
        .claim_listing(ClaimListingRequest { actor, listing_id })
        .await?;
    Ok(web::Json(ListingResponse::from(listing)))
}

#[cfg(test)]
#[path = "listings_tests.rs"]
mod tests;
