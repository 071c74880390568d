//! Food request HTTP handlers.
//!
//! ```text
//! POST /api/v1/requests {"foodId":"<uuid>","quantity":5}
//! GET /api/v1/requests
//! PUT /api/v1/requests/{id}/review {"decision":"approve"}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateFoodRequest, RequestOverview, ReviewFoodRequest};
use crate::domain::{Action, Error, FoodRequest, ListingId, RequestId, ReviewDecision};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{authorize_actor, resolve_actor};
use crate::inbound::http::listings::ListingResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserSummaryResponse;
use crate::inbound::http::validation::{
    FieldName, decode_body, invalid_value_error, parse_quantity, parse_uuid, require,
};

const FOOD_ID: FieldName = FieldName::new("foodId");
const QUANTITY: FieldName = FieldName::new("quantity");
const DECISION: FieldName = FieldName::new("decision");
const REQUEST_ID: FieldName = FieldName::new("id");

/// Request payload for `POST /api/v1/requests`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    #[schema(example = "3b241101-e2bb-4255-8caf-4136c566a962")]
    pub food_id: Option<String>,
    #[schema(example = 5)]
    pub quantity: Option<i64>,
}

/// Request payload for `PUT /api/v1/requests/{id}/review`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBody {
    /// `approve` or `reject`.
    #[schema(example = "approve")]
    pub decision: Option<String>,
}

/// Response payload for a food request.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FoodRequestResponse {
    pub id: String,
    pub food_id: String,
    pub quantity: u32,
    pub ngo_id: String,
    /// `Pending`, `Approved` or `Rejected`.
    #[schema(example = "Pending")]
    pub status: String,
    pub created_at: String,
}

impl From<FoodRequest> for FoodRequestResponse {
    fn from(request: FoodRequest) -> Self {
        Self {
            id: request.id().to_string(),
            food_id: request.food_id().to_string(),
            quantity: request.quantity().get(),
            ngo_id: request.ngo_id().to_string(),
            status: request.status().as_str().to_owned(),
            created_at: request.created_at().to_rfc3339(),
        }
    }
}

/// Request with the referenced listing and requesting NGO attached.
///
/// `food` and `ngo` are `null` when the referenced record does not exist.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestOverviewResponse {
    #[serde(flatten)]
    pub request: FoodRequestResponse,
    pub food: Option<ListingResponse>,
    pub ngo: Option<UserSummaryResponse>,
}

impl From<RequestOverview> for RequestOverviewResponse {
    fn from(overview: RequestOverview) -> Self {
        Self {
            request: FoodRequestResponse::from(overview.request),
            food: overview.food.map(ListingResponse::from),
            ngo: overview.ngo.map(UserSummaryResponse::from),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RequestPath {
    id: String,
}

fn parse_decision(body: ReviewBody) -> Result<ReviewDecision, Error> {
    let raw = require(body.decision, DECISION)?;
    raw.parse::<ReviewDecision>()
        .map_err(|_| invalid_value_error(DECISION, "decision must be approve or reject"))
}

/// Raise a request against a listing. NGOs only.
///
/// The referenced listing is not looked up; an unknown `foodId` is accepted.
/// Callers without the NGO role get 403 before the body is decoded.
#[utoipa::path(
    post,
    path = "/api/v1/requests",
    request_body = CreateRequestBody,
    responses(
        (status = 201, description = "Request created", body = FoodRequestResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not an NGO", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "createRequest"
)]
#[post("/requests")]
pub async fn create_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Result<web::Json<CreateRequestBody>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let actor =
        authorize_actor(&session, state.current_user.as_ref(), Action::CreateRequest).await?;
    let CreateRequestBody { food_id, quantity } = decode_body(payload)?;
    let food_id = ListingId::from_uuid(parse_uuid(&require(food_id, FOOD_ID)?, FOOD_ID)?);
    let quantity = parse_quantity(require(quantity, QUANTITY)?, QUANTITY)?;
    let request = state
        .requests
        .create_request(CreateFoodRequest {
            actor,
            food_id,
            quantity,
        })
        .await?;
    Ok(HttpResponse::Created().json(FoodRequestResponse::from(request)))
}

/// List every request with its listing and requester. Admins only.
#[utoipa::path(
    get,
    path = "/api/v1/requests",
    responses(
        (status = 200, description = "All requests", body = [RequestOverviewResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not an admin", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "listRequests"
)]
#[get("/requests")]
pub async fn list_requests(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<RequestOverviewResponse>>> {
    let actor = resolve_actor(&session, state.current_user.as_ref()).await?;
    let overviews = state.requests_query.list_all(&actor).await?;
    Ok(web::Json(
        overviews
            .into_iter()
            .map(RequestOverviewResponse::from)
            .collect(),
    ))
}

/// Approve or reject a pending request. Admins only.
#[utoipa::path(
    put,
    path = "/api/v1/requests/{id}/review",
    request_body = ReviewBody,
    params(
        ("id" = String, Path, description = "Request identifier")
    ),
    responses(
        (status = 200, description = "Request reviewed", body = FoodRequestResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not an admin", body = ErrorSchema),
        (status = 404, description = "Request not found", body = ErrorSchema),
        (status = 409, description = "Request already reviewed", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "reviewRequest"
)]
#[put("/requests/{id}/review")]
pub async fn review_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<RequestPath>,
    payload: Result<web::Json<ReviewBody>, actix_web::Error>,
) -> ApiResult<web::Json<FoodRequestResponse>> {
    let actor =
        authorize_actor(&session, state.current_user.as_ref(), Action::ReviewRequest).await?;
    let request_id = RequestId::from_uuid(parse_uuid(&path.into_inner().id, REQUEST_ID)?);
    let decision = parse_decision(decode_body(payload)?)?;
    let request = state
        .requests
        .review_request(ReviewFoodRequest {
            actor,
            request_id,
            decision,
        })
        .await?;
    Ok(web::Json(FoodRequestResponse::from(request)))
}

#[cfg(test)]
#[path = "requests_tests.rs"]
mod tests;
