//! Session and account handlers.
//!
//! ```text
//! POST /api/v1/users/register {"name":"Harbour Deli","email":"deli@foodshare.test","password":"password","role":"donor"}
//! POST /api/v1/login {"email":"donor@foodshare.test","password":"password"}
//! POST /api/v1/logout
//! GET /api/v1/users/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use utoipa::ToSchema;

use crate::domain::ports::UserSummary;
use crate::domain::{
    Error, LoginCredentials, LoginValidationError, RegisterUser, RegistrationValidationError, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::current_account;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error, require};

const NAME: FieldName = FieldName::new("name");
const EMAIL: FieldName = FieldName::new("email");
const PASSWORD: FieldName = FieldName::new("password");
const ROLE: FieldName = FieldName::new("role");

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON:
/// `{"email":"donor@foodshare.test","password":"password"}`
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Sign-up body for `POST /api/v1/users/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "Harbour Deli")]
    pub name: Option<String>,
    #[schema(example = "deli@foodshare.test")]
    pub email: Option<String>,
    #[schema(example = "password")]
    pub password: Option<String>,
    /// One of `donor`, `ngo` or `admin`; fixed for the account's lifetime.
    #[schema(example = "donor")]
    pub role: Option<String>,
}

/// Account payload for `GET /api/v1/users/me`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "6f1c1a52-4f2e-4a54-9d1b-0c8a2a2f5d01")]
    pub id: String,
    #[schema(example = "Corner Bakery")]
    pub name: String,
    #[schema(example = "donor@foodshare.test")]
    pub email: String,
    /// One of `donor`, `ngo` or `admin`.
    #[schema(example = "donor")]
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().as_ref().to_owned(),
            email: user.email().as_ref().to_owned(),
            role: user.role().as_str().to_owned(),
        }
    }
}

/// Public contact details attached to listings and requests.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<UserSummary> for UserSummaryResponse {
    fn from(summary: UserSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            name: summary.name.into(),
            email: summary.email.into(),
        }
    }
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn parse_registration(body: RegisterRequest) -> Result<RegisterUser, Error> {
    let name = require(body.name, NAME)?;
    let email = require(body.email, EMAIL)?;
    let password = require(body.password, PASSWORD)?;
    let role = require(body.role, ROLE)?;
    RegisterUser::try_from_parts(&name, &email, &password, &role)
        .map_err(map_registration_error)
}

fn map_registration_error(err: RegistrationValidationError) -> Error {
    match err {
        RegistrationValidationError::InvalidName(_) => invalid_value_error(NAME, err.to_string()),
        RegistrationValidationError::UnknownRole => invalid_value_error(ROLE, err.to_string()),
        RegistrationValidationError::InvalidEmail => Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "email", "code": "invalid_email" })),
        RegistrationValidationError::EmptyPassword => Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Create an account. The role chosen here cannot be changed later.
///
/// Does not log the new user in.
#[utoipa::path(
    post,
    path = "/api/v1/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "User directory unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let request = parse_registration(payload.into_inner())?;
    let user = state.registration.register(request).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Authenticate user and establish a session.
///
/// Uses the centralised `Error` type so clients get a consistent
/// error schema across all endpoints.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "User directory unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::InvalidEmail => Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "email", "code": "invalid_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// End the session. Succeeds whether or not a user was logged in.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Return the account behind the session, including its role.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use foodshare::inbound::http::users::current_user;
///
/// let app = App::new().service(current_user);
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "User directory unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let user = current_account(&session, state.current_user.as_ref()).await?;
    Ok(web::Json(UserResponse::from(user)))
}
