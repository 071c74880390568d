//! Tests for food request handlers.

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{
    ADMIN_EMAIL, DONOR_EMAIL, NGO_EMAIL, login_cookie, memory_state, read_json, test_app,
};

const UNKNOWN_ID: &str = "3b241101-e2bb-4255-8caf-4136c566a962";

async fn send<S>(
    app: &S,
    request: actix_test::TestRequest,
    cookie: Cookie<'static>,
) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    actix_test::call_service(app, request.cookie(cookie).to_request()).await
}

async fn create_listing<S>(app: &S) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let donor = login_cookie(app, DONOR_EMAIL).await;
    let response = send(
        app,
        actix_test::TestRequest::post().uri("/api/v1/food").set_json(json!({
            "name": "Bread",
            "quantity": 10,
            "expiryDate": "2026-11-01",
            "location": "Main St pantry"
        })),
        donor,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await["id"]
        .as_str()
        .expect("listing id")
        .to_owned()
}

async fn create_request<S>(app: &S, cookie: Cookie<'static>, food_id: &str) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/requests")
            .set_json(json!({"foodId": food_id, "quantity": 5})),
        cookie,
    )
    .await
}

async fn review<S>(app: &S, cookie: Cookie<'static>, id: &str, decision: &str) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(
        app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/requests/{id}/review"))
            .set_json(json!({"decision": decision})),
        cookie,
    )
    .await
}

#[rstest]
#[actix_web::test]
async fn ngo_creates_pending_request() {
    let app = actix_test::init_service(test_app(memory_state().await)).await;
    let food_id = create_listing(&app).await;
    let ngo = login_cookie(&app, NGO_EMAIL).await;

    let response = create_request(&app, ngo, &food_id).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let request = read_json(response).await;
    assert_eq!(request["status"], json!("Pending"));
    assert_eq!(request["foodId"], json!(food_id));
    assert_eq!(request["quantity"], json!(5));
    assert_eq!(
        request["ngoId"],
        json!("0b7e9d8c-2a43-4c61-8f3e-5d9a6b1c7e02")
    );
}

#[rstest]
#[case(DONOR_EMAIL)]
#[case(ADMIN_EMAIL)]
#[actix_web::test]
async fn only_ngos_create_requests(#[case] email: &str) {
    let app = actix_test::init_service(test_app(memory_state().await)).await;
    let cookie = login_cookie(&app, email).await;

    let response = create_request(&app, cookie, UNKNOWN_ID).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        read_json(response).await["message"],
        json!("only NGOs can request food")
    );
}

#[rstest]
#[case(json!({"foodId": "bread", "quantity": 1}), "foodId", "invalid_uuid")]
#[case(json!({"quantity": 1}), "foodId", "missing_field")]
#[case(json!({"foodId": UNKNOWN_ID, "quantity": -1}), "quantity", "invalid_quantity")]
#[actix_web::test]
async fn malformed_request_bodies_are_rejected(
    #[case] body: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(memory_state().await)).await;
    let ngo = login_cookie(&app, NGO_EMAIL).await;

    let response = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/requests")
            .set_json(body),
        ngo,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value = read_json(response).await;
    assert_eq!(value["details"]["field"], json!(field));
    assert_eq!(value["details"]["code"], json!(code));
}

#[rstest]
#[actix_web::test]
async fn unknown_food_id_is_accepted_and_listed_without_food() {
    let app = actix_test::init_service(test_app(memory_state().await)).await;
    let ngo = login_cookie(&app, NGO_EMAIL).await;
    let admin = login_cookie(&app, ADMIN_EMAIL).await;

    let response = create_request(&app, ngo, UNKNOWN_ID).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let listed = send(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/requests"),
        admin,
    )
    .await;
    assert_eq!(listed.status(), StatusCode::OK);
    let overviews = read_json(listed).await;
    let overview = &overviews.as_array().expect("array")[0];
    assert_eq!(overview["foodId"], json!(UNKNOWN_ID));
    assert!(overview["food"].is_null());
    assert_eq!(overview["ngo"]["name"], json!("City Food Bank"));
}

#[rstest]
#[actix_web::test]
async fn admin_list_attaches_listing() {
    let app = actix_test::init_service(test_app(memory_state().await)).await;
    let food_id = create_listing(&app).await;
    let ngo = login_cookie(&app, NGO_EMAIL).await;
    let admin = login_cookie(&app, ADMIN_EMAIL).await;
    create_request(&app, ngo, &food_id).await;

    let listed = send(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/requests"),
        admin,
    )
    .await;
    let overviews = read_json(listed).await;
    let overview = &overviews.as_array().expect("array")[0];
    assert_eq!(overview["food"]["id"], json!(food_id));
    assert_eq!(overview["food"]["name"], json!("Bread"));
    assert_eq!(overview["status"], json!("Pending"));
}

#[rstest]
#[case(DONOR_EMAIL)]
#[case(NGO_EMAIL)]
#[actix_web::test]
async fn non_admins_cannot_list_requests(#[case] email: &str) {
    let app = actix_test::init_service(test_app(memory_state().await)).await;
    let cookie = login_cookie(&app, email).await;

    let response = send(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/requests"),
        cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn review_approves_once_then_conflicts() {
    let app = actix_test::init_service(test_app(memory_state().await)).await;
    let food_id = create_listing(&app).await;
    let ngo = login_cookie(&app, NGO_EMAIL).await;
    let admin = login_cookie(&app, ADMIN_EMAIL).await;
    let created = read_json(create_request(&app, ngo.clone(), &food_id).await).await;
    let id = created["id"].as_str().expect("request id");

    let denied = review(&app, ngo, id, "approve").await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let approved = review(&app, admin.clone(), id, "approve").await;
    assert_eq!(approved.status(), StatusCode::OK);
    assert_eq!(read_json(approved).await["status"], json!("Approved"));

    let again = review(&app, admin, id, "reject").await;
    assert_eq!(again.status(), StatusCode::CONFLICT);
    assert_eq!(read_json(again).await["code"], json!("conflict"));
}

#[rstest]
#[actix_web::test]
async fn reject_leaves_listing_available() {
    let app = actix_test::init_service(test_app(memory_state().await)).await;
    let food_id = create_listing(&app).await;
    let ngo = login_cookie(&app, NGO_EMAIL).await;
    let admin = login_cookie(&app, ADMIN_EMAIL).await;
    let created = read_json(create_request(&app, ngo.clone(), &food_id).await).await;

    let rejected = review(&app, admin, created["id"].as_str().expect("id"), "reject").await;
    assert_eq!(read_json(rejected).await["status"], json!("Rejected"));

    let listings = send(&app, actix_test::TestRequest::get().uri("/api/v1/food"), ngo).await;
    let listings = read_json(listings).await;
    assert_eq!(listings[0]["id"], json!(food_id));
    assert_eq!(listings[0]["status"], json!("available"));
}

#[rstest]
#[case(UNKNOWN_ID, "approve", StatusCode::NOT_FOUND)]
#[case("nope", "approve", StatusCode::BAD_REQUEST)]
#[case(UNKNOWN_ID, "maybe", StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn review_rejects_bad_targets(
    #[case] id: &str,
    #[case] decision: &str,
    #[case] status: StatusCode,
) {
    let app = actix_test::init_service(test_app(memory_state().await)).await;
    let admin = login_cookie(&app, ADMIN_EMAIL).await;

    let response = review(&app, admin, id, decision).await;
    assert_eq!(response.status(), status);
}

#[rstest]
#[case(DONOR_EMAIL, json!({}))]
#[case(ADMIN_EMAIL, json!({"foodId": "bread", "quantity": "many"}))]
#[actix_web::test]
async fn non_ngos_are_forbidden_whatever_the_body(#[case] email: &str, #[case] body: Value) {
    let app = actix_test::init_service(test_app(memory_state().await)).await;
    let cookie = login_cookie(&app, email).await;

    let response = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/requests")
            .set_json(body),
        cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn anonymous_request_with_bad_body_is_unauthorized() {
    let app = actix_test::init_service(test_app(memory_state().await)).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/requests")
            .set_json(json!({"quantity": "ten"}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case("nope", json!({}))]
#[case(UNKNOWN_ID, json!({"decision": 7}))]
#[actix_web::test]
async fn non_admin_review_is_forbidden_before_path_or_body(
    #[case] id: &str,
    #[case] body: Value,
) {
    let app = actix_test::init_service(test_app(memory_state().await)).await;
    let ngo = login_cookie(&app, NGO_EMAIL).await;

    let response = send(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/requests/{id}/review"))
            .set_json(body),
        ngo,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn admin_review_with_mistyped_decision_is_bad_request() {
    let app = actix_test::init_service(test_app(memory_state().await)).await;
    let admin = login_cookie(&app, ADMIN_EMAIL).await;

    let response = send(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/requests/{UNKNOWN_ID}/review"))
            .set_json(json!({"decision": 7})),
        admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["code"], json!("invalid_request"));
}
