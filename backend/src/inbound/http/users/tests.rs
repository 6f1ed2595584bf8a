//! Handler tests for the user endpoints.
//!
//! Error statuses asserted here follow the per-code mapping (400/404/409/500),
//! not a uniform 500.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};

use crate::api::Api;
use crate::config::AppInfoConfig;
use crate::domain::ports::{DisabledCompletionSource, MockUserAccounts, NoOpUserCache};
use crate::domain::{Error, UserService};
use crate::inbound::http::configure_api;
use crate::outbound::persistence::InMemoryUserRepository;

fn in_memory_api() -> Api {
    let service = UserService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(NoOpUserCache),
        Arc::new(DefaultClock),
    );
    Api::new(
        Arc::new(service),
        Arc::new(DisabledCompletionSource),
        AppInfoConfig::default(),
        Arc::new(DefaultClock),
    )
}

macro_rules! init_app {
    ($api:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($api))
                .service(web::scope("/api/v1").configure(configure_api)),
        )
        .await
    };
}

fn create_request(body: Value) -> actix_web::test::TestRequest {
    test::TestRequest::post().uri("/api/v1/users").set_json(body)
}

#[rstest]
#[actix_web::test]
async fn create_then_read_returns_identical_record() {
    let app = init_app!(in_memory_api());
    let payload = json!({ "firstName": "A", "lastName": "B", "mobile": "123", "email": "a@b.com" });

    let res = test::call_service(&app, create_request(payload).to_request()).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(res).await;
    assert_eq!(created["firstName"], json!("A"));
    assert_eq!(created["email"], json!("a@b.com"));
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users?email=a@b.com")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let read: Value = test::read_body_json(res).await;
    assert_eq!(read, created);
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_409() {
    let app = init_app!(in_memory_api());
    let payload = json!({ "email": "a@b.com" });

    let first = test::call_service(&app, create_request(payload.clone()).to_request()).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let second = test::call_service(&app, create_request(payload).to_request()).await;

    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(second).await;
    assert_eq!(body["code"], json!("conflict"));
    assert_eq!(body["details"]["code"], json!("duplicate_email"));
}

#[rstest]
#[actix_web::test]
async fn invalid_email_is_400() {
    let app = init_app!(in_memory_api());

    let res = test::call_service(&app, create_request(json!({ "email": "a@b@c" })).to_request())
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["details"], json!({ "field": "email", "code": "invalid_email" }));
}

#[rstest]
#[actix_web::test]
async fn unknown_email_is_404() {
    let app = init_app!(in_memory_api());

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users?email=missing@x.com")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], json!("not_found"));
    assert_eq!(body["message"], json!("email 'missing@x.com' not found"));
}

#[rstest]
#[case("/api/v1/users")]
#[case("/api/v1/users?mail=a@b.com")]
#[actix_web::test]
async fn missing_email_parameter_is_400(#[case] uri: &str) {
    let app = init_app!(in_memory_api());

    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], json!("invalid_request"));
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_400() {
    let app = init_app!(in_memory_api());
    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();

    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], json!("invalid_request"));
}

#[rstest]
#[actix_web::test]
async fn internal_failure_is_500_and_redacted() {
    let mut users = MockUserAccounts::new();
    users
        .expect_read_by_email()
        .times(1)
        .returning(|_| Err(Error::internal("pool timed out")));
    let api = Api::new(
        Arc::new(users),
        Arc::new(DisabledCompletionSource),
        AppInfoConfig::default(),
        Arc::new(DefaultClock),
    );
    let app = init_app!(api);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users?email=a@b.com")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], json!("Internal server error"));
    assert!(body.get("details").is_none());
}

#[rstest]
#[actix_web::test]
async fn app_info_and_paragraph_routes_are_mounted() {
    let app = init_app!(in_memory_api());

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/health").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let info: Value = test::read_body_json(res).await;
    assert_eq!(info["status"], json!("all systems up and running"));

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/paragraphs/rust")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(test::read_body(res).await.is_empty());
}
