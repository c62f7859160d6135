//! Integration tests for the JwtAuth and error handling stages

mod common;

use actix_web::{http::header, test};
use serde_json::Value;
use tg_api::create_app;

use common::{bearer, disabled_state, enabled_state, login_request};

#[actix_web::test]
async fn test_protected_endpoint_without_header() {
    let app = test::init_service(create_app(enabled_state().await)).await;

    let req = test::TestRequest::get().uri("/api/v1/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHENTICATED");
    assert_eq!(body["details"]["reason"], "unauthorized");
    assert_eq!(body["message"], "authorization header is missing");
}

#[actix_web::test]
async fn test_protected_endpoint_with_malformed_header() {
    let app = test::init_service(create_app(enabled_state().await)).await;

    for value in ["Token abc", "bearer abc", "Bearer", "Bearer ", "Bearer a b"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .insert_header((header::AUTHORIZATION, value))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401, "header {value:?} should be rejected");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["details"]["reason"], "unauthorized");
    }
}

#[actix_web::test]
async fn test_refresh_token_cannot_authorize() {
    let app = test::init_service(create_app(enabled_state().await)).await;
    let tokens: Value = test::call_and_read_body_json(&app, login_request("phone").to_request()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(bearer(&tokens["refresh_token"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["details"]["reason"], "wrong_token_type");
}

#[actix_web::test]
async fn test_token_from_another_key_is_malformed() {
    let app = test::init_service(create_app(enabled_state().await)).await;
    let other = test::init_service(create_app(enabled_state().await)).await;
    let tokens: Value = test::call_and_read_body_json(&other, login_request("phone").to_request()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(bearer(&tokens["access_token"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["details"]["reason"], "token_malformed");
}

#[actix_web::test]
async fn test_public_endpoints_ignore_bad_header() {
    let app = test::init_service(create_app(enabled_state().await)).await;

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header((header::AUTHORIZATION, "garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = login_request("phone")
        .insert_header((header::AUTHORIZATION, "garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_rejected_call_never_reaches_handler() {
    let app = test::init_service(create_app(enabled_state().await)).await;
    let tokens: Value = test::call_and_read_body_json(&app, login_request("phone").to_request()).await;

    // A logout rejected at the gate must not revoke anything
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(bearer(&tokens["access_token"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_error_responses_carry_request_id() {
    let app = test::init_service(create_app(enabled_state().await)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(("x-request-id", "trace-7"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "trace-7");
}

#[actix_web::test]
async fn test_disabled_auth_mounts_no_auth_routes() {
    let app = test::init_service(create_app(disabled_state())).await;

    let req = test::TestRequest::get().uri("/api/v1/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let resp = test::call_service(&app, login_request("phone").to_request()).await;
    assert_eq!(resp.status(), 404);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["auth_enabled"], false);
}

#[actix_web::test]
async fn test_successful_response_carries_request_id() {
    let app = test::init_service(create_app(enabled_state().await)).await;

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("x-request-id", "trace-8"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "trace-8");

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert!(resp.headers().contains_key("x-request-id"));
}

#[actix_web::test]
async fn test_percent_encoded_path_is_gated_like_the_route() {
    let app = test::init_service(create_app(enabled_state().await)).await;
    let tokens: Value = test::call_and_read_body_json(&app, login_request("phone").to_request()).await;

    // "%6De" routes to /api/v1/me
    let req = test::TestRequest::get()
        .uri("/api/v1/%6De")
        .insert_header(bearer(&tokens["access_token"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let me: Value = test::read_body_json(resp).await;
    assert_eq!(me["subject_id"], common::SUBJECT);

    let req = test::TestRequest::get().uri("/api/v1/%6De").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "authorization header is missing");
}
