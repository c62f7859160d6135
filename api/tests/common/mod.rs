//! Shared fixtures for the api integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{http::header, test};
use serde_json::json;
use tg_api::{protected_endpoints, AppState, SharedStore, SharedVerifier};
use tg_core::{
    testutil, AuthService, InMemoryCredentialVerifier, InMemoryRevocationStore, TokenService,
    TokenServiceConfig,
};

pub const EMAIL: &str = "alice@example.com";
pub const PASSWORD: &str = "correct horse battery staple";
pub const SUBJECT: &str = "user-1";

/// State backed by in-memory stores with one registered user
pub async fn enabled_state() -> AppState {
    let verifier = InMemoryCredentialVerifier::with_cost(4);
    verifier.add_user(EMAIL, SUBJECT, PASSWORD).await.unwrap();

    let store: SharedStore = Arc::new(InMemoryRevocationStore::new());
    let tokens = TokenService::new(
        testutil::key_manager(),
        Arc::clone(&store),
        TokenServiceConfig::default(),
    );
    let verifier: SharedVerifier = Arc::new(verifier);
    let auth = AuthService::new(verifier, Arc::new(tokens));

    AppState::new(store, Some(Arc::new(auth)), protected_endpoints())
}

/// State with authentication turned off
pub fn disabled_state() -> AppState {
    let store: SharedStore = Arc::new(InMemoryRevocationStore::new());
    AppState::new(store, None, protected_endpoints())
}

/// Login request for the registered user from `device`
pub fn login_request(device: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("x-device-id", device))
        .set_json(json!({ "email": EMAIL, "password": PASSWORD }))
}

pub fn bearer(token: &serde_json::Value) -> (header::HeaderName, String) {
    let token = token.as_str().expect("token is a string");
    (header::AUTHORIZATION, format!("Bearer {token}"))
}
