//! Integration tests for the health endpoint

mod common;

use std::sync::Arc;
use std::time::Duration;

use actix_web::test;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tg_api::{create_app, protected_endpoints, AppState, SharedStore};
use tg_core::{AuthResult, InvalidationRecord, RevocationQuery, RevocationStore};

/// Store that accepts connections but never answers a ping
struct UnresponsiveStore;

#[async_trait]
impl RevocationStore for UnresponsiveStore {
    async fn ensure_indexes(&self) -> AuthResult<()> {
        Ok(())
    }

    async fn record(&self, _record: InvalidationRecord) -> AuthResult<()> {
        Ok(())
    }

    async fn record_consumption(&self, _record: InvalidationRecord) -> AuthResult<bool> {
        Ok(true)
    }

    async fn is_revoked(&self, _query: &RevocationQuery) -> AuthResult<bool> {
        Ok(false)
    }

    async fn purge_expired(&self, _now: DateTime<Utc>) -> AuthResult<u64> {
        Ok(0)
    }

    async fn ping(&self) -> AuthResult<()> {
        std::future::pending().await
    }
}

#[actix_web::test]
async fn test_health_reports_up_store() {
    let app = test::init_service(create_app(common::enabled_state().await)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "tokengate-api");
}

#[actix_web::test]
async fn test_unresponsive_store_degrades_health_within_timeout() {
    let store: SharedStore = Arc::new(UnresponsiveStore);
    let state = AppState::new(store, None, protected_endpoints())
        .with_store_timeout(Duration::from_millis(50));
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = tokio::time::timeout(Duration::from_secs(5), test::call_service(&app, req))
        .await
        .expect("health must answer once the store timeout elapses");
    assert_eq!(resp.status(), 503);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["revocation_store"], "down");
}
