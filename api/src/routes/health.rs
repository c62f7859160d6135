use actix_web::{web, HttpResponse};
use tg_core::RevocationStore;
use tracing::warn;

use crate::state::AppState;

/// Health check endpoint handler
///
/// Reports 503 when the revocation store does not answer a ping within
/// `store_timeout`.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let store_status = match tokio::time::timeout(state.store_timeout, state.store.ping()).await {
        Ok(Ok(())) => "up",
        Ok(Err(e)) => {
            warn!(error = %e, "Revocation store ping failed");
            "down"
        }
        Err(_) => {
            warn!(timeout = ?state.store_timeout, "Revocation store ping timed out");
            "down"
        }
    };

    let body = serde_json::json!({
        "status": if store_status == "up" { "healthy" } else { "degraded" },
        "service": "tokengate-api",
        "version": env!("CARGO_PKG_VERSION"),
        "auth_enabled": state.is_auth_enabled(),
        "revocation_store": store_status,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if store_status == "up" {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
