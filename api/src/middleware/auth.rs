//! Bearer-token authentication middleware.
//!
//! Adapts [`AuthorizationGate`] to actix-web: every request's routing path (the
//! percent-decoded form the router matches on) is looked up in the
//! protected-endpoint registry, and protected requests must carry a
//! valid, unrevoked access token. On success an [`AuthContext`] is inserted
//! into the request extensions for handlers to extract. A rejected request is
//! answered before it reaches the handler: 401, or 503 when the revocation
//! store is unreachable.

use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{AUTHORIZATION, USER_AGENT},
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use tg_core::{AuthError, AuthorizationGate, DEFAULT_DEVICE_ID};

use crate::handlers::ApiError;
use crate::state::SharedStore;

/// Header carrying an explicit client device identifier
pub const DEVICE_ID_HEADER: &str = "x-device-id";

/// Caller identity injected into authenticated requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub subject_id: String,
    pub device_id: String,
}

/// Device identifier for a request: `x-device-id`, else `user-agent`, else `"default"`
pub fn derive_device_id(req: &HttpRequest) -> String {
    [DEVICE_ID_HEADER, USER_AGENT.as_str()]
        .iter()
        .filter_map(|name| req.headers().get(*name))
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(DEFAULT_DEVICE_ID)
        .to_string()
}

/// Authentication middleware factory
pub struct JwtAuth {
    gate: AuthorizationGate<SharedStore>,
}

impl JwtAuth {
    pub fn new(gate: AuthorizationGate<SharedStore>) -> Self {
        Self { gate }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            gate: self.gate.clone(),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    gate: AuthorizationGate<SharedStore>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let gate = self.gate.clone();

        Box::pin(async move {
            let endpoint = req.match_info().as_str().to_string();
            let header = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);

            match gate.authorize(&endpoint, move || header).await {
                Ok(Some(identity)) => {
                    let device_id = identity
                        .device_id
                        .unwrap_or_else(|| derive_device_id(req.request()));
                    req.extensions_mut().insert(AuthContext {
                        subject_id: identity.subject_id,
                        device_id,
                    });
                }
                Ok(None) => {}
                Err(e) => {
                    let response = ApiError::from(e).error_response();
                    return Ok(req.into_response(response).map_into_right_body());
                }
            }

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthContext>()
                .cloned()
                .ok_or_else(|| ApiError::from(AuthError::unauthorized())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_device_header_wins_over_user_agent() {
        let req = TestRequest::default()
            .insert_header((DEVICE_ID_HEADER, "phone-1"))
            .insert_header((USER_AGENT, "curl/8.0"))
            .to_http_request();

        assert_eq!(derive_device_id(&req), "phone-1");
    }

    #[test]
    fn test_user_agent_fallback() {
        let req = TestRequest::default()
            .insert_header((USER_AGENT, "curl/8.0"))
            .to_http_request();

        assert_eq!(derive_device_id(&req), "curl/8.0");
    }

    #[test]
    fn test_blank_headers_fall_back_to_default() {
        let req = TestRequest::default()
            .insert_header((DEVICE_ID_HEADER, "  "))
            .to_http_request();

        assert_eq!(derive_device_id(&req), DEFAULT_DEVICE_ID);
    }

    #[actix_web::test]
    async fn test_auth_context_extraction() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(AuthContext {
            subject_id: "user-1".to_string(),
            device_id: "phone".to_string(),
        });

        let context = AuthContext::extract(&req).await.unwrap();
        assert_eq!(context.subject_id, "user-1");
        assert_eq!(context.device_id, "phone");
    }

    #[actix_web::test]
    async fn test_missing_auth_context_is_unauthorized() {
        let req = TestRequest::default().to_http_request();

        let error = AuthContext::extract(&req).await.unwrap_err();
        assert_eq!(error.kind(), tg_core::ErrorKind::Unauthorized);
    }
}
