//! Authentication middleware
//!
//! Verifies the bearer token on every non-public route and deposits the
//! authenticated user id into request extensions for handlers.

use crate::server::middleware::helpers::{extract_bearer_token, is_public_route};
use crate::server::state::AppState;
use crate::utils::error::ForgeError;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpMessage, HttpRequest, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, warn};
use uuid::Uuid;

/// The authenticated account behind a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub Uuid);

/// Auth middleware for Actix-web
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

/// Service implementation for auth middleware
pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.path().to_string();

        if is_public_route(&path) {
            return Box::pin(self.service.call(req));
        }

        let token = extract_bearer_token(req.headers());
        let app_state = req.app_data::<web::Data<AppState>>().cloned();

        let claims = match (app_state, token) {
            (Some(state), Some(token)) => match state.auth.verify(&token) {
                Ok(claims) => {
                    debug!("JWT validated for user: {}", claims.sub);
                    claims
                }
                Err(e) => {
                    warn!("JWT validation failed for {}: {}", path, e);
                    return Box::pin(async move {
                        Err(ForgeError::unauthorized("Invalid or expired token").into())
                    });
                }
            },
            (_, None) => {
                debug!("No bearer token for protected route: {}", path);
                return Box::pin(async move {
                    Err(ForgeError::unauthorized("Authentication required").into())
                });
            }
            (None, _) => {
                return Box::pin(async move {
                    Err(ForgeError::internal("Application state missing").into())
                });
            }
        };

        req.extensions_mut().insert(AuthenticatedUser(claims.sub));

        Box::pin(self.service.call(req))
    }
}

/// Extract the authenticated user id deposited by the middleware
pub fn authenticated_user(req: &HttpRequest) -> Result<Uuid, ForgeError> {
    req.extensions()
        .get::<AuthenticatedUser>()
        .map(|user| user.0)
        .ok_or_else(|| ForgeError::unauthorized("Authentication required"))
}
