//! Authentication middleware and the caller identity extractor.

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError,
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
    web,
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;

use quill_core::ports::AuthError;
use quill_shared::ErrorResponse;

use crate::middleware::error::AppError;
use crate::observability::request_id_of;
use crate::state::AppState;

/// The authenticated caller's user id.
///
/// Put there by [`Authenticate`]; use it in handlers of protected scopes:
/// ```ignore
/// async fn protected_route(caller: CallerId) -> impl Responder {
///     format!("Hello, user {}!", caller.0)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerId(pub i64);

impl FromRequest for CallerId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let caller = req.extensions().get::<CallerId>().copied();
        ready(caller.ok_or_else(|| AppError::Internal("user id not found".to_string())))
    }
}

fn bearer_token(req: &ServiceRequest) -> Result<&str, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

fn rejection(err: &AuthError, request_id: Option<String>) -> HttpResponse {
    let error = match err {
        AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
            .with_detail("Your authentication token has expired. Please sign in again."),
        AuthError::InvalidToken(msg) => {
            ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
        }
        AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
            .with_detail("Please provide a valid Bearer token in the Authorization header."),
        other => ErrorResponse::unauthorized().with_detail(other.to_string()),
    };
    let error = match request_id {
        Some(id) => error.with_request_id(id),
        None => error,
    };

    HttpResponse::Unauthorized().json(error)
}

/// Validates the bearer token and stores [`CallerId`] in the request extensions.
/// Requests without a valid token are answered with 401 and never reach the handler.
pub struct Authenticate;

impl<S, B> Transform<S, ServiceRequest> for Authenticate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthenticateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticateService { service }))
    }
}

pub struct AuthenticateService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthenticateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let claims = match req.app_data::<web::Data<AppState>>() {
            Some(state) => bearer_token(&req).and_then(|t| state.tokens.validate_token(t)),
            None => {
                tracing::error!("AppState not found in app data");
                let error = AppError::Internal("user id not found".to_string());
                let (http_req, _payload) = req.into_parts();
                let srv_response = ServiceResponse::new(http_req, error.error_response());
                return Box::pin(async move { Ok(srv_response.map_into_right_body()) });
            }
        };

        match claims {
            Ok(claims) => {
                req.extensions_mut().insert(CallerId(claims.user_id));

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(err) => {
                tracing::debug!(error = %err, "Rejected unauthenticated request");

                let response = rejection(&err, request_id_of(&req));
                let (http_req, _payload) = req.into_parts();
                let srv_response = ServiceResponse::new(http_req, response);

                Box::pin(async move { Ok(srv_response.map_into_right_body()) })
            }
        }
    }
}
