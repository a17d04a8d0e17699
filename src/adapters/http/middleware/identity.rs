use actix_web::{
  Error, HttpMessage,
  body::MessageBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  http::header::HeaderName,
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
};
use uuid::Uuid;

/// Id of the caller as asserted by the upstream authentication layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub Uuid);

impl AuthenticatedUser {
  pub fn id(&self) -> Uuid {
    self.0
  }
}

/// Attaches [`AuthenticatedUser`] to requests that carry a trusted identity header
///
/// Authentication terminates upstream: this service only trusts the configured
/// header and never rejects a request itself. A missing or malformed value
/// leaves the request anonymous, and handlers that need an actor answer 401.
#[derive(Debug, Clone)]
pub struct IdentityMiddleware {
  header: HeaderName,
}

impl IdentityMiddleware {
  /// # Errors
  ///
  /// Returns an error if `header` is not a valid HTTP header name
  pub fn new(header: &str) -> Result<Self, actix_web::http::header::InvalidHeaderName> {
    Ok(Self {
      header: HeaderName::from_bytes(header.as_bytes())?,
    })
  }
}

impl<S, B> Transform<S, ServiceRequest> for IdentityMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Transform = IdentityMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(IdentityMiddlewareService {
      service: Rc::new(service),
      header: self.header.clone(),
    }))
  }
}

pub struct IdentityMiddlewareService<S> {
  service: Rc<S>,
  header: HeaderName,
}

impl<S, B> Service<ServiceRequest> for IdentityMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let identity = extract_identity(&req, &self.header);

    Box::pin(async move {
      if let Some(user) = identity {
        req.extensions_mut().insert(user);
      }
      service.call(req).await
    })
  }
}

fn extract_identity(req: &ServiceRequest, header: &HeaderName) -> Option<AuthenticatedUser> {
  let raw = req.headers().get(header)?;
  let parsed = raw
    .to_str()
    .ok()
    .and_then(|s| Uuid::parse_str(s.trim()).ok());

  if parsed.is_none() {
    tracing::debug!(header = %header, path = %req.path(), "Ignoring malformed identity header");
  }
  parsed.map(AuthenticatedUser)
}

/// Extension trait to read the caller identity from a request
pub trait IdentityExt {
  fn authenticated_user(&self) -> Option<AuthenticatedUser>;
}

impl IdentityExt for actix_web::HttpRequest {
  fn authenticated_user(&self) -> Option<AuthenticatedUser> {
    self.extensions().get::<AuthenticatedUser>().copied()
  }
}
