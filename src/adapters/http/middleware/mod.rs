pub mod identity;
pub mod request_id;

pub use identity::{AuthenticatedUser, IdentityExt, IdentityMiddleware};
pub use request_id::{RequestId, RequestIdExt, RequestIdMiddleware};
