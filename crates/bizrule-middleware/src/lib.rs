pub mod auth;

pub use auth::{jwt_middleware, require_staff, Claims, JwtAuth, STAFF_ROLES};
