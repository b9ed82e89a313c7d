pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtAuth, STAFF_ROLES};
pub use middleware::{jwt_middleware, require_staff};
