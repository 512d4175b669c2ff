//!
//! JWT authorization of service callers.
//!
//! Tokens follow the BaaS convention: a single `role` claim
//! (`service_role`, `authenticated`, `anon`) and an optional `sub`.
//!

mod dto;
pub mod error;
mod functions;
mod middleware;
pub mod util;

pub use dto::Invoker;
pub use functions::require_role::require_role;
pub use middleware::jwt_authorization_validator::JwtAuthorizationValidator;
