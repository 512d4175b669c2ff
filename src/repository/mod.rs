mod error;
mod subscriptions_repository;

pub use error::*;
pub use subscriptions_repository::*;
