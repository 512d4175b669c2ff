mod dto;
mod entity;
mod subscriptions_repository;
mod subscriptions_repository_impl;

pub use dto::PushSubscription;
pub use subscriptions_repository::*;
pub use subscriptions_repository_impl::*;
