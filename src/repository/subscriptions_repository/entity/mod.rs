mod push_subscription_find_entity;

pub use push_subscription_find_entity::*;
