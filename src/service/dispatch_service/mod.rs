mod delivery_classification;
mod dispatch_service;
mod dispatch_service_impl;
mod dto;

pub use delivery_classification::*;
pub use dispatch_service::*;
pub use dispatch_service_impl::*;
pub use dto::PushPayload;
