mod dto;
mod error;
mod payload_encryption;
mod push_service;
mod vapid_signer;
mod web_push_service_impl;

pub use dto::{PushReceipt, Urgency, WebPushServiceConfig};
pub use error::*;
pub use push_service::*;
pub use vapid_signer::*;
pub use web_push_service_impl::*;
