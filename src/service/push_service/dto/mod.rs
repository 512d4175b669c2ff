mod push_receipt;
mod urgency;
mod web_push_service_config;

pub use push_receipt::*;
pub use urgency::*;
pub use web_push_service_config::*;
