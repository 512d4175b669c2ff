mod notification_record;
mod notification_webhook;

pub use notification_record::*;
pub use notification_webhook::*;
