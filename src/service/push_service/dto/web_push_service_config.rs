use super::Urgency;
use std::time::Duration;

pub struct WebPushServiceConfig {
    /// How long push service keeps the message for an offline device
    pub ttl: Duration,
    pub urgency: Urgency,
}
