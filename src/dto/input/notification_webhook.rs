use super::NotificationRecord;
use serde::Deserialize;

///
/// Envelope sent by the database webhook on table changes.
/// Only the new row is used.
///
#[derive(Debug, Deserialize)]
pub struct NotificationWebhook {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub table: Option<String>,
    pub schema: Option<String>,
    pub record: Option<NotificationRecord>,
}
