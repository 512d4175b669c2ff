use crate::dto::de_opaque_id;
use serde::Deserialize;
use serde_json::Value;

///
/// Row of the `notifications` table.
/// Columns not needed for delivery are ignored.
///
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationRecord {
    #[serde(default, deserialize_with = "de_opaque_id::deserialize_option")]
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub action_url: Option<String>,
    pub metadata: Option<Value>,
}
