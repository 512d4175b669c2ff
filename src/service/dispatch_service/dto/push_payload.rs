use crate::dto::input::NotificationRecord;
use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Cow;

///
/// Message shown by the service worker.
/// Serialized once per notification and shared by all subscriptions.
///
#[derive(Debug, Serialize)]
pub struct PushPayload<'a> {
    pub title: &'a str,
    pub body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
    pub metadata: Cow<'a, Value>,
}

impl<'a> From<&'a NotificationRecord> for PushPayload<'a> {
    fn from(value: &'a NotificationRecord) -> Self {
        Self {
            title: value.title.as_deref().unwrap_or_default(),
            body: value.message.as_deref().unwrap_or_default(),
            url: value.action_url.as_deref(),
            metadata: match &value.metadata {
                Some(metadata) => Cow::Borrowed(metadata),
                None => Cow::Owned(Value::Object(Map::new())),
            },
        }
    }
}
