use crate::dto::de_opaque_id;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct PushSubscriptionFindEntity {
    #[serde(deserialize_with = "de_opaque_id::deserialize")]
    pub id: String,

    #[serde(deserialize_with = "de_opaque_id::deserialize")]
    pub user_id: String,

    /// Rows written by older clients may lack any of these columns
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub p256dh: Option<String>,
    #[serde(default)]
    pub auth: Option<String>,
}
