use crate::repository::subscriptions_repository::entity::PushSubscriptionFindEntity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushSubscription {
    pub id: String,
    pub user_id: String,
    pub endpoint: Option<String>,
    /// Browser's P-256 public key, base64 encoded
    pub p256dh: Option<String>,
    /// Browser's authentication secret, base64 encoded
    pub auth: Option<String>,
}

impl From<PushSubscriptionFindEntity> for PushSubscription {
    fn from(value: PushSubscriptionFindEntity) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            endpoint: value.endpoint,
            p256dh: value.p256dh,
            auth: value.auth,
        }
    }
}
