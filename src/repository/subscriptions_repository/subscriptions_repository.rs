use super::PushSubscription;
use crate::repository;
use axum::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionsRepository: Send + Sync {
    /// Subscriptions are returned in the order the store lists them
    async fn find_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Vec<PushSubscription>, repository::Error>;

    /// Deleting a subscription that no longer exists is not an error
    async fn delete(&self, id: &str) -> Result<(), repository::Error>;
}
