use super::{classify, DeliveryClassification, DispatchService, PushPayload};
use crate::{
    dto::{input, output},
    error::Error,
    repository::{PushSubscription, SubscriptionsRepository},
    service::push_service::PushService,
};
use axum::async_trait;
use futures::future::join_all;
use std::sync::Arc;

pub struct DispatchServiceImpl {
    repository: Arc<dyn SubscriptionsRepository>,
    /// Missing when VAPID keys were not configured
    push_service: Option<Arc<dyn PushService>>,
}

impl DispatchServiceImpl {
    pub fn new(
        repository: Arc<dyn SubscriptionsRepository>,
        push_service: Option<Arc<dyn PushService>>,
    ) -> Self {
        Self {
            repository,
            push_service,
        }
    }

    async fn deliver(
        push_service: &dyn PushService,
        subscription: &PushSubscription,
        payload: &[u8],
    ) -> DeliveryClassification {
        let classification = classify(push_service.send(subscription, payload).await);

        match &classification {
            DeliveryClassification::Delivered { status_code } => {
                tracing::debug!(subscription_id = %subscription.id, status_code, "delivered");
            }
            DeliveryClassification::Stale { status_code } => {
                tracing::info!(subscription_id = %subscription.id, status_code, "subscription stale");
            }
            DeliveryClassification::Failed {
                status_code,
                reason,
            } => {
                tracing::warn!(
                    subscription_id = %subscription.id,
                    status_code = ?status_code,
                    %reason,
                    "delivery failed"
                );
            }
        }

        classification
    }

    ///
    /// Removes subscription that push service reported as gone.
    /// Failure is only logged, subscription will be pruned on a later dispatch.
    ///
    async fn prune(&self, subscription_id: &str) {
        match self.repository.delete(subscription_id).await {
            Ok(()) => tracing::info!(subscription_id, "pruned stale subscription"),
            Err(err) => tracing::warn!(subscription_id, %err, "failed to prune stale subscription"),
        }
    }
}

#[async_trait]
impl DispatchService for DispatchServiceImpl {
    ///
    /// Sends notification to every subscription of its user and removes stale subscriptions.
    ///
    /// ### Returns
    /// One [output::DeliveryOutcome] per subscription, in the order the store listed them.
    /// Failures of single deliveries are reported there and never fail the dispatch.
    ///
    /// ### Errors
    /// - [Error::Validation] when notification has no user_id
    /// - [Error::VapidNotConfigured] when server has no VAPID keys
    /// - [Error::Database] when subscriptions can't be loaded
    ///
    #[tracing::instrument(
        name = "Dispatch",
        skip_all,
        fields(
            user_id = notification.user_id.as_deref(),
        )
    )]
    async fn dispatch(
        &self,
        notification: input::NotificationRecord,
    ) -> Result<Vec<output::DeliveryOutcome>, Error> {
        let user_id = notification
            .user_id
            .as_deref()
            .filter(|user_id| !user_id.trim().is_empty())
            .ok_or(Error::Validation("user_id missing"))?;

        let push_service = self
            .push_service
            .as_deref()
            .ok_or(Error::VapidNotConfigured)?;

        let subscriptions = self.repository.find_by_user_id(user_id).await?;
        if subscriptions.is_empty() {
            tracing::info!("no subscriptions");
            return Ok(Vec::new());
        }

        let payload = serde_json::to_vec(&PushPayload::from(&notification))
            .map_err(anyhow::Error::from)?;

        tracing::info!(subscriptions = subscriptions.len(), "dispatching notification");
        let classifications = join_all(
            subscriptions
                .iter()
                .map(|subscription| Self::deliver(push_service, subscription, &payload)),
        )
        .await;

        join_all(
            subscriptions
                .iter()
                .zip(&classifications)
                .filter(|(_, classification)| {
                    matches!(classification, DeliveryClassification::Stale { .. })
                })
                .map(|(subscription, _)| self.prune(&subscription.id)),
        )
        .await;

        let outcomes = subscriptions
            .into_iter()
            .zip(classifications)
            .map(|(subscription, classification)| classification.into_outcome(subscription.id))
            .collect::<Vec<_>>();

        let delivered = outcomes.iter().filter(|outcome| outcome.success).count();
        tracing::info!(delivered, total = outcomes.len(), "dispatched notification");

        Ok(outcomes)
    }
}
