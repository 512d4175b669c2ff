use super::{PushError, PushReceipt};
use crate::repository::PushSubscription;
use axum::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushService: Send + Sync {
    ///
    /// Encrypts payload for the subscription and hands it to its push service
    ///
    /// ### Errors
    /// - [PushError::EndpointGone] when push service answers 404 or 410
    /// - [PushError::Rejected] when push service answers other non-success status
    /// - [PushError::Network] on connection failures and timeouts
    /// - [PushError::InvalidSubscriptionKeys], [PushError::InvalidEndpoint],
    ///   [PushError::PayloadTooLarge] when message can't be built, nothing is sent then
    ///
    async fn send(
        &self,
        subscription: &PushSubscription,
        payload: &[u8],
    ) -> Result<PushReceipt, PushError>;
}
