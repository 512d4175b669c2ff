use crate::{
    dto::{input, output},
    error::Error,
};
use axum::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DispatchService: Send + Sync {
    async fn dispatch(
        &self,
        notification: input::NotificationRecord,
    ) -> Result<Vec<output::DeliveryOutcome>, Error>;
}
