use crate::{
    dto::output::{DeliveryOutcome, STALE_REASON},
    service::push_service::{PushError, PushReceipt},
};

#[derive(Debug, PartialEq, Eq)]
pub enum DeliveryClassification {
    Delivered {
        status_code: u16,
    },
    /// Subscription will never accept messages again and should be removed
    Stale {
        status_code: u16,
    },
    Failed {
        status_code: Option<u16>,
        reason: String,
    },
}

///
/// Maps result of a single send to its delivery class.
/// Only 404 and 410 answers mark subscription as stale.
///
pub fn classify(result: Result<PushReceipt, PushError>) -> DeliveryClassification {
    match result {
        Ok(PushReceipt { status_code }) => DeliveryClassification::Delivered { status_code },
        Err(PushError::EndpointGone { status_code }) => {
            DeliveryClassification::Stale { status_code }
        }
        Err(err) => DeliveryClassification::Failed {
            status_code: err.status_code(),
            reason: err.to_string(),
        },
    }
}

impl DeliveryClassification {
    pub fn into_outcome(self, subscription_id: String) -> DeliveryOutcome {
        match self {
            DeliveryClassification::Delivered { status_code } => DeliveryOutcome {
                subscription_id,
                success: true,
                reason: None,
                status_code: Some(status_code),
            },
            DeliveryClassification::Stale { status_code } => DeliveryOutcome {
                subscription_id,
                success: false,
                reason: Some(STALE_REASON.to_string()),
                status_code: Some(status_code),
            },
            DeliveryClassification::Failed {
                status_code,
                reason,
            } => DeliveryOutcome {
                subscription_id,
                success: false,
                reason: Some(reason),
                status_code,
            },
        }
    }
}
