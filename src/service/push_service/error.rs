#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// Subscription expired or was unsubscribed, it will never accept messages again
    #[error("endpoint gone with status {status_code}")]
    EndpointGone { status_code: u16 },

    #[error("push service rejected message with status {status_code}: {body}")]
    Rejected { status_code: u16, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid subscription keys: {0}")]
    InvalidSubscriptionKeys(&'static str),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("payload too large {size}/{max_size}B")]
    PayloadTooLarge { size: usize, max_size: usize },

    #[error("encryption error: {0}")]
    Encryption(&'static str),

    #[error("vapid error: {0}")]
    Vapid(#[from] jsonwebtoken::errors::Error),
}

impl PushError {
    ///
    /// HTTP status of the push service's answer, when one was received
    ///
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PushError::EndpointGone { status_code } => Some(*status_code),
            PushError::Rejected { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}
