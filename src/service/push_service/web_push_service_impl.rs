use super::{
    payload_encryption::{self, SubscriptionKeys},
    PushError, PushReceipt, PushService, VapidSigner, WebPushServiceConfig,
};
use crate::repository::PushSubscription;
use axum::async_trait;
use reqwest::{
    header::{AUTHORIZATION, CONTENT_ENCODING, CONTENT_TYPE},
    Client, StatusCode, Url,
};

pub struct WebPushServiceImpl {
    config: WebPushServiceConfig,
    client: Client,
    vapid_signer: VapidSigner,
}

impl WebPushServiceImpl {
    pub fn new(config: WebPushServiceConfig, client: Client, vapid_signer: VapidSigner) -> Self {
        Self {
            config,
            client,
            vapid_signer,
        }
    }

    fn parse_endpoint(endpoint: &str) -> Result<Url, PushError> {
        let url = Url::parse(endpoint).map_err(|err| PushError::InvalidEndpoint(err.to_string()))?;

        match url.scheme() {
            "https" | "http" => Ok(url),
            scheme => Err(PushError::InvalidEndpoint(format!(
                "unsupported scheme {scheme}"
            ))),
        }
    }
}

#[async_trait]
impl PushService for WebPushServiceImpl {
    async fn send(
        &self,
        subscription: &PushSubscription,
        payload: &[u8],
    ) -> Result<PushReceipt, PushError> {
        let endpoint = subscription
            .endpoint
            .as_deref()
            .ok_or_else(|| PushError::InvalidEndpoint("endpoint missing".to_string()))?;
        let endpoint = Self::parse_endpoint(endpoint)?;

        let p256dh = subscription
            .p256dh
            .as_deref()
            .ok_or(PushError::InvalidSubscriptionKeys("p256dh missing"))?;
        let auth = subscription
            .auth
            .as_deref()
            .ok_or(PushError::InvalidSubscriptionKeys("auth missing"))?;
        let keys = SubscriptionKeys::decode(p256dh, auth)?;
        let body = payload_encryption::encrypt(&keys, payload)?;
        let authorization = self.vapid_signer.authorization(&endpoint)?;

        tracing::debug!(subscription_id = %subscription.id, "sending push message");
        let response = self
            .client
            .post(endpoint)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_ENCODING, "aes128gcm")
            .header(CONTENT_TYPE, "application/octet-stream")
            .header("ttl", self.config.ttl.as_secs())
            .header("urgency", self.config.urgency.as_ref())
            .body(body)
            .send()
            .await
            // Endpoint must not end up in logs and delivery reports
            .map_err(|err| PushError::Network(err.without_url()))?;

        let status = response.status();
        let status_code = status.as_u16();
        match status {
            status if status.is_success() => Ok(PushReceipt { status_code }),
            StatusCode::NOT_FOUND | StatusCode::GONE => {
                Err(PushError::EndpointGone { status_code })
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(PushError::Rejected { status_code, body })
            }
        }
    }
}
