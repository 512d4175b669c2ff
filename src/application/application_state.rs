use super::ApplicationEnv;
use crate::{
    repository::SubscriptionsRepositoryImpl,
    service::{
        dispatch_service::{DispatchService, DispatchServiceImpl},
        push_service::{PushService, VapidSigner, WebPushServiceConfig, WebPushServiceImpl},
    },
};
use axum::extract::FromRef;
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone, FromRef)]
pub struct ApplicationState {
    pub dispatch_service: Arc<dyn DispatchService>,
}

pub async fn create_state(env: &ApplicationEnv) -> anyhow::Result<ApplicationState> {
    tracing::info!("creating http client");
    let http_client = Client::builder().timeout(env.request_timeout).build()?;

    tracing::info!("creating repositories");
    let subscriptions_repository = SubscriptionsRepositoryImpl::new(
        http_client.clone(),
        &env.supabase_url,
        &env.supabase_service_role_key,
    )?;
    let subscriptions_repository = Arc::new(subscriptions_repository);

    tracing::info!("creating services");
    let push_service = match (&env.vapid_public_key, &env.vapid_private_key) {
        (Some(public_key), Some(private_key)) => {
            let vapid_signer = VapidSigner::new(private_key, public_key, &env.vapid_subject)?;
            let config = WebPushServiceConfig {
                ttl: env.push_ttl,
                urgency: env.push_urgency,
            };
            let push_service = WebPushServiceImpl::new(config, http_client, vapid_signer);
            Some(Arc::new(push_service) as Arc<dyn PushService>)
        }
        _ => {
            tracing::warn!("VAPID keys not configured, notifications will not be dispatched");
            None
        }
    };

    let dispatch_service = DispatchServiceImpl::new(subscriptions_repository, push_service);
    let dispatch_service = Arc::new(dispatch_service);

    Ok(ApplicationState { dispatch_service })
}
