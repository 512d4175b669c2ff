use super::{entity::PushSubscriptionFindEntity, PushSubscription, SubscriptionsRepository};
use crate::repository::{self, Error};
use axum::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};

const PUSH_SUBSCRIPTIONS: &str = "push_subscriptions";
const PUSH_SUBSCRIPTIONS_SELECT: &str = "id,user_id,endpoint,p256dh,auth";

///
/// Subscription store reached through the PostgREST interface of the database.
///
pub struct SubscriptionsRepositoryImpl {
    client: Client,
    table_url: Url,
    service_role_key: String,
}

impl SubscriptionsRepositoryImpl {
    pub fn new(client: Client, supabase_url: &str, service_role_key: &str) -> anyhow::Result<Self> {
        let table_url = format!(
            "{}/rest/v1/{PUSH_SUBSCRIPTIONS}",
            supabase_url.trim_end_matches('/')
        );
        let table_url = Url::parse(&table_url)?;
        tracing::debug!(%table_url, "subscription store");

        Ok(Self {
            client,
            table_url,
            service_role_key: service_role_key.to_string(),
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
    }

    async fn error_for_status(response: Response) -> Result<Response, Error> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::UnexpectedStatus {
            status_code: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl SubscriptionsRepository for SubscriptionsRepositoryImpl {
    async fn find_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Vec<PushSubscription>, repository::Error> {
        let request = self
            .client
            .get(self.table_url.clone())
            .query(&[
                ("user_id", format!("eq.{user_id}").as_str()),
                ("select", PUSH_SUBSCRIPTIONS_SELECT),
            ]);

        let response = self.authorized(request).send().await?;
        let response = Self::error_for_status(response).await?;

        let subscriptions = response
            .json::<Vec<PushSubscriptionFindEntity>>()
            .await?
            .into_iter()
            .map(PushSubscription::from)
            .collect();

        Ok(subscriptions)
    }

    async fn delete(&self, id: &str) -> Result<(), repository::Error> {
        let request = self
            .client
            .delete(self.table_url.clone())
            .query(&[("id", format!("eq.{id}"))]);

        let response = self.authorized(request).send().await?;
        Self::error_for_status(response).await?;

        Ok(())
    }
}
