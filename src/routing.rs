use crate::{
    application::{ApplicationMiddleware, ApplicationState},
    auth::Role,
    dto::{input, output},
    error::Error,
    service::dispatch_service::DispatchService,
};
use axum::{extract::State, routing::post, Extension, Json, Router};
use jwt_auth::{require_role, Invoker};
use std::sync::Arc;

pub fn routing(application_middleware: &ApplicationMiddleware) -> Router<ApplicationState> {
    Router::new()
        .route("/api/v1/push-notification", post(dispatch_notification))
        .route_layer(application_middleware.auth.clone())
}

async fn dispatch_notification(
    State(dispatch_service): State<Arc<dyn DispatchService>>,
    Extension(invoker): Extension<Invoker>,
    Json(webhook): Json<input::NotificationWebhook>,
) -> Result<Json<Vec<output::DeliveryOutcome>>, Error> {
    require_role(&invoker, Role::Service.as_ref())?;

    tracing::info!(
        event_type = ?webhook.event_type,
        table = ?webhook.table,
        schema = ?webhook.schema,
        "received notification webhook"
    );
    let notification = webhook.record.ok_or(Error::Validation("record missing"))?;

    let outcomes = dispatch_service.dispatch(notification).await?;

    Ok(Json(outcomes))
}
