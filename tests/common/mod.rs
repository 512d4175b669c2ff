#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{Algorithm, DecodingKey};
use jwt_auth::test::create_jwt;
use p256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey};
use rand::{rngs::OsRng, RngCore};
use serde_json::{json, Value};
use speaklife_push_notification::{
    application::{self, ApplicationEnv},
    service::push_service::Urgency,
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tokio::net::TcpListener;
use uuid::Uuid;

pub const JWT_ALGORITHMS: &str = "HS256";
pub const JWT_KEY: &str = "integration test secret";
pub const SERVICE_ROLE_KEY: &str = "integration service role key";
pub const MAX_HTTP_CONTENT_LEN: usize = 16 * 1024;

pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    address
}

///
/// In-memory `push_subscriptions` table behind a PostgREST-like interface
///
#[derive(Default)]
pub struct FakeSupabase {
    pub rows: Mutex<Vec<Value>>,
    pub deleted: Mutex<Vec<String>>,
    pub reads: AtomicUsize,
    pub unavailable: AtomicBool,
    /// Deleted rows stay readable, as for a read that raced ahead of cleanup
    pub stale_reads: AtomicBool,
}

impl FakeSupabase {
    pub fn insert(&self, row: Value) {
        self.rows.lock().unwrap().push(row);
    }

    pub fn ids(&self) -> Vec<String> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .map(|row| row["id"].as_str().unwrap().to_string())
            .collect()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    let bearer = format!("Bearer {SERVICE_ROLE_KEY}");

    headers.get("apikey").and_then(|value| value.to_str().ok()) == Some(SERVICE_ROLE_KEY)
        && headers.get("authorization").and_then(|value| value.to_str().ok())
            == Some(bearer.as_str())
}

fn eq_filter(query: &HashMap<String, String>, column: &str) -> String {
    query
        .get(column)
        .and_then(|value| value.strip_prefix("eq."))
        .unwrap_or_default()
        .to_string()
}

async fn find_subscriptions(
    State(supabase): State<Arc<FakeSupabase>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    supabase.reads.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if supabase.unavailable.load(Ordering::SeqCst) {
        return (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response();
    }

    let user_id = eq_filter(&query, "user_id");
    let rows = supabase
        .rows
        .lock()
        .unwrap()
        .iter()
        .filter(|row| row["user_id"] == user_id.as_str())
        .cloned()
        .collect::<Vec<_>>();

    Json(rows).into_response()
}

async fn delete_subscription(
    State(supabase): State<Arc<FakeSupabase>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> StatusCode {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED;
    }

    let id = eq_filter(&query, "id");
    if !supabase.stale_reads.load(Ordering::SeqCst) {
        supabase.rows.lock().unwrap().retain(|row| row["id"] != id);
    }
    supabase.deleted.lock().unwrap().push(id);

    StatusCode::NO_CONTENT
}

pub async fn spawn_supabase(supabase: Arc<FakeSupabase>) -> SocketAddr {
    let router = Router::new()
        .route(
            "/rest/v1/push_subscriptions",
            get(find_subscriptions).delete(delete_subscription),
        )
        .with_state(supabase);

    spawn_server(router).await
}

///
/// Push service whose answer depends on the last path segment of the endpoint
///
#[derive(Default)]
pub struct FakePushService {
    pub received: Mutex<Vec<(String, HeaderMap, Bytes)>>,
}

impl FakePushService {
    pub fn received_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

async fn receive_message(
    State(push_service): State<Arc<FakePushService>>,
    Path(behaviour): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    push_service
        .received
        .lock()
        .unwrap()
        .push((behaviour.clone(), headers, body));

    match behaviour.as_str() {
        "ok" => StatusCode::CREATED,
        "gone" => StatusCode::GONE,
        "not-found" => StatusCode::NOT_FOUND,
        "slow" => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::CREATED
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub async fn spawn_push_service(push_service: Arc<FakePushService>) -> SocketAddr {
    let router = Router::new()
        .route("/push/:behaviour", post(receive_message))
        .with_state(push_service);

    spawn_server(router).await
}

///
/// Row of a subscription with freshly generated browser keys
///
pub fn subscription_row(id: &str, user_id: &str, endpoint: String) -> Value {
    let secret_key = SecretKey::random(&mut OsRng);
    let public_key = secret_key.public_key().to_encoded_point(false);
    let mut auth_secret = [0u8; 16];
    OsRng.fill_bytes(&mut auth_secret);

    json!({
        "id": id,
        "user_id": user_id,
        "endpoint": endpoint,
        "p256dh": URL_SAFE_NO_PAD.encode(public_key.as_bytes()),
        "auth": URL_SAFE_NO_PAD.encode(auth_secret),
    })
}

pub fn generate_vapid_keys() -> (String, String) {
    let secret_key = SecretKey::random(&mut OsRng);
    let public_key = secret_key.public_key().to_encoded_point(false);

    (
        URL_SAFE_NO_PAD.encode(secret_key.to_bytes()),
        URL_SAFE_NO_PAD.encode(public_key.as_bytes()),
    )
}

pub fn create_env(supabase_address: SocketAddr, vapid_configured: bool) -> ApplicationEnv {
    let (vapid_private_key, vapid_public_key) = match vapid_configured {
        true => {
            let (private_key, public_key) = generate_vapid_keys();
            (Some(private_key), Some(public_key))
        }
        false => (None, None),
    };

    ApplicationEnv {
        log_directory: "logs".to_string(),
        log_filename: "speaklife-push-test.log".to_string(),
        bind_address: "127.0.0.1:0".parse().unwrap(),
        max_http_content_len: MAX_HTTP_CONTENT_LEN,
        jwt_algorithms: vec![Algorithm::HS256],
        jwt_key: DecodingKey::from_secret(JWT_KEY.as_bytes()),
        supabase_url: format!("http://{supabase_address}"),
        supabase_service_role_key: SERVICE_ROLE_KEY.to_string(),
        vapid_public_key,
        vapid_private_key,
        vapid_subject: "mailto:support@speaklife.app".to_string(),
        push_ttl: Duration::from_secs(86400),
        push_urgency: Urgency::Normal,
        request_timeout: Duration::from_millis(500),
    }
}

pub async fn spawn_application(env: &ApplicationEnv) -> SocketAddr {
    let application_state = application::create_state(env).await.unwrap();
    let application_middleware = application::create_middleware(env);
    let application =
        application::create_application(application_state, application_middleware);

    spawn_server(application).await
}

pub fn dispatch_url(address: SocketAddr) -> String {
    format!("http://{address}/api/v1/push-notification")
}

pub fn create_service_jwt() -> String {
    create_jwt(None, "service_role", JWT_ALGORITHMS, JWT_KEY)
}

pub fn create_user_jwt() -> String {
    let user_id = Uuid::new_v4().to_string();
    create_jwt(Some(&user_id), "authenticated", JWT_ALGORITHMS, JWT_KEY)
}

pub fn webhook(record: Value) -> Value {
    json!({
        "type": "INSERT",
        "table": "notifications",
        "schema": "public",
        "record": record,
        "old_record": null
    })
}
