use axum::Router;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use p256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey};
use rand::{rngs::OsRng, RngCore};
use std::net::SocketAddr;
use tokio::net::TcpListener;

///
/// Serves router on an ephemeral local port.
/// Server lives until the test runtime is dropped.
///
pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    address
}

///
/// Keys a browser creates when subscribing, together with their encoded form
///
pub struct TestSubscriptionKeys {
    pub secret_key: SecretKey,
    pub auth_secret: [u8; 16],
    pub p256dh: String,
    pub auth: String,
}

pub fn generate_subscription_keys() -> TestSubscriptionKeys {
    let secret_key = SecretKey::random(&mut OsRng);
    let public_key = secret_key.public_key().to_encoded_point(false);

    let mut auth_secret = [0u8; 16];
    OsRng.fill_bytes(&mut auth_secret);

    TestSubscriptionKeys {
        p256dh: URL_SAFE_NO_PAD.encode(public_key.as_bytes()),
        auth: URL_SAFE_NO_PAD.encode(auth_secret),
        secret_key,
        auth_secret,
    }
}

///
/// Returns `(private_key, public_key)` encoded the way VAPID keys are distributed
///
pub fn generate_vapid_keys() -> (String, String) {
    let secret_key = SecretKey::random(&mut OsRng);
    let public_key = secret_key.public_key().to_encoded_point(false);

    (
        URL_SAFE_NO_PAD.encode(secret_key.to_bytes()),
        URL_SAFE_NO_PAD.encode(public_key.as_bytes()),
    )
}
