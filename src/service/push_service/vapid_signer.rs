use super::{payload_encryption::decode_base64, PushError};
use anyhow::anyhow;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use p256::{
    elliptic_curve::sec1::ToEncodedPoint,
    pkcs8::{EncodePrivateKey, LineEnding},
    SecretKey,
};
use reqwest::Url;
use serde::Serialize;
use std::time::Duration;
use time::OffsetDateTime;

/// Push services refuse tokens valid for longer than 24h
const VAPID_TOKEN_LIFESPAN: Duration = Duration::from_secs(12 * 60 * 60);

#[derive(Serialize)]
struct VapidClaims<'a> {
    aud: &'a str,
    exp: i64,
    sub: &'a str,
}

///
/// Identifies this server to push services (RFC 8292).
///
/// Keys are parsed once at startup, every message gets its own token.
///
pub struct VapidSigner {
    encoding_key: EncodingKey,
    public_key: String,
    subject: String,
}

impl VapidSigner {
    ///
    /// ### Arguments
    /// - `private_key` raw P-256 scalar, base64 encoded
    /// - `public_key` uncompressed P-256 point, base64 encoded
    /// - `subject` contact of the operator, `mailto:` or `https:` URL
    ///
    /// ### Errors
    /// When keys are malformed or public key doesn't belong to private key
    ///
    pub fn new(private_key: &str, public_key: &str, subject: &str) -> anyhow::Result<Self> {
        let private_key = decode_base64(private_key)
            .map_err(|err| anyhow!("VAPID private key is not base64: {err}"))?;
        let secret_key = SecretKey::from_slice(&private_key)
            .map_err(|_| anyhow!("VAPID private key is not a P-256 key"))?;

        let public_key = decode_base64(public_key)
            .map_err(|err| anyhow!("VAPID public key is not base64: {err}"))?;
        let derived_public_key = secret_key.public_key().to_encoded_point(false);
        if derived_public_key.as_bytes() != public_key.as_slice() {
            anyhow::bail!("VAPID public key does not match private key");
        }

        let private_pem = secret_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|err| anyhow!("VAPID private key export failed: {err}"))?;
        let encoding_key = EncodingKey::from_ec_pem(private_pem.as_bytes())?;

        Ok(Self {
            encoding_key,
            public_key: URL_SAFE_NO_PAD.encode(public_key),
            subject: subject.to_string(),
        })
    }

    ///
    /// Builds `Authorization` header value for a message sent to the endpoint
    ///
    pub fn authorization(&self, endpoint: &Url) -> Result<String, PushError> {
        let audience = endpoint.origin().ascii_serialization();
        let expire_at = OffsetDateTime::now_utc() + VAPID_TOKEN_LIFESPAN;

        let claims = VapidClaims {
            aud: &audience,
            exp: expire_at.unix_timestamp(),
            sub: &self.subject,
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::ES256), &claims, &self.encoding_key)?;

        Ok(format!("vapid t={token}, k={}", self.public_key))
    }
}
