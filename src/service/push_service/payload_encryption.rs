//!
//! Message encryption for Web Push (RFC 8291) using
//! the `aes128gcm` content coding (RFC 8188).
//!
//! Every message is a single record:
//! `salt(16) | rs(4) | idlen(1) | sender public key(65) | ciphertext`
//!

use super::PushError;
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes128Gcm, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hkdf::Hkdf;
use p256::{ecdh::EphemeralSecret, elliptic_curve::sec1::ToEncodedPoint, PublicKey};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;

pub const RECORD_SIZE: u32 = 4096;

const SALT_LEN: usize = 16;
const AUTH_SECRET_LEN: usize = 16;
const PUBLIC_KEY_LEN: usize = 65;
const TAG_LEN: usize = 16;
const HEADER_LEN: usize = SALT_LEN + 4 + 1 + PUBLIC_KEY_LEN;
const PADDING_DELIMITER: u8 = 0x02;

/// Largest payload that still fits into a single record
pub const MAX_PAYLOAD_LEN: usize = RECORD_SIZE as usize - HEADER_LEN - TAG_LEN - 1;

const KEY_INFO_PREFIX: &[u8] = b"WebPush: info\0";
const CEK_INFO: &[u8] = b"Content-Encoding: aes128gcm\0";
const NONCE_INFO: &[u8] = b"Content-Encoding: nonce\0";

///
/// Decoded key material of a browser subscription
///
pub struct SubscriptionKeys {
    public_key: PublicKey,
    auth_secret: [u8; AUTH_SECRET_LEN],
}

impl SubscriptionKeys {
    ///
    /// ### Errors
    /// - [PushError::InvalidSubscriptionKeys] when
    ///     - any key isn't base64
    ///     - `p256dh` isn't an uncompressed P-256 point
    ///     - `auth` isn't 16 bytes long
    ///
    pub fn decode(p256dh: &str, auth: &str) -> Result<Self, PushError> {
        let public_key = decode_base64(p256dh)
            .map_err(|_| PushError::InvalidSubscriptionKeys("p256dh is not base64"))?;
        if public_key.len() != PUBLIC_KEY_LEN {
            return Err(PushError::InvalidSubscriptionKeys(
                "p256dh is not an uncompressed point",
            ));
        }
        let public_key = PublicKey::from_sec1_bytes(&public_key)
            .map_err(|_| PushError::InvalidSubscriptionKeys("p256dh is not a P-256 point"))?;

        let auth_secret = decode_base64(auth)
            .map_err(|_| PushError::InvalidSubscriptionKeys("auth is not base64"))?
            .try_into()
            .map_err(|_| PushError::InvalidSubscriptionKeys("auth must be 16 bytes"))?;

        Ok(Self {
            public_key,
            auth_secret,
        })
    }
}

///
/// Decodes key material stored either as base64url or standard base64,
/// with or without padding
///
pub fn decode_base64(value: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let normalized = value
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect::<String>();

    URL_SAFE_NO_PAD.decode(normalized)
}

///
/// Encrypts payload for the subscription with a fresh ephemeral key and salt
///
/// ### Errors
/// - [PushError::PayloadTooLarge] when payload exceeds [MAX_PAYLOAD_LEN]
///
pub fn encrypt(keys: &SubscriptionKeys, payload: &[u8]) -> Result<Vec<u8>, PushError> {
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(PushError::PayloadTooLarge {
            size: payload.len(),
            max_size: MAX_PAYLOAD_LEN,
        });
    }

    let sender_secret = EphemeralSecret::random(&mut OsRng);
    let sender_public = sender_secret.public_key().to_encoded_point(false);
    let receiver_public = keys.public_key.to_encoded_point(false);
    let shared_secret = sender_secret.diffie_hellman(&keys.public_key);

    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let (cek, nonce) = derive_content_keys(
        shared_secret.raw_secret_bytes().as_slice(),
        &keys.auth_secret,
        receiver_public.as_bytes(),
        sender_public.as_bytes(),
        &salt,
    )?;
    let ciphertext = seal(&cek, &nonce, payload)?;

    let mut body = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    body.extend_from_slice(&salt);
    body.extend_from_slice(&RECORD_SIZE.to_be_bytes());
    body.push(PUBLIC_KEY_LEN as u8);
    body.extend_from_slice(sender_public.as_bytes());
    body.extend_from_slice(&ciphertext);

    Ok(body)
}

///
/// Derives content encryption key and nonce shared by sender and receiver
///
fn derive_content_keys(
    shared_secret: &[u8],
    auth_secret: &[u8],
    receiver_public: &[u8],
    sender_public: &[u8],
    salt: &[u8],
) -> Result<([u8; 16], [u8; 12]), PushError> {
    let mut key_info =
        Vec::with_capacity(KEY_INFO_PREFIX.len() + receiver_public.len() + sender_public.len());
    key_info.extend_from_slice(KEY_INFO_PREFIX);
    key_info.extend_from_slice(receiver_public);
    key_info.extend_from_slice(sender_public);

    let mut ikm = [0u8; 32];
    Hkdf::<Sha256>::new(Some(auth_secret), shared_secret)
        .expand(&key_info, &mut ikm)
        .map_err(|_| PushError::Encryption("input keying material derivation failed"))?;

    let hkdf = Hkdf::<Sha256>::new(Some(salt), &ikm);

    let mut cek = [0u8; 16];
    hkdf.expand(CEK_INFO, &mut cek)
        .map_err(|_| PushError::Encryption("content encryption key derivation failed"))?;

    let mut nonce = [0u8; 12];
    hkdf.expand(NONCE_INFO, &mut nonce)
        .map_err(|_| PushError::Encryption("nonce derivation failed"))?;

    Ok((cek, nonce))
}

fn seal(cek: &[u8; 16], nonce: &[u8; 12], payload: &[u8]) -> Result<Vec<u8>, PushError> {
    let cipher = Aes128Gcm::new_from_slice(cek)
        .map_err(|_| PushError::Encryption("invalid content encryption key"))?;

    let mut plaintext = Vec::with_capacity(payload.len() + 1);
    plaintext.extend_from_slice(payload);
    plaintext.push(PADDING_DELIMITER);

    cipher
        .encrypt(Nonce::from_slice(nonce), plaintext.as_slice())
        .map_err(|_| PushError::Encryption("payload encryption failed"))
}

///
/// Reverses [encrypt] the way a browser does, using the subscription's private key
///
#[cfg(test)]
pub fn decrypt(keys: &crate::test_utils::TestSubscriptionKeys, body: &[u8]) -> Vec<u8> {
    let salt = &body[..SALT_LEN];
    let record_size = u32::from_be_bytes(body[SALT_LEN..SALT_LEN + 4].try_into().unwrap());
    let key_id_len = body[SALT_LEN + 4] as usize;
    let sender_public = &body[HEADER_LEN - PUBLIC_KEY_LEN..HEADER_LEN - PUBLIC_KEY_LEN + key_id_len];
    let ciphertext = &body[HEADER_LEN - PUBLIC_KEY_LEN + key_id_len..];

    assert_eq!(record_size, RECORD_SIZE);
    assert_eq!(key_id_len, PUBLIC_KEY_LEN);

    let sender_public_key = PublicKey::from_sec1_bytes(sender_public).unwrap();
    let shared_secret = p256::ecdh::diffie_hellman(
        keys.secret_key.to_nonzero_scalar(),
        sender_public_key.as_affine(),
    );
    let receiver_public = keys.secret_key.public_key().to_encoded_point(false);

    let (cek, nonce) = derive_content_keys(
        shared_secret.raw_secret_bytes().as_slice(),
        &keys.auth_secret,
        receiver_public.as_bytes(),
        sender_public,
        salt,
    )
    .unwrap();

    let mut plaintext = Aes128Gcm::new_from_slice(&cek)
        .unwrap()
        .decrypt(Nonce::from_slice(&nonce), ciphertext)
        .unwrap();
    assert_eq!(plaintext.pop(), Some(PADDING_DELIMITER));

    plaintext
}
