//! Request signing for the marketplace API.
//!
//! Each request carries an HMAC-SHA256 signature over
//! `method + path + body + timestamp` (timestamp in milliseconds),
//! transmitted as `{timestamp}:{hex_digest}` alongside the public key.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid secret key: {0}")]
    InvalidKey(String),
}

/// Compute the request signature header value.
///
/// `path` must include the query string, exactly as sent on the wire.
/// `body` is the raw request body, or the empty string for GET requests.
pub fn sign_request(
    secret_key: &str,
    method: &str,
    path: &str,
    body: &str,
    timestamp_ms: i64,
) -> Result<String, AuthError> {
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .map_err(|e| AuthError::InvalidKey(e.to_string()))?;
    mac.update(format!("{method}{path}{body}{timestamp_ms}").as_bytes());
    let digest = hex::encode(mac.finalize().into_bytes());
    Ok(format!("{timestamp_ms}:{digest}"))
}
