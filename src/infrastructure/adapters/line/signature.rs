//! `X-Line-Signature` verification: base64(HMAC-SHA256(channel secret, body))

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::application::errors::TransportError;

type HmacSha256 = Hmac<Sha256>;

fn mac(channel_secret: &str, body: &[u8]) -> Result<HmacSha256, TransportError> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .map_err(|_| TransportError::Signature)?;
    mac.update(body);
    Ok(mac)
}

/// Signature the platform would send for `body`
pub fn sign(channel_secret: &str, body: &[u8]) -> Result<String, TransportError> {
    let digest = mac(channel_secret, body)?.finalize().into_bytes();
    Ok(STANDARD.encode(digest))
}

/// Check `signature` against `body` in constant time
pub fn verify(channel_secret: &str, body: &[u8], signature: &str) -> Result<(), TransportError> {
    let expected = STANDARD
        .decode(signature.trim())
        .map_err(|_| TransportError::Signature)?;

    mac(channel_secret, body)?
        .verify_slice(&expected)
        .map_err(|_| TransportError::Signature)
}
