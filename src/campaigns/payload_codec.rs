use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Serialize;

/// Encodes payloads into tokens that can be embedded verbatim into a single-line shell command.
/// Tokens are standard base64 over the compact JSON serialization of the payload, so they only
/// contain `[A-Za-z0-9+/=]`: no whitespace, quotes or shell metacharacters. The fired job
/// reverses the encoding with `base64 -d`.
pub struct PayloadCodec;

impl PayloadCodec {
    /// Encodes the payload. Fails only if the payload cannot be represented as JSON.
    pub fn encode<T: Serialize>(payload: &T) -> Result<String, serde_json::Error> {
        Ok(STANDARD.encode(serde_json::to_vec(payload)?))
    }

    /// Decodes the token produced by [`PayloadCodec::encode`] back into a JSON value.
    #[cfg(test)]
    pub fn decode(token: &str) -> anyhow::Result<serde_json::Value> {
        Ok(serde_json::from_slice(&STANDARD.decode(token)?)?)
    }
}
