//! Data-URI encode/decode for the captured image payload.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

/// Why a payload could not be decoded.
#[derive(Debug, Error)]
pub enum DataUrlError {
    #[error("payload is not a data URI")]
    NotADataUrl,
    #[error("data URI has no payload separator")]
    MissingPayload,
    #[error("data URI is not base64-encoded")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Encodes raw image bytes as a base64 `data:` URI.
pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Decodes a base64 `data:` URI back into raw bytes.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>, DataUrlError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or(DataUrlError::NotADataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(DataUrlError::MissingPayload)?;
    if !header.ends_with(";base64") {
        return Err(DataUrlError::NotBase64);
    }
    Ok(BASE64.decode(payload)?)
}
