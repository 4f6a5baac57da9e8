use crate::crypto::Crypto;
use crate::target::RequestTarget;

/// The values covered by an Hmac signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HmacData {
    pub app_id: String,
    pub timestamp: i64,
    pub nonce: String,
    pub target: RequestTarget,
    /// Base64 hash of the request body.
    pub payload_hash: String,
}

/// The string signed by an Hmac request. Each field is newline-terminated.
pub fn canonical_string(data: &HmacData) -> String {
    format!(
        "hmac.1\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n",
        data.app_id,
        data.timestamp,
        data.nonce,
        data.target.method,
        data.target.resource,
        data.target.host,
        data.target.port,
        data.payload_hash,
    )
}

/// Calculate the base64 signature of a request.
pub fn signature(crypto: &dyn Crypto, data: &HmacData) -> String {
    crypto.mac_str(&canonical_string(data))
}

/// Hash the request body; a request without a body hashes the empty string.
pub fn payload_hash(crypto: &dyn Crypto, body: &[u8]) -> String {
    crate::b64::encode(crypto.hash(body))
}
