use crate::b64;
use crate::crypto::Crypto;

/// Normalize a `Content-Type` value for hashing: parameters are dropped and the media type
/// is lowercased.
pub fn normalize_content_type(content_type: Option<&str>) -> String {
    match content_type {
        Some(ct) => ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Calculate the base64 Hawk payload hash of an entity body.
///
/// The hash covers `hawk.1.payload\n{content-type}\n{payload}\n` and uses the hash (not the
/// MAC) algorithm of `crypto`.
pub fn payload_hash(crypto: &dyn Crypto, payload: &[u8], content_type: Option<&str>) -> String {
    let content_type = normalize_content_type(content_type);
    let mut buffer = Vec::with_capacity(payload.len() + content_type.len() + 17);
    buffer.extend_from_slice(b"hawk.1.payload\n");
    buffer.extend_from_slice(content_type.as_bytes());
    buffer.push(b'\n');
    buffer.extend_from_slice(payload);
    buffer.push(b'\n');
    b64::encode(crypto.hash(&buffer))
}
