use super::DigestAlgorithm;
use ring::{digest, hmac};

// Ring supports everything but MD5.

pub(super) fn hmac_algorithm(algorithm: DigestAlgorithm) -> Option<hmac::Algorithm> {
    match algorithm {
        DigestAlgorithm::Sha1 => Some(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY),
        DigestAlgorithm::Sha256 => Some(hmac::HMAC_SHA256),
        DigestAlgorithm::Sha384 => Some(hmac::HMAC_SHA384),
        DigestAlgorithm::Sha512 => Some(hmac::HMAC_SHA512),
        DigestAlgorithm::Md5 => None,
    }
}

pub(super) fn digest_algorithm(algorithm: DigestAlgorithm) -> Option<&'static digest::Algorithm> {
    match algorithm {
        DigestAlgorithm::Sha1 => Some(&digest::SHA1_FOR_LEGACY_USE_ONLY),
        DigestAlgorithm::Sha256 => Some(&digest::SHA256),
        DigestAlgorithm::Sha384 => Some(&digest::SHA384),
        DigestAlgorithm::Sha512 => Some(&digest::SHA512),
        DigestAlgorithm::Md5 => None,
    }
}

pub(super) fn sign(key: &hmac::Key, data: &[u8]) -> Vec<u8> {
    hmac::sign(key, data).as_ref().to_vec()
}

pub(super) fn digest_bytes(algorithm: &'static digest::Algorithm, data: &[u8]) -> Vec<u8> {
    digest::digest(algorithm, data).as_ref().to_vec()
}
