//! MD5 support, for peers still configured with `HMACMD5`/`MD5`.
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};

type HmacMd5 = Hmac<Md5>;

pub(super) fn md5(data: &[u8]) -> Vec<u8> {
    Md5::digest(data).to_vec()
}

pub(super) fn hmac_md5(key: &[u8], data: &[u8]) -> Vec<u8> {
    // HMAC accepts keys of any length, so this cannot fail
    let mut mac = match HmacMd5::new_from_slice(key) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC-MD5 rejected a key"),
    };
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
