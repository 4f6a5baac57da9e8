//! This module contains basic base64 functionality as used in both schemes.

/// Encode with the standard alphabet, including padding.
pub(crate) fn encode<T: AsRef<[u8]>>(input: T) -> String {
    base64::encode_config(input, base64::STANDARD)
}
