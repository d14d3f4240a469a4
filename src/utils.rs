use md5::{Digest, Md5};

/// MD5 hex digest of a string's bytes, 32 lowercase hex characters.
///
/// Blank input short-circuits to an empty string instead of hashing "" -
/// the digest material builders treat a missing piece as "nothing to hash",
/// not as the checksum of nothing. Input is expected to be ASCII-range.
pub fn md5_hex(input: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }

    hex::encode(Md5::digest(input.as_bytes()))
}
