use std::io::Read;

use flate2::read::GzDecoder;

use crate::{Error, Result};

/// Content-Encoding token that selects the gzip decode path. Case-sensitive.
const GZIP_TOKEN: &str = "gzip";

/// Decode a response body, honoring the Atlas gzip length trailer.
///
/// Compressed bodies arrive with the exact decompressed length appended as
/// a trailing little-endian 32-bit integer after the gzip payload. That
/// trailer, not the gzip stream's own end, governs how many bytes come
/// back; the ISIZE field inside the stream wraps past 4 GiB and is not
/// trusted. Uncompressed bodies pass through as UTF-8 text.
pub fn decode_body(content_encoding: &[String], body: &[u8]) -> Result<String> {
    if !content_encoding.iter().any(|e| e == GZIP_TOKEN) {
        return Ok(String::from_utf8_lossy(body).into_owned());
    }

    gunzip_with_trailer(body)
}

fn gunzip_with_trailer(body: &[u8]) -> Result<String> {
    if body.len() < 4 {
        return Err(Error::BadFraming(
            "compressed body shorter than its length trailer".to_string(),
        ));
    }

    let mut trailer = [0u8; 4];
    trailer.copy_from_slice(&body[body.len() - 4..]);
    let len = i32::from_le_bytes(trailer);
    if len < 0 {
        return Err(Error::BadFraming(format!(
            "negative decompressed length in trailer: {len}"
        )));
    }

    // the decoder stops at the end of the gzip member, so the 4 trailer
    // bytes hanging off the end are never consumed
    let mut decoder = GzDecoder::new(body);
    let mut out = vec![0u8; len as usize];
    decoder
        .read_exact(&mut out)
        .map_err(|e| Error::BadFraming(format!("gzip stream shorter than trailer claims: {e}")))?;

    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;

    use super::decode_body;
    use crate::Error;

    fn gzip_with_trailer(text: &str, trailer: i32) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        let mut bytes = encoder.finish().unwrap();
        bytes.extend_from_slice(&trailer.to_le_bytes());
        bytes
    }

    fn gzip_encoding() -> Vec<String> {
        vec!["gzip".to_string()]
    }

    #[test]
    fn plain_body_passes_through() {
        let out = decode_body(&[], br#"{"ok":true}"#).unwrap();
        assert_eq!(out, r#"{"ok":true}"#);
    }

    #[test]
    fn gzip_decodes_to_trailer_length() {
        let body = gzip_with_trailer("hello world", 11);
        assert_eq!(decode_body(&gzip_encoding(), &body).unwrap(), "hello world");
    }

    #[test]
    fn trailer_governs_output_length() {
        // corrupting the trailer to 5 yields the first 5 decompressed bytes,
        // proving the trailer and not the stream end drives the decode
        let body = gzip_with_trailer("hello world", 5);
        assert_eq!(decode_body(&gzip_encoding(), &body).unwrap(), "hello");
    }

    #[test]
    fn oversized_trailer_is_bad_framing() {
        let body = gzip_with_trailer("hello world", 64);
        let err = decode_body(&gzip_encoding(), &body).unwrap_err();
        assert!(matches!(err, Error::BadFraming(_)));
    }

    #[test]
    fn negative_trailer_is_bad_framing() {
        let body = gzip_with_trailer("hello world", -1);
        let err = decode_body(&gzip_encoding(), &body).unwrap_err();
        assert!(matches!(err, Error::BadFraming(_)));
    }

    #[test]
    fn truncated_body_is_bad_framing() {
        let err = decode_body(&gzip_encoding(), b"ab").unwrap_err();
        assert!(matches!(err, Error::BadFraming(_)));
    }

    #[test]
    fn encoding_token_match_is_case_sensitive() {
        // "GZIP" is not the known token; the body comes back untouched
        let out = decode_body(&["GZIP".to_string()], b"raw bytes").unwrap();
        assert_eq!(out, "raw bytes");
    }
}
