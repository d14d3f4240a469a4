use std::fmt;
use std::fmt::{Display, Formatter};

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::challenge::WwwAuthFields;
use crate::enums::HttpMethod;
use crate::utils::md5_hex;

/// Nonce count, 8-digit zero-padded decimal per RFC convention.
///
/// Fixed at 1: every call runs a fresh two-trip handshake, so the counter
/// never advances. Reusing a server nonce across requests would require
/// incrementing this and recomputing the response.
const NONCE_COUNT: &str = "00000001";

/// Atlas programmatic API key pair.
///
/// The public key doubles as the digest username. Both halves are trimmed
/// at construction and blank input collapses to empty. Neither is logged
/// or serialized; `Debug` redacts the private key.
#[derive(Clone)]
pub struct Credentials {
    public_key: String,
    private_key: String,
}

impl Credentials {
    pub fn new(public_key: &str, private_key: &str) -> Self {
        Self {
            public_key: public_key.trim().to_string(),
            private_key: private_key.trim().to_string(),
        }
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub(crate) fn private_key(&self) -> &str {
        &self.private_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Client nonce generator, injected so tests can pin the cnonce.
///
/// Called exactly once per handshake. Values must be fresh each call;
/// a repeating source weakens replay resistance but does not break the
/// digest computation itself.
pub trait NonceSource: Send + Sync {
    /// Produce a nonce of `len` characters.
    fn generate(&self, len: usize) -> String;
}

/// Default source, samples alphanumeric characters from the thread RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomNonce;

impl NonceSource for RandomNonce {
    fn generate(&self, len: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..len).map(|_| rng.sample(Alphanumeric) as char).collect()
    }
}

/// A computed `Authorization` header value for one request.
///
/// Obtained from [`DigestHeader::compute`]; render it with `to_string()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestHeader {
    pub username: String,
    pub realm: String,
    pub nonce: String,
    /// Absolute request path; scheme, host and query never enter the hash
    pub uri: String,
    pub response: String,
    pub qop: String,
    pub cnonce: String,
}

impl DigestHeader {
    /// Compute the digest response for one request.
    ///
    /// Pure function of its inputs:
    ///
    /// ```text
    /// h1       = md5(publicKey:realm:privateKey)
    /// h2       = md5(METHOD:path)
    /// response = md5(h1:nonce:00000001:cnonce:qop:h2)
    /// ```
    pub fn compute(
        creds: &Credentials,
        challenge: &WwwAuthFields,
        method: HttpMethod,
        path: &str,
        cnonce: &str,
    ) -> Self {
        let h1 = md5_hex(&format!(
            "{}:{}:{}",
            creds.public_key(),
            challenge.realm,
            creds.private_key()
        ));
        let h2 = md5_hex(&format!("{method}:{path}"));
        let response = md5_hex(&format!(
            "{h1}:{}:{NONCE_COUNT}:{cnonce}:{}:{h2}",
            challenge.nonce, challenge.qop
        ));

        Self {
            username: creds.public_key().to_string(),
            realm: challenge.realm.clone(),
            nonce: challenge.nonce.clone(),
            uri: path.to_string(),
            response,
            qop: challenge.qop.clone(),
            cnonce: cnonce.to_string(),
        }
    }
}

impl Display for DigestHeader {
    /// Render the full header value.
    ///
    /// Quote characters inside server-supplied realm/nonce are not escaped;
    /// a server returning them produces a malformed header. Atlas never does.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Digest username=\"{}\", realm=\"{}\", nonce=\"{}\", uri=\"{}\", \
             algorithm=MD5, response=\"{}\", qop={}, nc={NONCE_COUNT}, cnonce=\"{}\"",
            self.username, self.realm, self.nonce, self.uri, self.response, self.qop, self.cnonce
        )
    }
}
