use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong during one authenticated call.
///
/// All variants are terminal for the current call; the engine never retries.
/// Callers may retry the whole operation, which re-runs the handshake from
/// scratch with a fresh challenge and client nonce.
#[derive(Debug, Error)]
pub enum Error {
    /// Network failure on either round trip, surfaced unchanged.
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A required challenge directive was absent from `WWW-Authenticate`.
    #[error("digest challenge is missing the \"{0}\" directive")]
    ChallengeFieldMissing(&'static str),

    /// Header missing, wrong auth scheme, or unparsable directive list.
    #[error("bad digest challenge: {0}")]
    BadChallenge(String),

    /// The gzip length-trailer decode failed.
    #[error("bad response framing: {0}")]
    BadFraming(String),

    /// An endpoint wrapper was handed a blank path parameter.
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("failed to decode response body as JSON")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(Box::new(e))
    }
}
