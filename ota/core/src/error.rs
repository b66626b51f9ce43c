use thiserror::Error;

/**
    Errors produced while building an update query or decoding its response.

    Every variant aborts the request it was raised from; there is no partial
    result and nothing is retried.
*/
#[derive(Debug, Clone, Error)]
pub enum UpdaterError {
    // ── Query arguments ───────────────────────────────────────────────
    #[error("invalid query: {0}")]
    Validation(String),

    // ── Session material ──────────────────────────────────────────────
    #[error("secure random source unavailable: {0}")]
    Randomness(String),

    // ── RSA ───────────────────────────────────────────────────────────
    #[error("key wrap failed: {0}")]
    KeyWrap(String),

    // ── JSON ──────────────────────────────────────────────────────────
    #[error("serialization failed: {0}")]
    Serialization(String),

    // ── HTTP ──────────────────────────────────────────────────────────
    #[error("transport failed: {0}")]
    Transport(String),

    // ── Response envelope ─────────────────────────────────────────────
    #[error("malformed response: {0}")]
    Protocol(String),

    // ── Region table ──────────────────────────────────────────────────
    #[error("region configuration: {0}")]
    Config(String),
}

impl From<rand::rand_core::OsError> for UpdaterError {
    fn from(e: rand::rand_core::OsError) -> Self {
        Self::Randomness(e.to_string())
    }
}

impl From<reqwest::Error> for UpdaterError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

/**
    Type alias for results that may return an [`UpdaterError`].
*/
pub type UpdaterResult<T> = std::result::Result<T, UpdaterError>;

/**
    Error returned by `FromStr` implementations on enum types.
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}

impl From<ParseError> for UpdaterError {
    fn from(e: ParseError) -> Self {
        Self::Validation(e.to_string())
    }
}
