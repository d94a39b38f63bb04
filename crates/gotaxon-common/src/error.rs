use thiserror::Error;

/// The kind of failure behind an [`Error`], used by callers that need to
/// branch on failure category (e.g. the HTTP layer mapping to an in-band
/// `status: "FAILED"` envelope).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    InvalidInput,
    NotFound,
    MissingReference,
    Store,
    Parse,
    Remote,
    Timeout,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("missing reference: {0}")]
    MissingReference(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("remote error: {0}")]
    Remote(String),

    #[error("operation timed out: {0}")]
    Timeout(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn kind(&self) -> Kind {
        match self {
            Error::InvalidInput(_) => Kind::InvalidInput,
            Error::NotFound(_) => Kind::NotFound,
            Error::MissingReference(_) => Kind::MissingReference,
            Error::Store(_) => Kind::Store,
            Error::Parse(_) => Kind::Parse,
            Error::Remote(_) => Kind::Remote,
            Error::Timeout(_) => Kind::Timeout,
            Error::Io(_) => Kind::Store,
            Error::Json(_) => Kind::Parse,
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn missing_reference(msg: impl Into<String>) -> Self {
        Self::MissingReference(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
