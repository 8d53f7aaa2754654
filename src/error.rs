use std::error::Error as StdError;
use std::fmt;
use std::io::Error as IoError;

use serde_json::Error as JsonError;

use crate::interactions_endpoint::InvalidKey;
use crate::store::StoreError;

/// The common result type between most library functions.
///
/// The library exposes functions which, for a result type, exposes only one type, rather than the
/// usual 2 (`Result<T, Error>`). This is because all functions that return a result return
/// thanks-bot's [`Error`], so this is implied, and a "simpler" result is used.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A common error enum returned by most of the library's functionality within a custom
/// [`Result`].
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// An [`std::io`] error.
    Io(IoError),
    /// An error from the [`serde_json`] crate.
    Json(JsonError),
    /// The configured public key could not be used to verify requests.
    InvalidKey(InvalidKey),
    /// An error from the key-value store holding the counters.
    Store(StoreError),
    /// The HTTP server could not be started.
    Server(String),
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Error {
        Error::Io(e)
    }
}

impl From<JsonError> for Error {
    fn from(e: JsonError) -> Error {
        Error::Json(e)
    }
}

impl From<InvalidKey> for Error {
    fn from(e: InvalidKey) -> Error {
        Error::InvalidKey(e)
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Error {
        Error::Store(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(inner) => fmt::Display::fmt(&inner, f),
            Self::Json(inner) => fmt::Display::fmt(&inner, f),
            Self::InvalidKey(inner) => fmt::Display::fmt(&inner, f),
            Self::Store(inner) => fmt::Display::fmt(&inner, f),
            Self::Server(msg) => write!(f, "failed to start the HTTP server: {msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(inner) => Some(inner),
            Self::Json(inner) => Some(inner),
            Self::InvalidKey(inner) => Some(inner),
            Self::Store(inner) => Some(inner),
            Self::Server(_) => None,
        }
    }
}
