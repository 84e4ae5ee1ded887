use std::fmt;

/// Result type for manabi-grammar-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// Entry payload could not be decoded
    Json(serde_json::Error),

    /// Language code is not 2-3 lowercase ASCII letters
    InvalidLanguage(String),

    /// Variant numbers start at 1
    InvalidVariant(i64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::InvalidLanguage(code) => write!(
                f,
                "Invalid language code '{}': must be 2-3 lowercase letters",
                code
            ),
            Error::InvalidVariant(value) => {
                write!(f, "Invalid variant {}: must be >= 1", value)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(err) => Some(err),
            Error::InvalidLanguage(_) | Error::InvalidVariant(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
