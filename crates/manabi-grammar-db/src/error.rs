use manabi_grammar_types::EntryKey;
use std::fmt;
use std::path::PathBuf;

/// Result type for manabi-grammar-db operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the database layer
#[derive(Debug)]
pub enum Error {
    /// Database operation failed
    Database(rusqlite::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Database file does not exist
    NotFound(PathBuf),

    /// The `grammar` table is missing or has an unrecognised layout
    Schema(String),

    /// A row's `data` column is not valid JSON
    Json {
        key: EntryKey,
        source: serde_json::Error,
    },

    /// Image or row violates the file format or table invariants (e.g. variant < 1)
    Corrupt(String),

    /// Two entries share the same key
    Duplicate(EntryKey),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Database(err) => {
                let msg = err.to_string();
                if msg.contains("no such column") || msg.contains("no such table") {
                    write!(
                        f,
                        "Database layout mismatch: {}. Rebuild it with `manabi-grammar build`.",
                        msg
                    )
                } else {
                    write!(f, "Database error: {}", err)
                }
            }
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::NotFound(path) => write!(f, "Database not found: {}", path.display()),
            Error::Schema(msg) => write!(f, "Schema error: {}", msg),
            Error::Json { key, source } => {
                write!(f, "Invalid JSON payload for {}: {}", key, source)
            }
            Error::Corrupt(msg) => write!(f, "Corrupt database: {}", msg),
            Error::Duplicate(key) => write!(f, "Duplicate grammar entry: {}", key),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Database(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Json { source, .. } => Some(source),
            Error::NotFound(_) | Error::Schema(_) | Error::Corrupt(_) | Error::Duplicate(_) => {
                None
            }
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_mismatch_error_message() {
        let sqlite_err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some("no such column: variant".to_string()),
        );
        let msg = Error::Database(sqlite_err).to_string();

        assert!(msg.contains("Database layout mismatch"));
        assert!(msg.contains("manabi-grammar build"));
    }

    #[test]
    fn test_regular_database_error_message() {
        let sqlite_err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some("disk I/O error".to_string()),
        );
        let msg = Error::Database(sqlite_err).to_string();

        assert!(msg.starts_with("Database error:"));
        assert!(!msg.contains("Rebuild"));
    }

    #[test]
    fn test_json_error_names_key() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::Json {
            key: EntryKey::new("ja", "が"),
            source,
        };
        assert!(err.to_string().starts_with("Invalid JSON payload for ja/が#1"));
    }
}
