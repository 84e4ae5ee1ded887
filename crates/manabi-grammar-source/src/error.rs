use manabi_grammar_types::EntryKey;
use std::fmt;
use std::path::PathBuf;

use crate::MarkdownError;

/// Result type for manabi-grammar-source operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading or writing a source tree
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// Walkdir error
    WalkDir(walkdir::Error),

    /// A source file could not be read (missing, unreadable or not UTF-8)
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML file could not be parsed
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Markdown file has a structural problem
    Markdown { path: PathBuf, source: MarkdownError },

    /// YAML parsed but does not describe a valid entry
    Entry { path: PathBuf, message: String },

    /// Two files produce the same (language, headword, variant)
    Duplicate { key: EntryKey, path: PathBuf },

    /// Language code is not 2-3 lowercase letters
    InvalidLanguage { role: &'static str, code: String },

    /// Refusing to overwrite a file
    AlreadyExists(PathBuf),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::WalkDir(err) => write!(f, "Directory traversal error: {}", err),
            Error::Read { path, source } => {
                write!(f, "{}: could not read file: {}", path.display(), source)
            }
            Error::Yaml { path, source } => write!(f, "{}: invalid YAML: {}", path.display(), source),
            Error::Markdown { path, source } => write!(f, "{}: {}", path.display(), source),
            Error::Entry { path, message } => write!(f, "{}: {}", path.display(), message),
            Error::Duplicate { key, path } => write!(
                f,
                "Duplicate grammar entry detected for {}/{} variant {} in '{}'",
                key.target_language,
                key.headword,
                key.variant,
                path.display()
            ),
            Error::InvalidLanguage { role, code } => write!(
                f,
                "{} language must be 2-3 lowercase letters (received '{}')",
                role, code
            ),
            Error::AlreadyExists(path) => write!(
                f,
                "{} already exists (use --force to overwrite)",
                path.display()
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::Read { source, .. } => Some(source),
            Error::Yaml { source, .. } => Some(source),
            Error::Markdown { source, .. } => Some(source),
            Error::Entry { .. }
            | Error::Duplicate { .. }
            | Error::InvalidLanguage { .. }
            | Error::AlreadyExists(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err)
    }
}
