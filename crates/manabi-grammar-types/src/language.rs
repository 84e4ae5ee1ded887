use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Codes that still appear in older trees, paired with the code to use instead.
pub const LANGUAGE_ALIASES: &[(&str, &str)] = &[("jp", "ja")];

/// Returns true for 2-3 lowercase ASCII letters (`ja`, `en`, `yue`).
pub fn is_valid_language_code(code: &str) -> bool {
    (2..=3).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_lowercase())
}

/// Preferred replacement for a deprecated language code, if any.
pub fn preferred_language_code(code: &str) -> Option<&'static str> {
    LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == code)
        .map(|(_, preferred)| *preferred)
}

/// Validated language code, used both for target languages (the grammar being
/// described) and reader languages (the language of the explanation).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn parse(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        if is_valid_language_code(&code) {
            Ok(Self(code))
        } else {
            Err(Error::InvalidLanguage(code))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}
