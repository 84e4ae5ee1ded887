use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, GrammarRecord, Result};

/// Variant used when a grammar point has a single sense.
pub const DEFAULT_VARIANT: u32 = 1;

/// Composite primary key of a grammar row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryKey {
    /// Language the grammar point belongs to (e.g. `ja`).
    pub target_language: String,
    /// Dictionary form of the grammar point (e.g. `が`).
    pub headword: String,
    /// Sense number, starting at 1.
    pub variant: u32,
}

impl EntryKey {
    /// Key for the first variant of a headword.
    pub fn new(target_language: impl Into<String>, headword: impl Into<String>) -> Self {
        Self {
            target_language: target_language.into(),
            headword: headword.into(),
            variant: DEFAULT_VARIANT,
        }
    }

    pub fn with_variant(mut self, variant: u32) -> Self {
        self.variant = variant;
        self
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}#{}",
            self.target_language, self.headword, self.variant
        )
    }
}

/// Converts a raw integer into a variant number.
pub fn variant_from_i64(value: i64) -> Result<u32> {
    if value < DEFAULT_VARIANT as i64 {
        return Err(Error::InvalidVariant(value));
    }
    u32::try_from(value).map_err(|_| Error::InvalidVariant(value))
}

/// One row of the `grammar` table with its JSON payload decoded.
///
/// This is the plain value handed out by the database client. The payload is
/// kept as untyped JSON so callers see exactly what the builder stored;
/// [`GrammarEntry::record`] gives the typed view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarEntry {
    /// Language the grammar point belongs to.
    pub target_language: String,
    /// Dictionary form of the grammar point.
    pub headword: String,
    /// Sense number, starting at 1.
    pub variant: u32,
    /// Parsed JSON payload.
    pub data: serde_json::Value,
}

impl GrammarEntry {
    pub fn key(&self) -> EntryKey {
        EntryKey {
            target_language: self.target_language.clone(),
            headword: self.headword.clone(),
            variant: self.variant,
        }
    }

    /// Decode the payload into a [`GrammarRecord`].
    ///
    /// Payloads written by older builders lack `headword`, `targetLanguage`
    /// and `variant`; those are filled in from the row key.
    pub fn record(&self) -> Result<GrammarRecord> {
        let mut record: GrammarRecord = serde_json::from_value(self.data.clone())?;
        if record.headword.is_empty() {
            record.headword = self.headword.clone();
        }
        if record.target_language.is_empty() {
            record.target_language = self.target_language.clone();
        }
        if self.data.get("variant").is_none() {
            record.variant = self.variant;
        }
        Ok(record)
    }

    /// Reader languages that have an explanation for this entry.
    pub fn reader_languages(&self) -> Vec<&str> {
        self.data
            .get("info")
            .and_then(|info| info.as_object())
            .map(|info| info.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_entry() -> GrammarEntry {
        GrammarEntry {
            target_language: "ja".to_string(),
            headword: "が".to_string(),
            variant: 1,
            data: json!({
                "examples": ["https://example.com/ga#text=が"],
                "alternativeForms": ["ガ"],
                "info": {
                    "en": { "Meaning": "Marks the subject." },
                    "fr": {}
                }
            }),
        }
    }

    #[test]
    fn test_key_display() {
        let key = EntryKey::new("ja", "は").with_variant(2);
        assert_eq!(key.to_string(), "ja/は#2");
    }

    #[test]
    fn test_new_key_defaults_variant() {
        assert_eq!(EntryKey::new("ja", "は").variant, DEFAULT_VARIANT);
    }

    #[test]
    fn test_record_fills_missing_key_fields() {
        let record = sample_entry().record().unwrap();
        assert_eq!(record.headword, "が");
        assert_eq!(record.target_language, "ja");
        assert_eq!(record.variant, 1);
        assert_eq!(record.alternative_forms, vec!["ガ".to_string()]);
    }

    #[test]
    fn test_record_keeps_payload_variant() {
        let mut entry = sample_entry();
        entry.variant = 3;
        entry.data["variant"] = json!(2);
        assert_eq!(entry.record().unwrap().variant, 2);
    }

    #[test]
    fn test_reader_languages() {
        let entry = sample_entry();
        let mut langs = entry.reader_languages();
        langs.sort();
        assert_eq!(langs, vec!["en", "fr"]);
    }

    #[test]
    fn test_variant_from_i64() {
        assert_eq!(variant_from_i64(1).unwrap(), 1);
        assert!(matches!(variant_from_i64(0), Err(Error::InvalidVariant(0))));
        assert!(variant_from_i64(i64::MAX).is_err());
    }

    #[test]
    fn test_entry_serializes_as_plain_row() {
        let value = serde_json::to_value(sample_entry()).unwrap();
        assert_eq!(value["target_language"], "ja");
        assert_eq!(value["variant"], 1);
        assert_eq!(value["data"]["alternativeForms"][0], "ガ");
    }
}
