use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::DEFAULT_VARIANT;

fn default_variant() -> u32 {
    DEFAULT_VARIANT
}

/// JMdict sequence number. Freshly stubbed entries carry a placeholder string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JmdictId {
    Number(u64),
    Text(String),
}

impl fmt::Display for JmdictId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JmdictId::Number(n) => write!(f, "{}", n),
            JmdictId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Typed view of the JSON payload stored in the `data` column.
///
/// Keys are camelCase on the wire. Keys this model does not know about are
/// kept in `extra` so a decode/encode cycle does not lose data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarRecord {
    /// Dictionary form of the grammar point.
    #[serde(default)]
    pub headword: String,
    /// Language the grammar point belongs to.
    #[serde(default)]
    pub target_language: String,
    /// Sense number, starting at 1.
    #[serde(default = "default_variant")]
    pub variant: u32,
    /// JMdict sequence number, if the headword has a dictionary entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jmdict_id: Option<JmdictId>,
    /// Matcher patterns keyed by tokenizer (e.g. `mecab`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<serde_json::Value>,
    /// Links to example usages (text fragment URLs).
    #[serde(default)]
    pub examples: Vec<String>,
    /// Spellings that should be treated as the same grammar point.
    #[serde(default)]
    pub alternative_forms: Vec<String>,
    /// Curated example sentences with translations.
    #[serde(default)]
    pub example_sentences: Vec<ExampleSentence>,
    /// Sentences used to check the pattern matcher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_data: Option<TestData>,
    /// Proficiency level label (e.g. `N5`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_label: Option<String>,
    /// Explanations keyed by reader language.
    #[serde(default)]
    pub info: BTreeMap<String, InfoSections>,
    /// Unrecognised keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleSentence {
    pub sentence: String,
    /// Translations keyed by reader language.
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestData {
    /// Sentences the pattern must not match.
    #[serde(default)]
    pub non_matching_sentences: Vec<String>,
}

/// Sections parsed from one `<headword>.<reader>.md` file.
///
/// Only sections present in the Markdown are serialised.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InfoSections {
    #[serde(rename = "Meaning", default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(rename = "Guides", default, skip_serializing_if = "Option::is_none")]
    pub guides: Option<Vec<LinkEntry>>,
    #[serde(rename = "Q&A", default, skip_serializing_if = "Option::is_none")]
    pub qa: Option<Vec<LinkEntry>>,
    /// Links grouped by the related headword they compare against.
    #[serde(rename = "Related", default, skip_serializing_if = "Option::is_none")]
    pub related: Option<BTreeMap<String, Vec<LinkEntry>>>,
}

/// A Markdown list item of the form `[name](url) - description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub url: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Set by a leading ⭐ in the list item.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub recommended: bool,
}
