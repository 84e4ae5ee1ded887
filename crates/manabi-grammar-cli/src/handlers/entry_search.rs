use super::output::print_entries;
use crate::OutputFormat;
use anyhow::Result;
use manabi_grammar_db::GrammarDb;
use manabi_grammar_types::GrammarEntry;
use std::path::Path;

/// Filters combined with AND; unset filters match everything.
#[derive(Debug, Default)]
pub struct SearchFilter {
    pub headword_contains: Option<String>,
    pub language: Option<String>,
    pub has_reader: Option<String>,
    pub jmdict_id: Option<String>,
}

impl SearchFilter {
    pub fn matches(&self, entry: &GrammarEntry) -> bool {
        if let Some(language) = &self.language
            && entry.target_language != *language
        {
            return false;
        }
        if let Some(needle) = &self.headword_contains
            && !headword_matches(entry, needle)
        {
            return false;
        }
        if let Some(reader) = &self.has_reader
            && !entry.reader_languages().contains(&reader.as_str())
        {
            return false;
        }
        if let Some(id) = &self.jmdict_id
            && !jmdict_matches(entry, id)
        {
            return false;
        }
        true
    }
}

fn headword_matches(entry: &GrammarEntry, needle: &str) -> bool {
    if entry.headword.contains(needle) {
        return true;
    }
    entry
        .data
        .get("alternativeForms")
        .and_then(|forms| forms.as_array())
        .is_some_and(|forms| {
            forms
                .iter()
                .filter_map(|form| form.as_str())
                .any(|form| form.contains(needle))
        })
}

// Stored as a number or, for stubs, a string.
fn jmdict_matches(entry: &GrammarEntry, id: &str) -> bool {
    match entry.data.get("jmdictId") {
        Some(serde_json::Value::Number(n)) => n.to_string() == id,
        Some(serde_json::Value::String(s)) => s == id,
        _ => false,
    }
}

pub fn handle(db_path: &Path, filter: &SearchFilter, format: OutputFormat) -> Result<()> {
    let db = GrammarDb::open(db_path)?;

    let entries = db.search(|entry| filter.matches(entry))?;

    print_entries(&entries, format)?;
    db.close()?;
    Ok(())
}
