use manabi_grammar_types::{EntryKey, GrammarEntry, GrammarRecord, InfoSections};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::layout::{self, LanguageDir};
use crate::markdown::parse_markdown_sections;
use crate::normalize::{coerce_variant, normalize_record};
use crate::{Error, Result};

/// Explanations for one language directory: headword -> reader language -> sections.
pub type ExplanationMap = BTreeMap<String, BTreeMap<String, InfoSections>>;

/// Walk a source tree and produce one row per YAML file.
///
/// Directories and files are visited in name order, so the result (and the
/// database built from it) is deterministic.
pub fn collect_entries(root: &Path) -> Result<Vec<GrammarEntry>> {
    let mut entries = Vec::new();
    let mut seen: HashSet<EntryKey> = HashSet::new();

    for dir in layout::language_dirs(root)? {
        let LanguageDir {
            path,
            name,
            target_language,
        } = dir;
        let Some(target_language) = target_language else {
            warn!(dir = %name, "skipping directory with invalid language code");
            continue;
        };

        let explanations = load_explanations(&path)?;

        for yaml_path in layout::files_with_extension(&path, "yaml")? {
            let headword = layout::file_stem(&yaml_path);
            let info = explanations.get(&headword).cloned().unwrap_or_default();
            let entry = load_entry(&yaml_path, &target_language, info)?;

            let key = entry.key();
            if !seen.insert(key.clone()) {
                return Err(Error::Duplicate {
                    key,
                    path: yaml_path,
                });
            }
            entries.push(entry);
        }
    }

    info!(root = %root.display(), rows = entries.len(), "collected grammar entries");
    Ok(entries)
}

/// Parse every `<headword>.<reader>.md` file in a language directory.
pub fn load_explanations(dir: &Path) -> Result<ExplanationMap> {
    let mut explanations = ExplanationMap::new();

    for md_path in layout::files_with_extension(dir, "md")? {
        let file_name = layout::file_name(&md_path);
        let Some((headword, reader)) = layout::split_markdown_name(&file_name) else {
            warn!(file = %file_name, "skipping markdown file with unexpected name");
            continue;
        };

        let text = read_source(&md_path)?;
        let sections = parse_markdown_sections(strip_bom(&text)).map_err(|source| {
            Error::Markdown {
                path: md_path.clone(),
                source,
            }
        })?;

        explanations
            .entry(headword.to_string())
            .or_default()
            .insert(reader.to_string(), sections);
    }

    Ok(explanations)
}

/// Load one YAML file and turn it into a database row.
///
/// The headword is the file stem and the target language comes from the
/// directory; both only fill in values the YAML leaves out. `info` replaces
/// whatever the YAML had under that key.
pub fn load_entry(
    yaml_path: &Path,
    target_language: &str,
    info: BTreeMap<String, InfoSections>,
) -> Result<GrammarEntry> {
    let headword = layout::file_stem(yaml_path);
    let entry_error = |message: String| Error::Entry {
        path: yaml_path.to_path_buf(),
        message,
    };

    let text = read_source(yaml_path)?;
    let value: Value = serde_yaml::from_str(&text).map_err(|source| Error::Yaml {
        path: yaml_path.to_path_buf(),
        source,
    })?;
    let Value::Object(record) = value else {
        return Err(entry_error("YAML root must be a mapping/object.".to_string()));
    };

    let mut record = normalize_record(record).map_err(entry_error)?;
    let variant = coerce_variant(record.get("variant")).map_err(entry_error)?;

    record.insert("variant".to_string(), Value::from(variant));
    record
        .entry("targetLanguage")
        .or_insert_with(|| Value::from(target_language));
    record
        .entry("headword")
        .or_insert_with(|| Value::from(headword.as_str()));
    let info = serde_json::to_value(info)
        .map_err(|err| entry_error(format!("could not encode explanations: {}", err)))?;
    record.insert("info".to_string(), info);

    let data = Value::Object(record);
    serde_json::from_value::<GrammarRecord>(data.clone())
        .map_err(|err| entry_error(format!("does not match the entry schema: {}", err)))?;

    Ok(GrammarEntry {
        target_language: target_language.to_string(),
        headword,
        variant,
        data,
    })
}

pub(crate) fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}
