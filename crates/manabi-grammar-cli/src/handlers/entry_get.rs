use super::output::print_entry;
use crate::OutputFormat;
use anyhow::Result;
use manabi_grammar_db::GrammarDb;
use manabi_grammar_types::EntryKey;
use std::path::Path;

pub fn handle(
    db_path: &Path,
    language: &str,
    headword: &str,
    variant: u32,
    format: OutputFormat,
) -> Result<()> {
    let db = GrammarDb::open(db_path)?;
    let key = EntryKey::new(language, headword).with_variant(variant);

    let Some(entry) = db.get_by_key(&key)? else {
        anyhow::bail!("No grammar entry for {}", key);
    };

    print_entry(&entry, format)?;
    db.close()?;
    Ok(())
}
