use super::output::print_entries;
use crate::OutputFormat;
use anyhow::Result;
use manabi_grammar_db::GrammarDb;
use std::path::Path;

pub fn handle(db_path: &Path, language: Option<&str>, format: OutputFormat) -> Result<()> {
    let db = GrammarDb::open(db_path)?;

    let entries = match language {
        Some(language) => db.search(|entry| entry.target_language == language)?,
        None => db.all()?,
    };

    print_entries(&entries, format)?;
    db.close()?;
    Ok(())
}
