use anyhow::{Context, Result};
use manabi_grammar_db::write_database;
use manabi_grammar_source::collect_entries;
use std::path::Path;

pub fn handle(root: &Path, output: &Path) -> Result<()> {
    let entries = collect_entries(root)?;
    let rows = write_database(output, &entries)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Wrote {} with {} rows", output.display(), rows);
    Ok(())
}
