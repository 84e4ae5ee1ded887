//! Assertions on the JSON printed by `entry list|search|get --format json`.

use anyhow::{Context, Result};
use serde_json::Value;

/// Assert that the JSON array output has `expected` entries.
pub fn assert_entry_count(json: &Value, expected: usize) -> Result<()> {
    let entries = json.as_array().context("Expected a JSON array of entries")?;

    if entries.len() != expected {
        anyhow::bail!("Expected {} entries, got {}", expected, entries.len());
    }

    Ok(())
}

/// Assert the headwords of the JSON array output, in order.
pub fn assert_headwords(json: &Value, expected: &[&str]) -> Result<()> {
    let entries = json.as_array().context("Expected a JSON array of entries")?;

    let headwords = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            entry["headword"]
                .as_str()
                .with_context(|| format!("Entry {} missing headword", i))
        })
        .collect::<Result<Vec<_>>>()?;

    if headwords != expected {
        anyhow::bail!("Expected headwords {:?}, got {:?}", expected, headwords);
    }

    Ok(())
}
