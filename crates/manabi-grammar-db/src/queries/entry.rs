use manabi_grammar_types::{EntryKey, GrammarEntry, variant_from_i64};
use rusqlite::{Connection, Row, params};

use crate::{Error, Result, schema::Layout};

pub fn get_all(conn: &Connection, layout: &Layout) -> Result<Vec<GrammarEntry>> {
    let mut stmt = conn.prepare_cached(&layout.select_all_sql())?;
    let mut rows = stmt.query([])?;

    let mut entries = Vec::new();
    while let Some(row) = rows.next()? {
        entries.push(parse_row(row)?);
    }

    Ok(entries)
}

pub fn get(
    conn: &Connection,
    layout: &Layout,
    target_language: &str,
    headword: &str,
    variant: u32,
) -> Result<Option<GrammarEntry>> {
    let mut stmt = conn.prepare_cached(&layout.select_one_sql())?;
    let mut rows = stmt.query(params![target_language, headword, variant])?;

    match rows.next()? {
        Some(row) => Ok(Some(parse_row(row)?)),
        None => Ok(None),
    }
}

pub fn count(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM grammar", [], |row| row.get(0))?;
    Ok(count as usize)
}

pub fn languages(conn: &Connection, layout: &Layout) -> Result<Vec<String>> {
    let mut stmt = conn.prepare_cached(&layout.languages_sql())?;
    let languages = stmt
        .query_map([], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;

    Ok(languages)
}

/// Columns are always selected as (language, headword, variant, data).
fn parse_row(row: &Row<'_>) -> Result<GrammarEntry> {
    let target_language: String = row.get(0)?;
    let headword: String = row.get(1)?;
    let raw_variant: i64 = row.get(2)?;
    let data: String = row.get(3)?;

    let variant = variant_from_i64(raw_variant).map_err(|_| {
        Error::Corrupt(format!(
            "{}/{} has variant {}",
            target_language, headword, raw_variant
        ))
    })?;

    let data = serde_json::from_str(&data).map_err(|source| Error::Json {
        key: EntryKey {
            target_language: target_language.clone(),
            headword: headword.clone(),
            variant,
        },
        source,
    })?;

    Ok(GrammarEntry {
        target_language,
        headword,
        variant,
        data,
    })
}
