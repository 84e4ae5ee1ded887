use manabi_grammar_types::GrammarEntry;
use rusqlite::{Connection, ErrorCode, params};
use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::schema::{CREATE_TABLE, Layout, TABLE_NAME};
use crate::{Error, Result};

/// Write `entries` to a fresh database at `db_path`, replacing any existing file.
///
/// Rows go into a temporary file next to `db_path` in a single transaction.
/// Only a complete database is renamed over `db_path`; on error the previous
/// file is left as it was. The result uses a rollback journal so it can be
/// shipped as one file and opened read-only or from bytes.
pub fn write_database(db_path: &Path, entries: &[GrammarEntry]) -> Result<usize> {
    let parent = match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let staging = tempfile::Builder::new()
        .prefix(".manabi-grammar-")
        .suffix(".sqlite.tmp")
        .tempfile_in(parent)?;
    debug!(path = %staging.path().display(), "writing staging database");

    if let Err(err) = fill(staging.path(), entries) {
        remove_journal_files(staging.path())?;
        return Err(err);
    }
    replace(staging, db_path)?;

    info!(path = %db_path.display(), rows = entries.len(), "wrote grammar database");
    Ok(entries.len())
}

fn fill(path: &Path, entries: &[GrammarEntry]) -> Result<()> {
    let mut conn = Connection::open(path)?;
    let _: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
    conn.execute("PRAGMA synchronous=NORMAL", [])?;
    conn.execute_batch(CREATE_TABLE)?;

    let insert = format!(
        "INSERT INTO {} ({}, headword, variant, data) VALUES (?1, ?2, ?3, ?4)",
        TABLE_NAME,
        Layout::CURRENT.language_column
    );

    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(&insert)?;

        for entry in entries {
            let data = serde_json::to_string(&entry.data).map_err(|source| Error::Json {
                key: entry.key(),
                source,
            })?;

            match stmt.execute(params![
                &entry.target_language,
                &entry.headword,
                entry.variant,
                data
            ]) {
                Ok(_) => {}
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == ErrorCode::ConstraintViolation
                        && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
                {
                    return Err(Error::Duplicate(entry.key()));
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
    tx.commit()?;

    let _: (i64, i64, i64) = conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |row| {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?))
    })?;
    let _: String = conn.query_row("PRAGMA journal_mode=DELETE", [], |row| row.get(0))?;
    conn.close().map_err(|(_, err)| Error::Database(err))
}

/// Move the finished file into place. Journal files left by an earlier
/// database at `db_path` must not be paired with the new one.
fn replace(staging: NamedTempFile, db_path: &Path) -> Result<()> {
    remove_journal_files(db_path)?;

    // Staging files are created owner-only.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staging
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }

    staging
        .persist(db_path)
        .map_err(|err| Error::Io(err.error))?;
    Ok(())
}

fn remove_journal_files(db_path: &Path) -> Result<()> {
    for suffix in ["-wal", "-shm", "-journal"] {
        let mut candidate = db_path.as_os_str().to_owned();
        candidate.push(suffix);
        let candidate = Path::new(&candidate);
        if candidate.exists() {
            debug!(path = %candidate.display(), "removing stale journal file");
            fs::remove_file(candidate)?;
        }
    }
    Ok(())
}
