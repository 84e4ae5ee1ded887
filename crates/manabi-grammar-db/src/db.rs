use manabi_grammar_types::{DEFAULT_VARIANT, EntryKey, GrammarEntry};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use tracing::debug;

use crate::queries::entry;
use crate::schema::{self, Layout};
use crate::{Error, Result};

// Offsets of the file format write/read version bytes in the SQLite header.
// 2 means WAL, which an in-memory image cannot use.
const HEADER_WRITE_VERSION: usize = 18;
const HEADER_READ_VERSION: usize = 19;
const HEADER_SIZE: usize = 100;
const HEADER_MAGIC: &[u8] = b"SQLite format 3\0";

/// Read-only handle on a grammar database.
///
/// Every query runs against the embedded SQLite engine; this type only maps
/// rows into [`GrammarEntry`] values. Closing consumes the handle, so a
/// closed database cannot be queried.
pub struct GrammarDb {
    conn: Connection,
    layout: Layout,
}

impl GrammarDb {
    /// Open an existing database file without write access.
    pub fn open(db_path: &Path) -> Result<Self> {
        if !db_path.is_file() {
            return Err(Error::NotFound(db_path.to_path_buf()));
        }

        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        let layout = schema::detect_layout(&conn)?;
        debug!(path = %db_path.display(), ?layout, "opened grammar database");

        Ok(Self { conn, layout })
    }

    /// Open a read-only in-memory copy of a database image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::Corrupt(format!(
                "database image is {} bytes, shorter than the {}-byte SQLite header",
                bytes.len(),
                HEADER_SIZE
            )));
        }
        if !bytes.starts_with(HEADER_MAGIC) {
            return Err(Error::Corrupt(
                "database image does not start with the SQLite header".to_string(),
            ));
        }

        let mut image = bytes.to_vec();
        if image[HEADER_WRITE_VERSION] == 2 && image[HEADER_READ_VERSION] == 2 {
            image[HEADER_WRITE_VERSION] = 1;
            image[HEADER_READ_VERSION] = 1;
        }

        let mut conn = Connection::open_in_memory()?;
        let len = image.len();
        conn.deserialize_read_exact("main", image.as_slice(), len, true)?;

        let layout = schema::detect_layout(&conn)?;
        debug!(bytes = len, ?layout, "loaded grammar database image");

        Ok(Self { conn, layout })
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Every entry ordered by target language, headword and variant.
    pub fn all(&self) -> Result<Vec<GrammarEntry>> {
        let entries = entry::get_all(&self.conn, &self.layout)?;
        debug!(rows = entries.len(), "fetched all grammar entries");
        Ok(entries)
    }

    /// Look up a single entry; `None` when no row has this key.
    pub fn get(
        &self,
        target_language: &str,
        headword: &str,
        variant: u32,
    ) -> Result<Option<GrammarEntry>> {
        entry::get(&self.conn, &self.layout, target_language, headword, variant)
    }

    /// Look up the first variant of a headword.
    pub fn get_default(&self, target_language: &str, headword: &str) -> Result<Option<GrammarEntry>> {
        self.get(target_language, headword, DEFAULT_VARIANT)
    }

    pub fn get_by_key(&self, key: &EntryKey) -> Result<Option<GrammarEntry>> {
        self.get(&key.target_language, &key.headword, key.variant)
    }

    /// Entries for which `predicate` returns true, in [`GrammarDb::all`] order.
    pub fn search<P>(&self, mut predicate: P) -> Result<Vec<GrammarEntry>>
    where
        P: FnMut(&GrammarEntry) -> bool,
    {
        Ok(self
            .all()?
            .into_iter()
            .filter(|entry| predicate(entry))
            .collect())
    }

    pub fn count(&self) -> Result<usize> {
        entry::count(&self.conn)
    }

    /// Distinct target languages, sorted.
    pub fn languages(&self) -> Result<Vec<String>> {
        entry::languages(&self.conn, &self.layout)
    }

    /// Close the underlying connection and report any error from SQLite.
    /// Dropping the handle also closes it, silently.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| Error::Database(err))
    }
}
