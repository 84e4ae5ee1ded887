use rusqlite::Connection;

use crate::{Error, Result};

pub const TABLE_NAME: &str = "grammar";

// Builders have shipped two spellings of the language column, and the
// earliest files predate variants. Reads adapt to whatever the file has;
// writes always use the current layout below.
const LANGUAGE_COLUMNS: [&str; 2] = ["targetLanguage", "target_language"];

pub(crate) const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS grammar (
        targetLanguage TEXT NOT NULL,
        headword       TEXT NOT NULL,
        variant        INTEGER NOT NULL DEFAULT 1,
        data           TEXT NOT NULL,
        CHECK (variant >= 1),
        PRIMARY KEY (targetLanguage, headword, variant)
    ) STRICT, WITHOUT ROWID;
"#;

/// Column layout of the `grammar` table in an opened file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Name of the target language column.
    pub language_column: &'static str,
    /// Whether rows carry a `variant` column. Without one every row is variant 1.
    pub has_variant: bool,
}

impl Layout {
    pub const CURRENT: Layout = Layout {
        language_column: "targetLanguage",
        has_variant: true,
    };

    fn variant_expr(&self) -> &'static str {
        if self.has_variant { "variant" } else { "1" }
    }

    pub(crate) fn select_all_sql(&self) -> String {
        format!(
            r#"
            SELECT {lang}, headword, {variant}, data
            FROM grammar
            ORDER BY {lang}, headword, {variant}
            "#,
            lang = self.language_column,
            variant = self.variant_expr(),
        )
    }

    pub(crate) fn select_one_sql(&self) -> String {
        format!(
            r#"
            SELECT {lang}, headword, {variant}, data
            FROM grammar
            WHERE {lang} = ?1 AND headword = ?2 AND {variant} = ?3
            LIMIT 1
            "#,
            lang = self.language_column,
            variant = self.variant_expr(),
        )
    }

    pub(crate) fn languages_sql(&self) -> String {
        format!(
            "SELECT DISTINCT {lang} FROM grammar ORDER BY {lang}",
            lang = self.language_column
        )
    }
}

pub(crate) fn detect_layout(conn: &Connection) -> Result<Layout> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let columns = stmt
        .query_map([TABLE_NAME], |row| row.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        return Err(Error::Schema(format!("no '{}' table", TABLE_NAME)));
    }

    let has = |name: &str| columns.iter().any(|c| c == name);

    let language_column = LANGUAGE_COLUMNS
        .into_iter()
        .find(|name| has(name))
        .ok_or_else(|| {
            Error::Schema(format!(
                "'{}' table has no target language column (found: {})",
                TABLE_NAME,
                columns.join(", ")
            ))
        })?;

    for required in ["headword", "data"] {
        if !has(required) {
            return Err(Error::Schema(format!(
                "'{}' table has no '{}' column",
                TABLE_NAME, required
            )));
        }
    }

    Ok(Layout {
        language_column,
        has_variant: has("variant"),
    })
}
