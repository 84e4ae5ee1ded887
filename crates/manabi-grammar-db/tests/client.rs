//! Integration tests for the read-only client
//!
//! A small database holding が and は is written once per test and read back
//! through each of the three read operations.

use manabi_grammar_db::{Error, GrammarDb, write_database};
use manabi_grammar_types::GrammarEntry;
use rusqlite::Connection;
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn ga() -> GrammarEntry {
    GrammarEntry {
        target_language: "ja".to_string(),
        headword: "が".to_string(),
        variant: 1,
        data: json!({
            "headword": "が",
            "targetLanguage": "ja",
            "variant": 1,
            "examples": ["https://example.com/ga#text=が"],
            "alternativeForms": ["ガ"],
            "exampleSentences": [
                { "sentence": "太郎が学校に行く。", "translations": { "en": "Taro goes to school." } }
            ],
            "testData": { "nonMatchingSentences": ["太郎は学校に行く。"] },
            "info": {
                "en": {
                    "Meaning": "Marks the grammatical subject of a clause.",
                    "Guides": [
                        { "url": "https://example.com/ga-guide", "name": "Particle が", "recommended": true }
                    ],
                    "Related": {
                        "は": [ { "url": "https://example.com/ga-vs-ha", "name": "が vs は" } ]
                    }
                }
            }
        }),
    }
}

fn ha() -> GrammarEntry {
    GrammarEntry {
        target_language: "ja".to_string(),
        headword: "は".to_string(),
        variant: 1,
        data: json!({
            "headword": "は",
            "targetLanguage": "ja",
            "variant": 1,
            "examples": [],
            "alternativeForms": [],
            "info": {
                "en": {
                    "Q&A": [
                        { "url": "https://example.com/stackexchange-ha", "name": "When to use は" }
                    ]
                }
            }
        }),
    }
}

struct Fixture {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("manabi-grammar.sqlite");
        write_database(&path, &[ga(), ha()]).unwrap();
        Self {
            _temp_dir: temp_dir,
            path,
        }
    }

    fn open(&self) -> GrammarDb {
        GrammarDb::open(&self.path).unwrap()
    }
}

#[test]
fn test_all_returns_parsed_json() {
    let fixture = Fixture::new();
    let db = fixture.open();

    let rows = db.all().unwrap();
    assert_eq!(rows.len(), 2);

    let ga = rows.iter().find(|row| row.headword == "が").unwrap();
    assert_eq!(ga.variant, 1);
    assert!(ga.data.get("examples").is_some());
    assert_eq!(ga.data["alternativeForms"][0], "ガ");
    assert_eq!(ga.data["exampleSentences"][0]["sentence"], "太郎が学校に行く。");
    assert_eq!(ga.data["testData"]["nonMatchingSentences"][0], "太郎は学校に行く。");
    assert_eq!(ga.data["info"]["en"]["Guides"][0]["url"], "https://example.com/ga-guide");
    assert_eq!(ga.data["info"]["en"]["Guides"][0]["recommended"], true);
    assert!(
        ga.data["info"]["en"]["Meaning"]
            .as_str()
            .unwrap()
            .contains("subject")
    );
}

#[test]
fn test_get_single_headword() {
    let fixture = Fixture::new();
    let db = fixture.open();

    let ha = db.get("ja", "は", 1).unwrap().expect("は should exist");
    assert_eq!(ha.headword, "は");
    assert!(
        ha.data["info"]["en"]["Q&A"][0]["url"]
            .as_str()
            .unwrap()
            .contains("stackexchange-ha")
    );
}

#[test]
fn test_search_filters_results() {
    let fixture = Fixture::new();
    let db = fixture.open();

    let only_ga = db.search(|row| row.headword == "が").unwrap();
    assert_eq!(only_ga.len(), 1);
    assert!(only_ga[0].data["info"]["en"]["Related"].get("は").is_some());
}

#[test]
fn test_get_missing_headword_returns_none() {
    let fixture = Fixture::new();
    let db = fixture.open();

    assert!(db.get("ja", "不存在", 1).unwrap().is_none());
}

#[test]
fn test_typed_record_view() {
    let fixture = Fixture::new();
    let db = fixture.open();

    let record = db.get_default("ja", "が").unwrap().unwrap().record().unwrap();
    let en = &record.info["en"];
    assert!(en.guides.as_ref().unwrap()[0].recommended);
    assert_eq!(en.related.as_ref().unwrap()["は"][0].name, "が vs は");
}

#[test]
fn test_from_bytes_serves_same_rows() {
    let fixture = Fixture::new();
    let bytes = std::fs::read(&fixture.path).unwrap();

    let from_file = fixture.open().all().unwrap();
    let from_bytes = GrammarDb::from_bytes(&bytes).unwrap().all().unwrap();
    assert_eq!(from_file, from_bytes);
}

#[test]
fn test_open_does_not_write() {
    let fixture = Fixture::new();
    let before = std::fs::read(&fixture.path).unwrap();

    let db = fixture.open();
    db.all().unwrap();
    db.close().unwrap();

    assert_eq!(std::fs::read(&fixture.path).unwrap(), before);
}

fn write_legacy_db(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE grammar (
            target_language TEXT NOT NULL,
            headword        TEXT NOT NULL,
            data            TEXT NOT NULL,
            PRIMARY KEY (target_language, headword)
        ) STRICT, WITHOUT ROWID;

        INSERT INTO grammar VALUES ('ja', 'が', '{"alternativeForms":["ガ"]}');
        INSERT INTO grammar VALUES ('ja', 'は', '{"alternativeForms":[]}');
        "#,
    )
    .unwrap();
}

#[test]
fn test_reads_legacy_layout_as_variant_one() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("legacy.sqlite");
    write_legacy_db(&path);

    let db = GrammarDb::open(&path).unwrap();
    assert!(!db.layout().has_variant);

    let rows = db.all().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.variant == 1));

    assert!(db.get("ja", "が", 1).unwrap().is_some());
    assert!(db.get("ja", "が", 2).unwrap().is_none());

    let record = db.get("ja", "が", 1).unwrap().unwrap().record().unwrap();
    assert_eq!(record.headword, "が");
    assert_eq!(record.target_language, "ja");
}

#[test]
fn test_malformed_payload_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.sqlite");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE grammar (
                targetLanguage TEXT NOT NULL,
                headword       TEXT NOT NULL,
                variant        INTEGER NOT NULL DEFAULT 1,
                data           TEXT NOT NULL,
                PRIMARY KEY (targetLanguage, headword, variant)
            );
            INSERT INTO grammar VALUES ('ja', 'が', 1, '{not json');
            "#,
        )
        .unwrap();
    }

    let db = GrammarDb::open(&path).unwrap();
    let err = db.all().unwrap_err();
    assert!(matches!(err, Error::Json { .. }));
    assert!(err.to_string().contains("ja/が#1"));
}

#[test]
fn test_database_without_grammar_table() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.sqlite");
    Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE other (id INTEGER);")
        .unwrap();

    let err = GrammarDb::open(&path).err().unwrap();
    assert!(matches!(err, Error::Schema(_)));
}

#[test]
fn test_from_bytes_reads_wal_mode_image() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("wal.sqlite");
    {
        let conn = Connection::open(&path).unwrap();
        conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get::<_, String>(0))
            .unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE grammar (
                targetLanguage TEXT NOT NULL,
                headword       TEXT NOT NULL,
                variant        INTEGER NOT NULL DEFAULT 1,
                data           TEXT NOT NULL,
                PRIMARY KEY (targetLanguage, headword, variant)
            );
            INSERT INTO grammar VALUES ('ja', 'が', 1, '{"alternativeForms":["ガ"]}');
            INSERT INTO grammar VALUES ('ja', 'は', 1, '{"alternativeForms":[]}');
            "#,
        )
        .unwrap();
        conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))
            .unwrap();
    }

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!((bytes[18], bytes[19]), (2, 2));

    let db = GrammarDb::from_bytes(&bytes).unwrap();
    let headwords: Vec<String> = db.all().unwrap().into_iter().map(|e| e.headword).collect();
    assert_eq!(headwords.len(), 2);
    assert!(headwords.contains(&"が".to_string()));
    assert!(db.get("ja", "は", 1).unwrap().is_some());
}

#[test]
fn test_reads_snake_case_layout_with_variants() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("variants.sqlite");
    Connection::open(&path)
        .unwrap()
        .execute_batch(
            r#"
            CREATE TABLE grammar (
                target_language TEXT NOT NULL,
                headword        TEXT NOT NULL,
                variant         INTEGER NOT NULL DEFAULT 1,
                data            TEXT NOT NULL,
                PRIMARY KEY (target_language, headword, variant)
            );
            INSERT INTO grammar VALUES ('ja', 'が', 1, '{"meaning":"subject"}');
            INSERT INTO grammar VALUES ('ja', 'が', 2, '{"meaning":"but"}');
            "#,
        )
        .unwrap();

    let db = GrammarDb::open(&path).unwrap();
    let layout = db.layout();
    assert_eq!(layout.language_column, "target_language");
    assert!(layout.has_variant);

    let mut variants: Vec<u32> = db.all().unwrap().iter().map(|e| e.variant).collect();
    variants.sort();
    assert_eq!(variants, vec![1, 2]);

    let second = db.get("ja", "が", 2).unwrap().unwrap();
    assert_eq!(second.variant, 2);
    assert_eq!(second.data["meaning"], "but");
    assert!(db.get("ja", "が", 3).unwrap().is_none());
}
