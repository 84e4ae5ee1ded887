use crate::OutputFormat;
use anyhow::Result;
use manabi_grammar_types::{EntryKey, GrammarEntry, GrammarRecord, InfoSections, LinkEntry};
use std::fmt::{self, Write};

pub fn print_entries(entries: &[GrammarEntry], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entries)?),
        OutputFormat::Plain => {
            for entry in entries {
                println!("{}", summary_line(entry));
            }
        }
    }
    Ok(())
}

pub fn print_entry(entry: &GrammarEntry, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entry)?),
        OutputFormat::Plain => print!("{}", render_detail(entry)?),
    }
    Ok(())
}

/// `ja/が#1\ten,fr`, with `-` when no explanation exists.
fn summary_line(entry: &GrammarEntry) -> String {
    let readers = entry.reader_languages();
    let readers = if readers.is_empty() {
        "-".to_string()
    } else {
        readers.join(",")
    };
    format!("{}\t{}", entry.key(), readers)
}

fn render_detail(entry: &GrammarEntry) -> Result<String> {
    let record = entry.record()?;
    let mut out = String::new();
    write_detail(&mut out, &entry.key(), &record)?;
    Ok(out)
}

fn write_detail(out: &mut String, key: &EntryKey, record: &GrammarRecord) -> fmt::Result {
    writeln!(out, "{}", key)?;
    if let Some(id) = &record.jmdict_id {
        writeln!(out, "JMdict: {}", id)?;
    }
    if let Some(level) = &record.level_label {
        writeln!(out, "Level: {}", level)?;
    }
    if !record.alternative_forms.is_empty() {
        writeln!(out, "Alternative forms: {}", record.alternative_forms.join(", "))?;
    }
    for sentence in &record.example_sentences {
        writeln!(out, "Example: {}", sentence.sentence)?;
        for (lang, translation) in &sentence.translations {
            writeln!(out, "  [{}] {}", lang, translation)?;
        }
    }

    for (reader, sections) in &record.info {
        writeln!(out)?;
        writeln!(out, "[{}]", reader)?;
        write_sections(out, sections)?;
    }
    Ok(())
}

fn write_sections(out: &mut String, sections: &InfoSections) -> fmt::Result {
    if let Some(meaning) = &sections.meaning {
        writeln!(out, "{}", meaning)?;
    }
    for (title, links) in [("Guides", &sections.guides), ("Q&A", &sections.qa)] {
        if let Some(links) = links {
            writeln!(out, "{}:", title)?;
            for link in links {
                writeln!(out, "  {}", render_link(link))?;
            }
        }
    }
    if let Some(related) = &sections.related {
        writeln!(out, "Related:")?;
        for (heading, links) in related {
            writeln!(out, "  {}:", heading)?;
            for link in links {
                writeln!(out, "    {}", render_link(link))?;
            }
        }
    }
    Ok(())
}

fn render_link(link: &LinkEntry) -> String {
    let star = if link.recommended { "⭐ " } else { "" };
    match &link.description {
        Some(desc) => format!("{}{} <{}> - {}", star, link.name, link.url, desc),
        None => format!("{}{} <{}>", star, link.name, link.url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(data: serde_json::Value) -> GrammarEntry {
        GrammarEntry {
            target_language: "ja".to_string(),
            headword: "が".to_string(),
            variant: 1,
            data,
        }
    }

    #[test]
    fn test_summary_line() {
        let with_info = entry(json!({ "info": { "en": {}, "fr": {} } }));
        assert_eq!(summary_line(&with_info), "ja/が#1\ten,fr");

        let without = entry(json!({}));
        assert_eq!(summary_line(&without), "ja/が#1\t-");
    }

    #[test]
    fn test_render_detail() {
        let ga = entry(json!({
            "jmdictId": 2028930,
            "alternativeForms": ["ガ"],
            "exampleSentences": [
                { "sentence": "太郎が学校に行く。", "translations": { "en": "Taro goes to school." } }
            ],
            "info": {
                "en": {
                    "Meaning": "Marks the subject.",
                    "Guides": [
                        { "url": "https://example.com/g", "name": "Guide", "description": "Start here", "recommended": true }
                    ],
                    "Related": {
                        "は": [ { "url": "https://example.com/r", "name": "が vs は" } ]
                    }
                }
            }
        }));

        insta::assert_snapshot!(render_detail(&ga).unwrap(), @r"
        ja/が#1
        JMdict: 2028930
        Alternative forms: ガ
        Example: 太郎が学校に行く。
          [en] Taro goes to school.

        [en]
        Marks the subject.
        Guides:
          ⭐ Guide <https://example.com/g> - Start here
        Related:
          は:
            が vs は <https://example.com/r>
        ");
    }

    #[test]
    fn test_render_detail_header_uses_row_key() {
        let katakana = entry(json!({
            "headword": "ガ",
            "targetLanguage": "en",
            "variant": 3
        }));

        let detail = render_detail(&katakana).unwrap();
        assert_eq!(detail.lines().next(), Some("ja/が#1"));
    }
}
