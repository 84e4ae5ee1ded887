//! Parser for `<headword>.<reader>.md` explanation files.
//!
//! The format is deliberately narrow so every file converts losslessly into
//! [`InfoSections`]:
//!
//! ```text
//! # が
//!
//! ## Meaning
//! Free prose, `###` subheadings allowed.
//!
//! ## Guides
//! - ⭐ [Title](https://example.com/guide) - Optional description
//!
//! ## Q&A
//! - [Discussion](https://example.com/qa)
//!
//! ## Related
//! ### は
//! - [が vs は](https://example.com/compare)
//! ```

use manabi_grammar_types::{InfoSections, LinkEntry};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

pub const ALLOWED_SECTIONS: [&str; 4] = ["Guides", "Meaning", "Q&A", "Related"];

static LINK_ITEM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(?P<name>[^\]]+)\]\((?P<url>https?://[^\s)]+)\)(?:\s*-\s*(?P<desc>.+))?$")
        .unwrap()
});

/// Structural problem in a Markdown file. `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownError {
    pub line: usize,
    pub message: String,
}

impl MarkdownError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for MarkdownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for MarkdownError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Meaning,
    Guides,
    QA,
    Related,
}

impl Section {
    fn parse(heading: &str) -> Option<Self> {
        match heading {
            "Meaning" => Some(Section::Meaning),
            "Guides" => Some(Section::Guides),
            "Q&A" => Some(Section::QA),
            "Related" => Some(Section::Related),
            _ => None,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Section::Meaning => "Meaning",
            Section::Guides => "Guides",
            Section::QA => "Q&A",
            Section::Related => "Related",
        }
    }
}

#[derive(Default)]
struct Builder {
    meaning: Option<Vec<String>>,
    guides: Option<Vec<LinkEntry>>,
    qa: Option<Vec<LinkEntry>>,
    related: Option<BTreeMap<String, Vec<LinkEntry>>>,
}

impl Builder {
    fn open(&mut self, section: Section) {
        match section {
            Section::Meaning => self.meaning = Some(Vec::new()),
            Section::Guides => self.guides = Some(Vec::new()),
            Section::QA => self.qa = Some(Vec::new()),
            Section::Related => self.related = Some(BTreeMap::new()),
        }
    }

    fn finish(self) -> InfoSections {
        InfoSections {
            meaning: self
                .meaning
                .map(|lines| lines.join("\n").trim().to_string()),
            guides: self.guides,
            qa: self.qa,
            related: self.related,
        }
    }
}

/// Parse an explanation file into its sections.
pub fn parse_markdown_sections(text: &str) -> Result<InfoSections, MarkdownError> {
    let mut sections = Builder::default();
    let mut h2: Option<Section> = None;
    let mut h3: Option<String> = None;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;

        if line.starts_with("# ") {
            h2 = None;
            h3 = None;
            continue;
        }

        if let Some(heading) = line.strip_prefix("## ") {
            let heading = heading.trim();
            let section = Section::parse(heading).ok_or_else(|| {
                MarkdownError::new(
                    line_no,
                    format!("Unknown H2 '{}'. Allowed: {:?}", heading, ALLOWED_SECTIONS),
                )
            })?;
            sections.open(section);
            h2 = Some(section);
            h3 = None;
            continue;
        }

        if h2 == Some(Section::Meaning) {
            if let Some(buffer) = sections.meaning.as_mut() {
                buffer.push(line.to_string());
            }
            continue;
        }

        if let Some(heading) = line.strip_prefix("### ") {
            if h2 != Some(Section::Related) {
                return Err(MarkdownError::new(
                    line_no,
                    format!("H3 only allowed under '## Related' or '## Meaning': '{}'", line),
                ));
            }
            let heading = heading.trim();
            if heading.is_empty() {
                return Err(MarkdownError::new(line_no, "Empty '###' heading under Related"));
            }
            sections
                .related
                .get_or_insert_with(BTreeMap::new)
                .entry(heading.to_string())
                .or_default();
            h3 = Some(heading.to_string());
            continue;
        }

        let stripped = line.trim();
        let Some(section) = h2 else {
            if !stripped.is_empty() {
                return Err(MarkdownError::new(
                    line_no,
                    format!("Unexpected content outside a recognised section: '{}'", line),
                ));
            }
            continue;
        };

        if stripped.is_empty() {
            continue;
        }

        let link = parse_link_item(stripped).map_err(|message| {
            MarkdownError::new(
                line_no,
                format!("{} under '## {}': '{}'", message, section.title(), stripped),
            )
        })?;

        match section {
            Section::Guides => sections.guides.get_or_insert_with(Vec::new).push(link),
            Section::QA => sections.qa.get_or_insert_with(Vec::new).push(link),
            Section::Related => {
                let Some(heading) = h3.as_ref() else {
                    return Err(MarkdownError::new(
                        line_no,
                        format!(
                            "Links under '## Related' must be grouped by '### <headword>': '{}'",
                            line
                        ),
                    ));
                };
                sections
                    .related
                    .get_or_insert_with(BTreeMap::new)
                    .entry(heading.clone())
                    .or_default()
                    .push(link);
            }
            Section::Meaning => unreachable!("Meaning lines are consumed above"),
        }
    }

    Ok(sections.finish())
}

fn parse_link_item(stripped: &str) -> Result<LinkEntry, &'static str> {
    let (item, recommended) = if let Some(rest) = stripped.strip_prefix("- ⭐ ") {
        (rest, true)
    } else if let Some(rest) = stripped.strip_prefix("- ") {
        (rest, false)
    } else {
        return Err("Only dash lists allowed");
    };

    let caps = LINK_ITEM_REGEX
        .captures(item)
        .ok_or("Invalid list item")?;

    let description = caps
        .name("desc")
        .map(|m| m.as_str().trim().to_string())
        .filter(|d| !d.is_empty());

    Ok(LinkEntry {
        url: caps["url"].to_string(),
        name: caps["name"].to_string(),
        description,
        recommended,
    })
}
