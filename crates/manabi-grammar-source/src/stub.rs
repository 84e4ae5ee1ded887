use manabi_grammar_types::LanguageCode;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::layout::DIR_PREFIX;
use crate::{Error, Result};

/// Parameters for scaffolding a new grammar entry.
#[derive(Debug, Clone)]
pub struct StubRequest {
    pub headword: String,
    /// Language of the grammar point (`grammar-<target>/`).
    pub target_lang: LanguageCode,
    /// Language of the explanation file (`<headword>.<reader>.md`).
    pub reader_lang: LanguageCode,
    /// Overwrite existing files.
    pub force: bool,
}

impl StubRequest {
    /// Checks both language codes.
    pub fn new(
        headword: impl Into<String>,
        target_lang: &str,
        reader_lang: &str,
        force: bool,
    ) -> Result<Self> {
        let parse = |role: &'static str, code: &str| {
            LanguageCode::parse(code).map_err(|_| Error::InvalidLanguage {
                role,
                code: code.to_string(),
            })
        };

        Ok(Self {
            headword: headword.into(),
            target_lang: parse("target", target_lang)?,
            reader_lang: parse("reader", reader_lang)?,
            force,
        })
    }

    pub fn yaml_path(&self, root: &Path) -> PathBuf {
        self.dir(root).join(format!("{}.yaml", self.headword))
    }

    pub fn markdown_path(&self, root: &Path) -> PathBuf {
        self.dir(root)
            .join(format!("{}.{}.md", self.headword, self.reader_lang))
    }

    fn dir(&self, root: &Path) -> PathBuf {
        root.join(format!("{}{}", DIR_PREFIX, self.target_lang))
    }
}

/// The headword is written as a double-quoted scalar so values such as
/// `123`, `null` or `a: b` stay strings.
pub fn yaml_template(headword: &str, target_lang: &str, reader_lang: &str) -> String {
    let quoted = quote_scalar(headword);
    format!(
        "# YAML stub for {quoted} ({target_lang})
headword: {quoted}
jmdictId: TODO
pattern:
  mecab: TODO
examples:
  - https://example.com/example#text=TODO
alternativeForms: []
exampleSentences:
  - sentence: TODO
    translations:
      {reader_lang}: TODO translation
    sourceUrl: https://example.com/source
testData:
  nonMatchingSentences:
    - TODO non-matching sentence
variant: 1
"
    )
}

// A JSON string literal is a valid YAML double-quoted scalar.
fn quote_scalar(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

pub fn markdown_template(headword: &str) -> String {
    format!(
        "# {headword}

## Meaning
Provide a concise explanation of the grammar point. You may include lower-level subheadings (###) and examples here.

## Guides
- [Resource title](https://example.com/guide) - Optional description

## Q&A
- [Example discussion](https://example.com/qna)

## Related
### Related Headword
- [Explain the difference](https://example.com/related)
"
    )
}

/// Write the YAML and Markdown templates for a new entry.
///
/// Both targets are checked before anything is written, so a refused stub
/// leaves the tree untouched.
pub fn create_stub(root: &Path, request: &StubRequest) -> Result<Vec<PathBuf>> {
    let files = [
        (
            request.yaml_path(root),
            yaml_template(
                &request.headword,
                request.target_lang.as_str(),
                request.reader_lang.as_str(),
            ),
        ),
        (
            request.markdown_path(root),
            markdown_template(&request.headword),
        ),
    ];

    if !request.force
        && let Some((existing, _)) = files.iter().find(|(path, _)| path.exists())
    {
        return Err(Error::AlreadyExists(existing.clone()));
    }

    let mut written = Vec::with_capacity(files.len());
    for (path, content) in files {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        info!(path = %path.display(), "created stub");
        written.push(path);
    }

    Ok(written)
}
