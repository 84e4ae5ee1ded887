//! Sample grammar source tree.
//!
//! Two Japanese particles with English explanations. The content is what the
//! client tests assert against, so change both together.

use anyhow::Result;
use std::fs;
use std::path::Path;

pub const GA_YAML: &str = "\
headword: が
jmdictId: 2028930
pattern:
  mecab: が/助詞
examples:
  - https://example.com/ga#text=が
alternative_forms:
  - ガ
example_sentences:
  - sentence: 太郎が学校に行く。
    translations:
      en: Taro goes to school.
    source_url: https://example.com/source/ga
test_data:
  non_matching_sentences:
    - 太郎は学校に行く。
variant: 1
";

pub const GA_EN_MD: &str = "\
# が

## Meaning
Marks the grammatical subject of a clause, often introducing new information.

## Guides
- ⭐ [Particle が explained](https://example.com/ga-guide) - Start here

## Q&A
- [が after question words](https://example.com/stackexchange-ga)

## Related
### は
- [が vs は](https://example.com/ga-vs-ha)
";

pub const HA_YAML: &str = "\
headword: は
jmdictId: 2028920
examples:
  - https://example.com/ha#text=は
alternativeForms: []
exampleSentences:
  - sentence: 私は学生です。
    translations:
      en: I am a student.
";

pub const HA_EN_MD: &str = "\
# は

## Meaning
Marks the topic of the sentence.

## Q&A
- [Topic vs subject](https://example.com/stackexchange-ha)
";

/// Files of the sample tree, relative to the source root.
pub const SAMPLE_FILES: [(&str, &str); 4] = [
    ("grammar-ja/が.yaml", GA_YAML),
    ("grammar-ja/が.en.md", GA_EN_MD),
    ("grammar-ja/は.yaml", HA_YAML),
    ("grammar-ja/は.en.md", HA_EN_MD),
];

/// Write a file under `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Write the sample tree under `root`.
pub fn write_sample_tree(root: &Path) -> Result<()> {
    for (relative, content) in SAMPLE_FILES {
        write_file(root, relative, content)?;
    }
    Ok(())
}
