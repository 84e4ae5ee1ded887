use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

use crate::Result;

pub const DIR_PREFIX: &str = "grammar-";

static LANG_DIR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^grammar-([a-z]{2,3})$").unwrap());

static LANG_FILE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<head>.+?)\.(?P<lang>[a-z]{2,3})\.md$").unwrap());

/// A `grammar-*` directory directly under the source root.
#[derive(Debug, Clone)]
pub struct LanguageDir {
    pub path: PathBuf,
    pub name: String,
    /// `None` when the name does not follow `grammar-<code>`.
    pub target_language: Option<String>,
}

/// Target language encoded in a `grammar-<code>` directory name.
pub fn language_from_dir_name(name: &str) -> Option<&str> {
    LANG_DIR_REGEX
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Splits `<headword>.<reader>.md` into (headword, reader language).
pub fn split_markdown_name(file_name: &str) -> Option<(&str, &str)> {
    let caps = LANG_FILE_REGEX.captures(file_name)?;
    Some((caps.name("head")?.as_str(), caps.name("lang")?.as_str()))
}

/// All `grammar-*` directories under `root`, sorted by name.
pub fn language_dirs(root: &Path) -> Result<Vec<LanguageDir>> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with(DIR_PREFIX) {
            continue;
        }
        dirs.push(LanguageDir {
            target_language: language_from_dir_name(&name).map(str::to_string),
            path: entry.into_path(),
            name,
        });
    }
    Ok(dirs)
}

/// Files in `dir` (not recursive) with the given extension, sorted by name.
pub fn files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some(extension)
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
