use manabi_grammar_types::preferred_language_code;
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::collect::{load_entry, read_source, strip_bom};
use crate::layout;
use crate::markdown::parse_markdown_sections;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Formatted as a CI workflow annotation (`::error::...`).
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Error => write!(f, "::error::{}", self.message),
            Severity::Warning => write!(f, "::warning::{}", self.message),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<Diagnostic>,
    pub files_checked: usize,
}

impl ValidationReport {
    fn error(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            message: message.into(),
        });
    }

    fn warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("{}", message);
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            message,
        });
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn is_ok(&self) -> bool {
        self.errors().next().is_none()
    }
}

/// Check every `grammar-*` directory under `root`.
///
/// Unlike [`crate::collect_entries`] this keeps going after a problem so a
/// single run reports everything wrong with the tree. Only I/O failures on
/// the tree itself abort.
pub fn validate_repository(root: &Path) -> Result<ValidationReport> {
    let mut report = ValidationReport::default();

    for dir in layout::language_dirs(root)? {
        let Some(target_language) = dir.target_language.as_deref() else {
            report.error(format!(
                "Invalid grammar directory name '{}'. Use grammar-xx with lowercase ISO/BCP47 code.",
                dir.name
            ));
            continue;
        };

        if let Some(preferred) = preferred_language_code(target_language) {
            report.warning(format!(
                "Language code '{}' is aliased to '{}'. Prefer that code going forward.",
                target_language, preferred
            ));
        }

        check_markdown_files(&dir.path, &mut report)?;
        check_yaml_files(&dir.path, target_language, &mut report)?;
    }

    debug!(
        files = report.files_checked,
        diagnostics = report.diagnostics.len(),
        "validated grammar repository"
    );
    Ok(report)
}

fn check_markdown_files(dir: &Path, report: &mut ValidationReport) -> Result<()> {
    for md_path in layout::files_with_extension(dir, "md")? {
        report.files_checked += 1;
        let file_name = layout::file_name(&md_path);

        let Some((headword, _reader)) = layout::split_markdown_name(&file_name) else {
            report.error(format!(
                "Invalid markdown filename '{}'. Must be <headword>.<yy>.md with yy lowercase.",
                file_name
            ));
            continue;
        };

        if !dir.join(format!("{}.yaml", headword)).exists() {
            report.error(format!(
                "Markdown '{}' has no sibling YAML '{}.yaml'.",
                file_name, headword
            ));
        }

        let text = match read_source(&md_path) {
            Ok(text) => text,
            Err(err) => {
                report.error(err.to_string());
                continue;
            }
        };
        let text = strip_bom(&text);
        if !text.starts_with(&format!("# {}", headword)) {
            report.error(format!(
                "Markdown '{}' must start with H1 '# {}'.",
                file_name, headword
            ));
            continue;
        }

        if let Err(err) = parse_markdown_sections(text) {
            report.error(format!("{}: {}", md_path.display(), err));
        }
    }
    Ok(())
}

fn check_yaml_files(dir: &Path, target_language: &str, report: &mut ValidationReport) -> Result<()> {
    for yaml_path in layout::files_with_extension(dir, "yaml")? {
        report.files_checked += 1;
        if let Err(err) = load_entry(&yaml_path, target_language, Default::default()) {
            report.error(err.to_string());
        }
    }
    Ok(())
}
