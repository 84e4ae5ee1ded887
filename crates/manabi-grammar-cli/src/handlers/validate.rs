use anyhow::Result;
use manabi_grammar_source::validate_repository;
use std::path::Path;
use tracing::info;

pub fn handle(root: &Path) -> Result<()> {
    let report = validate_repository(root)?;

    for diagnostic in &report.diagnostics {
        println!("{}", diagnostic);
    }

    let errors = report.errors().count();
    if errors > 0 {
        anyhow::bail!(
            "{} problem{} found in {}",
            errors,
            if errors == 1 { "" } else { "s" },
            root.display()
        );
    }

    info!(files = report.files_checked, "grammar source tree is valid");
    Ok(())
}
