use anyhow::Result;
use manabi_grammar_source::{StubRequest, create_stub};
use std::path::Path;

pub fn handle(
    root: &Path,
    headword: String,
    target_lang: String,
    reader_lang: String,
    force: bool,
) -> Result<()> {
    let request = StubRequest::new(headword, &target_lang, &reader_lang, force)?;

    for path in create_stub(root, &request)? {
        let shown = path.strip_prefix(root).unwrap_or(&path);
        println!("Created {}", shown.display());
    }

    Ok(())
}
