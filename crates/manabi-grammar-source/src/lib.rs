// Error types
pub mod error;

// Directory and file naming rules
pub mod layout;

// Markdown explanation files
pub mod markdown;

// YAML record normalization
pub mod normalize;

// Source tree -> database rows
pub mod collect;

// Repository checks
pub mod validate;

// New entry scaffolding
pub mod stub;

pub use collect::collect_entries;
pub use error::{Error, Result};
pub use markdown::{MarkdownError, parse_markdown_sections};
pub use normalize::{coerce_variant, normalize_record};
pub use stub::{StubRequest, create_stub};
pub use validate::{Diagnostic, Severity, ValidationReport, validate_repository};
