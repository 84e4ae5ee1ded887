pub mod entry;
pub mod error;
pub mod language;
pub mod record;

pub use entry::*;
pub use error::{Error, Result};
pub use language::*;
pub use record::*;
