// Read-only client over a pre-built grammar database.
// The write path only exists for the builder; clients never open for writing.

mod db;
mod error;
mod queries;
mod schema;
mod writer;

// Public API
pub use db::GrammarDb;
pub use error::{Error, Result};
pub use schema::{Layout, TABLE_NAME};
pub use writer::write_database;
