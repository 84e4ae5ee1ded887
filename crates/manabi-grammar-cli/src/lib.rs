// Command-line front end for the grammar database.
//
// `build`, `validate` and `stub` work on a source tree of grammar-<lang>/
// directories; `entry` reads a built database and never writes to it.

mod args;
mod commands;
pub mod config;
mod handlers;
mod logging;

pub use args::{Cli, Commands, EntryCommand, LogLevel, OutputFormat};
pub use commands::run;
