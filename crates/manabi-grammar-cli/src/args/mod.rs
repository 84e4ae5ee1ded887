mod commands;
mod enums;

pub use commands::*;
pub use enums::*;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "manabi-grammar")]
#[command(about = "Build, validate and query the Manabi grammar database", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Database to query (overrides MANABI_GRAMMAR_DB and the config file)"
    )]
    pub db: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Config file (default: ./manabi-grammar.toml, then the user config directory)"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}
