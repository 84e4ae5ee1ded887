use super::enums::OutputFormat;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Build the SQLite database from a grammar source tree")]
    Build {
        #[arg(long, help = "Source tree containing grammar-<lang>/ directories")]
        root: Option<PathBuf>,

        #[arg(long, help = "Database file to write (replaced if it exists)")]
        output: Option<PathBuf>,
    },

    #[command(about = "Check a grammar source tree and report every problem")]
    Validate {
        #[arg(long, help = "Source tree containing grammar-<lang>/ directories")]
        root: Option<PathBuf>,
    },

    #[command(about = "Create YAML and Markdown templates for a new grammar entry")]
    Stub {
        #[arg(long)]
        headword: String,

        #[arg(long, help = "Language of the grammar point (e.g. ja)")]
        target_lang: String,

        #[arg(long, help = "Language of the explanation (e.g. en)")]
        reader_lang: String,

        #[arg(long, help = "Overwrite existing files")]
        force: bool,

        #[arg(long, help = "Source tree containing grammar-<lang>/ directories")]
        root: Option<PathBuf>,
    },

    #[command(about = "Read entries from a built database")]
    Entry {
        #[command(subcommand)]
        command: EntryCommand,
    },
}

#[derive(Subcommand)]
pub enum EntryCommand {
    #[command(about = "List every entry")]
    List {
        #[arg(long, help = "Only entries for this target language")]
        language: Option<String>,

        #[arg(long, default_value = "plain")]
        format: OutputFormat,
    },

    #[command(about = "Show one entry")]
    Get {
        #[arg(help = "Target language (e.g. ja)")]
        language: String,

        headword: String,

        #[arg(long, default_value = "1")]
        variant: u32,

        #[arg(long, default_value = "plain")]
        format: OutputFormat,
    },

    #[command(about = "Find entries matching every given filter")]
    Search {
        #[arg(long, help = "Headword or an alternative form contains this text")]
        headword_contains: Option<String>,

        #[arg(long, help = "Only entries for this target language")]
        language: Option<String>,

        #[arg(long, help = "Has an explanation in this reader language")]
        has_reader: Option<String>,

        #[arg(long)]
        jmdict_id: Option<String>,

        #[arg(long, default_value = "plain")]
        format: OutputFormat,
    },
}
