use super::args::{Cli, Commands, EntryCommand};
use super::handlers;
use super::handlers::entry_search::SearchFilter;
use crate::config::Config;
use crate::logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let config = Config::discover(cli.config.as_deref())?;

    match cli.command {
        Commands::Build { root, output } => handlers::build::handle(
            &config.source_root(root.as_deref()),
            &config.output_path(output.as_deref()),
        ),

        Commands::Validate { root } => {
            handlers::validate::handle(&config.source_root(root.as_deref()))
        }

        Commands::Stub {
            headword,
            target_lang,
            reader_lang,
            force,
            root,
        } => handlers::stub::handle(
            &config.source_root(root.as_deref()),
            headword,
            target_lang,
            reader_lang,
            force,
        ),

        Commands::Entry { command } => {
            let db_path = config.database_path(cli.db.as_deref());

            match command {
                EntryCommand::List { language, format } => {
                    handlers::entry_list::handle(&db_path, language.as_deref(), format)
                }
                EntryCommand::Get {
                    language,
                    headword,
                    variant,
                    format,
                } => handlers::entry_get::handle(&db_path, &language, &headword, variant, format),
                EntryCommand::Search {
                    headword_contains,
                    language,
                    has_reader,
                    jmdict_id,
                    format,
                } => handlers::entry_search::handle(
                    &db_path,
                    &SearchFilter {
                        headword_contains,
                        language,
                        has_reader,
                        jmdict_id,
                    },
                    format,
                ),
            }
        }
    }
}
