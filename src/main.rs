mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "parser_config=debug"
    } else {
        "parser_config=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let mut config = cli::load_config(&cli.config)?;

    match cli.command {
        Commands::Show { format } => {
            cli::show_config(&config, &format)?;
        }
        Commands::Files { path } => {
            cli::list_files(&config, &path)?;
        }
        Commands::Markers { path, format } => {
            cli::report_markers(&config, &path, &format)?;
        }
        Commands::Fingerprint {
            previous,
            rebuild_cache,
        } => {
            config.set_should_rebuild_cache(rebuild_cache);
            cli::show_fingerprint(&config, previous.as_deref())?;
        }
    }

    Ok(())
}
