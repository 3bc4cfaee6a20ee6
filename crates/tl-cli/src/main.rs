use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tl_cli::commands::render::RenderOptions;
use tl_cli::commands::{convert, navigate, render, steps};
use tl_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match &cli.command {
        Some(Commands::Convert { time, from, to }) => {
            convert::run(time, from.unwrap_or(config.calendar), *to)?;
        }
        Some(Commands::Steps { calendar }) => {
            steps::run(calendar.unwrap_or(config.calendar))?;
        }
        Some(Commands::Navigate {
            step,
            calendar,
            start,
            end,
            target,
        }) => {
            navigate::run(
                *step,
                calendar.unwrap_or(config.calendar),
                start,
                end,
                target.as_deref(),
                config.appearance.week_start,
            )?;
        }
        Some(Commands::Render {
            document,
            start,
            end,
            width,
            height,
            json,
        }) => {
            let options = RenderOptions {
                start: start.as_deref(),
                end: end.as_deref(),
                width: *width,
                height: *height,
            };
            render::run(document, &options, *json, &config)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
