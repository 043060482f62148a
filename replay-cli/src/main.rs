mod cli;
mod commands;
mod config;
mod error;
mod output;

use crate::{
    cli::{Args, Commands, OutputFormat},
    commands::CommandExecutor,
    config::AppConfig,
    error::Result,
};
use clap::Parser;
#[cfg(feature = "colored-output")]
use colored::*;
use std::{io::IsTerminal, process};
use tracing::{Level, error};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let output_format = requested_output(&args.command);

    if let Err(e) = run(args).await {
        match output_format {
            Some(OutputFormat::Json) | Some(OutputFormat::JsonCompact) => {
                let error_json = serde_json::json!({
                    "status": "error",
                    "message": e.to_string(),
                });
                println!("{error_json}");
            }
            _ => {
                error!("Application error: {}", e);
                #[cfg(feature = "colored-output")]
                {
                    eprintln!("{} {}", "Error:".red().bold(), e);
                }
                #[cfg(not(feature = "colored-output"))]
                {
                    eprintln!("Error: {}", e);
                }
            }
        }
        process::exit(1);
    }
}

fn requested_output(command: &Commands) -> Option<OutputFormat> {
    match command {
        Commands::Parse { output, .. } => *output,
        Commands::Classify { output, .. } => *output,
        _ => None,
    }
}

async fn run(args: Args) -> Result<()> {
    init_logging(args.verbose, args.quiet);

    let config = AppConfig::load(args.config.as_deref())?;
    let executor = CommandExecutor::new(config, std::io::stdout().is_terminal());

    match args.command {
        Commands::Parse {
            uploader,
            input,
            output,
            output_file,
            per_game,
            max_concurrent,
        } => {
            executor
                .parse_items(
                    uploader,
                    input.as_deref(),
                    output,
                    output_file.as_deref(),
                    per_game,
                    max_concurrent,
                )
                .await?;
        }

        Commands::Classify {
            uploader,
            title,
            publish_time,
            output,
        } => {
            executor
                .classify_title(uploader, &title, publish_time, output)
                .await?;
        }

        Commands::Uploaders => executor.list_uploaders()?,

        Commands::FormatDate { timestamp } => executor.format_date(timestamp)?,

        Commands::Config => executor.show_config()?,

        Commands::Completions { shell } => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Args::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    // stdout carries the records, logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(verbose),
        )
        .init();
}
