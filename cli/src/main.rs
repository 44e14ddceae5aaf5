//! Trainify CLI - Terminal client for the Trainify service
//!
//! # Usage
//!
//! ```bash
//! # Log in once; the session is persisted
//! trainify -u http://localhost:4000/api login alice@example.com
//!
//! # Upload a dataset and watch it ingest
//! trainify datasets upload --name contracts lease.pdf offer.docx
//! trainify jobs watch
//!
//! # Ask questions against it
//! trainify ask --dataset <id> "What is the notice period?"
//! ```

use clap::Parser;
use colored::Colorize;

mod args;
mod commands;
mod config;
mod connect;
mod credentials;
mod error;
mod formatter;

use args::{Cli, Command, DatasetCommand, JobCommand};
use config::CliConfig;
use credentials::FileSessionStore;
use error::{CliError, Result};
use formatter::OutputFormatter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = run(cli).await {
        match err {
            CliError::Cancelled => {
                eprintln!("{}", err);
                std::process::exit(130);
            }
            err => {
                eprintln!("{} {}", "error:".red().bold(), err);
                std::process::exit(1);
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .try_init();
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(CliConfig::default_path);
    let config = CliConfig::load(&config_path)?;

    let mut store = FileSessionStore::new()?;
    let client = connect::build_client(&cli, &config, &store)?;
    let formatter = OutputFormatter::new(cli.json, config.color() && !cli.no_color);

    match cli.command {
        Command::Login { email, password } => {
            commands::auth::login(&client, &mut store, &email, password).await
        }
        Command::Register {
            name,
            email,
            password,
        } => commands::auth::register(&client, &name, &email, password).await,
        Command::Logout => commands::auth::logout(&client, &mut store),
        Command::Whoami => commands::auth::whoami(&client),

        Command::Datasets { command } => {
            connect::require_session(&client)?;
            match command {
                DatasetCommand::List => commands::datasets::list(&client, &formatter).await,
                DatasetCommand::Show { id } => {
                    commands::datasets::show(&client, &formatter, &id).await
                }
                DatasetCommand::Rename { id, name } => {
                    commands::datasets::rename(&client, &id, &name).await
                }
                DatasetCommand::Delete { id, yes } => {
                    commands::datasets::delete(&client, &id, yes).await
                }
                DatasetCommand::Upload { name, files } => {
                    commands::datasets::upload(&client, &name, &files).await
                }
            }
        }

        Command::Models => {
            connect::require_session(&client)?;
            commands::rag::models(&client, &formatter).await
        }
        Command::Ask {
            dataset,
            model,
            query,
        } => {
            connect::require_session(&client)?;
            commands::rag::ask(&client, &formatter, &dataset, model, &query).await
        }
        Command::History => {
            connect::require_session(&client)?;
            commands::rag::history(&client, &formatter).await
        }

        Command::Jobs { command } => {
            connect::require_session(&client)?;
            match command {
                JobCommand::List => commands::jobs::list(&client, &formatter).await,
                JobCommand::Watch { interval_ms } => {
                    commands::jobs::watch(&client, &formatter, interval_ms).await
                }
                JobCommand::Cancel { id, yes } => {
                    commands::jobs::cancel(&client, &id, yes).await
                }
            }
        }
    }
}
