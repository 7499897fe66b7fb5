mod cli;
mod commands;
mod config;
mod constants;
mod display;

use crate::cli::{Args, Commands};
use crate::config::{get_storage, load_config};
use crate::constants::{DEFAULT_LOG_FILTER, PROMPTVC_CLI, USER_ERROR};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use promptvc_core::manager::PromptManager;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help and --version are reported through clap errors too
            let code = if err.use_stderr() {
                USER_ERROR
            } else {
                exitcode::OK
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    if let Commands::Completions { shell } = args.cmd {
        clap_complete::generate(shell, &mut Args::command(), PROMPTVC_CLI, &mut io::stdout());
        return;
    }

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} Problem loading config: {}", "Error:".red(), err);
            std::process::exit(exitcode::CONFIG);
        }
    };

    let manager = PromptManager::new(get_storage(&config, args.storage_path));
    if let Err(err) = commands::run(args.cmd, &manager, &config, &mut io::stdout().lock()) {
        tracing::debug!(error = ?err, "command failed");
        eprintln!("{} {:#}", "Error:".red(), err);
        std::process::exit(USER_ERROR);
    }
}
