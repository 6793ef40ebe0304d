mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;

use cli::{Cli, Commands};
use crate::core::models::log_page::LogQuery;

fn main() {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    cli::context::init(args.dir.as_deref());

    let actor = args.actor.as_deref();
    let origin = args.origin.as_deref();

    let result = match &args.command {
        Commands::Install => cli::commands::install::execute(args.verbose),
        Commands::Emit { event } => cli::commands::emit::execute(event.as_deref(), actor, origin),
        Commands::Logs {
            start_date,
            end_date,
            username,
            page,
        } => cli::commands::logs::execute(
            LogQuery {
                start_date: start_date.clone(),
                end_date: end_date.clone(),
                username: username.clone(),
                page: Some(*page),
            },
            actor,
        ),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
