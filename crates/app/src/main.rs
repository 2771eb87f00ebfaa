use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod error;
mod keypad;
mod settings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    let settings = match settings::load(&cli.overrides()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "hasiba={level},engine={level},rates={level}",
            level = settings.log_level
        ))
        .with_writer(std::io::stderr)
        .init();

    match commands::run(cli.command, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("command failed: {err:?}");
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
