use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use timeoff_calendar::cli::{Cli, format_summary, run};

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(&cli) {
        Ok(report) => {
            println!("{}", format_summary(&report));
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(error = %error, "Import failed");
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}
