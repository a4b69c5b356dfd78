//! apiusage - Summarize Anthropic API usage and estimated cost per model

use apiusage::{
    app::{error_message, exit_status, run},
    cli::Cli,
};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays a clean report. RUST_LOG wins when set.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            tracing_subscriber::EnvFilter::new("apiusage=info")
        } else {
            tracing_subscriber::EnvFilter::new("warn")
        }
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let use_color = is_terminal::is_terminal(std::io::stdout());
    if !use_color {
        colored::control::set_override(false);
    }

    let result = run(&cli, use_color).await;
    match &result {
        Ok(output) => println!("{output}"),
        Err(e) => eprint!("{}", error_message(e)),
    }
    ExitCode::from(exit_status(&result))
}
