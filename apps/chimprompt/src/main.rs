use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chimprompt::cli::commands;
use chimprompt::cli::{Cli, Commands};
use chimprompt::config::Config;
use chimprompt::errors::AppError;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration first; .env is optional
    let config = Config::from_env()?;

    // Initialize structured logging on stderr so stdout stays machine-readable
    let level = match cli.verbose {
        0 => config.rust_log.as_str(),
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("Starting chimprompt v{}", env!("CARGO_PKG_VERSION"));

    match run(cli.command, &config).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", e.render(cli.json));
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}

async fn run(command: Commands, config: &Config) -> Result<String, AppError> {
    match command {
        Commands::Elements { category } => commands::cmd_elements(category.as_deref()),
        Commands::Describe { key } => commands::cmd_describe(&key),
        Commands::Build { segments } => commands::cmd_build(&segments),
        Commands::Parse { text, strict } => commands::cmd_parse(&text, strict),
        Commands::Toggle {
            text,
            key,
            argument,
        } => commands::cmd_toggle(&text, &key, argument.as_deref()),
        Commands::Jump { text, mode } => commands::cmd_jump(&text, &mode),
        Commands::Convert { text, offline } => commands::cmd_convert(&text, offline, config).await,
    }
}
