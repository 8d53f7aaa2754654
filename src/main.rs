use std::process::ExitCode;

use clap::Parser;
use thanks_bot::commands::application_commands;
use thanks_bot::config::{Cli, Command, LogFormat};
use thanks_bot::{json, server};
use tracing_subscriber::EnvFilter;

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    match format {
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(cli: Cli) -> thanks_bot::Result<()> {
    match cli.command {
        Command::Serve(config) => server::serve(&config).await,
        Command::Commands => {
            println!("{}", String::from_utf8_lossy(&json::to_vec_pretty(&application_commands())?));
            Ok(())
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(why) => {
            tracing::error!(error = %why, "thanks-bot exited with an error");
            ExitCode::FAILURE
        },
    }
}
