//! Command line and environment configuration.
//!
//! Every option can also be given through an environment variable, which is how the public key
//! is usually provided.

use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::store::{FileStore, KeyValueStore, MemoryStore};
use crate::Result;

#[derive(Debug, Parser)]
#[command(
    name = "thanks-bot",
    about = "Discord interactions endpoint counting thanks between users",
    after_help = "Examples:\n  thanks-bot serve --store thanks.json\n  thanks-bot commands"
)]
pub struct Cli {
    /// Format of the log lines written to stderr. Levels are picked with `RUST_LOG`.
    #[arg(long, env = "THANKS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Listen for interactions from Discord.
    Serve(ServeConfig),
    /// Print the application command definitions as JSON, ready for a bulk overwrite.
    Commands,
}

/// Settings of the interactions endpoint.
#[derive(Clone, Debug, Args)]
pub struct ServeConfig {
    /// The application's public key from the developer portal, as 64 hex digits.
    #[arg(long, env = "DISCORD_PUBLIC_KEY", hide_env_values = true)]
    pub public_key: String,
    /// Address the HTTP server binds to.
    #[arg(long, env = "THANKS_BIND_ADDR", default_value = "0.0.0.0:8787")]
    pub bind: String,
    /// Where counters are kept: `memory`, or the path of a JSON file.
    #[arg(long, env = "THANKS_STORE", default_value = "memory")]
    pub store: StoreBinding,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

/// The key-value store instance counters are bound to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreBinding {
    Memory,
    File(PathBuf),
}

impl StoreBinding {
    /// Opens the bound store.
    ///
    /// # Errors
    ///
    /// Returns an error if a file store can't be read.
    pub async fn open(&self) -> Result<Arc<dyn KeyValueStore>> {
        Ok(match self {
            Self::Memory => Arc::new(MemoryStore::new()),
            Self::File(path) => Arc::new(FileStore::open(path).await?),
        })
    }
}

impl FromStr for StoreBinding {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "memory" | ":memory:" => Self::Memory,
            path => Self::File(PathBuf::from(path)),
        })
    }
}

impl fmt::Display for StoreBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "67c6bd767ca099e79efac9fcce4d2022a63bf7dea780e7f3d813f694c1597089";

    #[test]
    fn store_bindings() {
        assert_eq!("memory".parse::<StoreBinding>().unwrap(), StoreBinding::Memory);
        assert_eq!(
            "data/thanks.json".parse::<StoreBinding>().unwrap(),
            StoreBinding::File(PathBuf::from("data/thanks.json"))
        );
        assert_eq!(StoreBinding::File(PathBuf::from("a.json")).to_string(), "a.json");
    }

    #[test]
    fn parses_serve_arguments() {
        let cli = Cli::try_parse_from([
            "thanks-bot",
            "serve",
            "--public-key",
            KEY,
            "--bind",
            "127.0.0.1:9000",
            "--store",
            "thanks.json",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.log_format, LogFormat::Json);
        let Command::Serve(config) = cli.command else {
            panic!("expected the serve command");
        };
        assert_eq!(config.public_key, KEY);
        assert_eq!(config.bind, "127.0.0.1:9000");
        assert_eq!(config.store, StoreBinding::File(PathBuf::from("thanks.json")));
    }

    #[test]
    fn commands_needs_no_key() {
        let cli = Cli::try_parse_from(["thanks-bot", "commands"]).unwrap();
        assert!(matches!(cli.command, Command::Commands));
    }
}
