use std::fs;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use guandan_agent::config::{AgentConfig, LogFormat};
use guandan_agent::logging::init_logging;
use guandan_agent::protocol::handle_line;
use guandan_agent::session::serve;

/// Guandan play-decision agent.
#[derive(Debug, Parser)]
#[command(
    name = "guandan-agent",
    author,
    version,
    about = "Heuristic Guandan decision engine speaking line-delimited JSON"
)]
struct Cli {
    /// Path to the YAML configuration file; built-in defaults when omitted.
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Override the tracing level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    /// Override the log output format.
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    /// Exit after validating the configuration.
    #[arg(long, global = true)]
    validate_only: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Answer requests from stdin, one JSON object per line, until EOF.
    Serve,
    /// Answer a single request read from a file, or stdin when no file is given.
    Decide {
        #[arg(value_name = "REQUEST")]
        request: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => AgentConfig::from_path(path)?,
        None => AgentConfig::default(),
    };

    if let Some(level) = cli.log_level {
        config.logging.tracing_level = level;
    }

    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    config.validate()?;

    if cli.validate_only {
        println!("Configuration is valid.");
        return Ok(());
    }

    let _logging_guard = init_logging(&config.logging)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let stdin = io::stdin();
            serve(stdin.lock(), io::stdout().lock(), &config.strategy)
                .context("serving requests")?;
        }
        Command::Decide { request } => {
            let line = match request {
                Some(path) => fs::read_to_string(&path)
                    .with_context(|| format!("reading request at {}", path.display()))?,
                None => {
                    let mut line = String::new();
                    BufReader::new(io::stdin())
                        .read_to_string(&mut line)
                        .context("reading request from stdin")?;
                    line
                }
            };
            let handled = handle_line(line.trim(), &config.strategy);
            println!("{}", handled.response().to_line());
        }
    }

    Ok(())
}
