// rhythmkey: capture, hash and compare rhythm-augmented passphrases.

mod commands;

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rhythmkey_config::Config;
use rhythmkey_input::TerminalSource;
use rhythmkey_model::RhythmKey;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "rhythmkey", about = "Make your password more in rhythm")]
struct Args {
    /// Path to config JSON file.
    #[arg(long, global = true, default_value = "rhythmkey.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read a rhythm key from the terminal.
    #[command(visible_alias = "r")]
    Read {
        /// Print the digest instead of the token.
        #[arg(long, overrides_with = "no_hash")]
        hash: bool,

        /// Print the token even when the config enables hashing.
        #[arg(long, overrides_with = "hash")]
        no_hash: bool,

        /// Timing bucket width in milliseconds.
        #[arg(long, allow_hyphen_values = true)]
        salt: Option<i64>,
    },

    /// Read a rhythm key from the terminal and compare it to a stored one.
    #[command(visible_alias = "cmp")]
    Compare {
        /// Rhythm key to compare against.
        #[arg(long)]
        rhythmkey: String,

        /// Timing bucket width in milliseconds.
        #[arg(long, allow_hyphen_values = true)]
        salt: Option<i64>,
    },

    /// Parse a rhythm key to test it and decompose it.
    #[command(visible_alias = "p")]
    Parse {
        /// Rhythm key to parse.
        #[arg(long)]
        rhythmkey: String,

        /// Print the events as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Load config from file, falling back to defaults if it is missing or unreadable.
///
/// Returns the config and a note for the log, since logging is not up yet.
fn load_config(path: &Path) -> (Config, Option<String>) {
    if !path.exists() {
        return (Config::default(), None);
    }
    match Config::read(path) {
        Ok(c) => (c, None),
        Err(e) => (
            Config::default(),
            Some(format!("ignoring config {}: {e}", path.display())),
        ),
    }
}

fn init_logging(config: &Config) {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .init();
}

/// Command line `--hash`/`--no-hash` win over the config's `hash`.
fn resolve_hash(hash: bool, no_hash: bool, config: &Config) -> bool {
    if no_hash { false } else { hash || config.hash }
}

fn open_terminal(config: &Config) -> Result<TerminalSource> {
    if io::stdin().is_terminal() {
        eprintln!("Type your rhythm key, then press Enter.");
    }
    let source = TerminalSource::open(&config.terminators).context("failed to open terminal")?;
    info!(raw = source.is_raw(), "capturing from stdin");
    Ok(source)
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let (config, config_note) = load_config(&args.config);
    init_logging(&config);
    match config_note {
        Some(note) => warn!("{note}"),
        None => info!(path = %args.config.display(), salt = config.salt, "config ready"),
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Read {
            hash,
            no_hash,
            salt,
        } => {
            let hash = resolve_hash(hash, no_hash, &config);
            let source = open_terminal(&config)?;
            commands::read(source, hash, salt.unwrap_or(config.salt), &mut out)?;
        }
        Command::Compare { rhythmkey, salt } => {
            let stored = RhythmKey::parse(&rhythmkey).context("invalid --rhythmkey")?;
            let source = open_terminal(&config)?;
            let salt = salt.unwrap_or(config.salt);
            let matched = commands::compare(&stored, source, salt, &mut out)?;
            if !matched {
                out.flush()?;
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Parse { rhythmkey, json } => {
            commands::parse(&rhythmkey, json, &mut out)?;
        }
    }

    out.flush()?;
    Ok(ExitCode::SUCCESS)
}
