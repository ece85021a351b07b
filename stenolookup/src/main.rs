use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use stenolookup::{format, Engine, LookupConfig};
use tracing_subscriber::EnvFilter;

/// Find the strokes that write a piece of text.
#[derive(Debug, Parser)]
#[command(name = "stenolookup", version, about)]
struct Cli {
    /// Plover JSON dictionary; repeat for a stack, highest priority first.
    #[arg(short, long = "dict", value_name = "PATH")]
    dicts: Vec<PathBuf>,

    /// TOML configuration file.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,

    /// Show at most N results.
    #[arg(short = 'n', long, value_name = "N")]
    limit: Option<usize>,

    /// Text to look up. Reads lines from stdin when omitted.
    text: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => LookupConfig::load_toml(path)?,
        None => LookupConfig::default(),
    };
    if !cli.dicts.is_empty() {
        config.dictionaries = cli.dicts.clone();
    }
    let engine = Engine::from_config(config)?;

    if let Some(text) = &cli.text {
        return print_lookup(&engine, text, &cli);
    }

    eprintln!("Ready! Type text and press Enter. Ctrl+D to exit.");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let raw = line.context("reading stdin")?;
        let input = raw.trim();
        if input.is_empty() {
            continue;
        }
        if let Err(e) = print_lookup(&engine, input, &cli) {
            eprintln!("error: {e:#}");
        }
    }
    Ok(())
}

fn print_lookup(engine: &Engine, text: &str, cli: &Cli) -> anyhow::Result<()> {
    let lookup = engine.lookup(text)?;
    let out = if cli.json {
        format::render_json(&lookup, cli.limit)?
    } else {
        format::render_text(&lookup, cli.limit)
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{out}")?;
    if !cli.json && cli.text.is_none() {
        writeln!(stdout)?;
    }
    Ok(())
}
