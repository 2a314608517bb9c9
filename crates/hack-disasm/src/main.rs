use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use hack_disasm::{listing, load_hack, load_tables};

#[derive(Parser, Debug)]
#[command(author, version, about = "Hack disassembler CLI", long_about = None)]
struct Cli {
    /// Input .hack file
    #[arg(value_name = "HACKFILE")]
    input: PathBuf,
    /// Emit a JSON array instead of a text listing
    #[arg(long)]
    json: bool,
    /// Write output to file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
    /// Directory holding symbols.txt, dest.txt, comp.txt and jump.txt
    #[arg(long, value_name = "DIR")]
    tables: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let tables = load_tables(cli.tables.as_deref())?;
    let words = load_hack(&cli.input).with_context(|| format!("reading {}", cli.input.display()))?;
    let entries = listing(&words, &tables);

    let rendered = if cli.json {
        serde_json::to_string_pretty(&entries)? + "\n"
    } else {
        let mut s = String::new();
        for e in &entries {
            s.push_str(&format!("{:05}  {}  {}\n", e.addr, e.word, e.text));
        }
        s
    };

    match &cli.out {
        Some(path) => std::fs::write(path, rendered)?,
        None => std::io::stdout().write_all(rendered.as_bytes())?,
    }
    Ok(())
}
